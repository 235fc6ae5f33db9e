pub mod ranking;
pub mod records;
pub mod types;
pub mod validation;

pub use ranking::{compute_ranking, RankingRow};
pub use records::{
    Coach, Follow, FollowKey, Match, Opinion, Participation, ParticipationKey, Player,
    PlayerWithCoach, Statistic, User, UserOpinion, UNSAVED_ID,
};
pub use types::{InteractionFrequency, PlayerStatus, Position, Variants};
pub use validation::{Field, ValidationError};
