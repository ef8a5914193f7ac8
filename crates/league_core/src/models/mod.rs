pub mod fixture;
pub mod league;
pub mod squad;
pub mod team;

use uuid::Uuid;

pub type UserId = Uuid;
pub type TeamId = Uuid;
pub type LeagueId = Uuid;
pub type MatchId = Uuid;
pub type PitchId = Uuid;

pub use fixture::{Match, Score};
pub use league::{League, LeagueStatus};
pub use squad::{PlayerRef, Squad, SquadSlot};
pub use team::{Team, TeamMember, TeamRole};
