use thiserror::Error;

use crate::models::{LeagueId, UserId};

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("player {player} is already assigned to slot {slot}")]
    PlayerAlreadyAssigned { player: UserId, slot: String },

    #[error("league {0} already has a generated schedule")]
    ScheduleAlreadyExists(LeagueId),

    #[error("cannot build a schedule for {found} team(s); at least 2 required")]
    InvalidTeamCount { found: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LeagueError {
    /// Whether retrying the same call could ever succeed without the caller
    /// first changing the underlying data. Business-rule rejections are final.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LeagueError::Serialization(_) => false,
            LeagueError::Forbidden(_) => false,
            LeagueError::PlayerAlreadyAssigned { .. } => false,
            // State can move forward (teams added, league locked), so the
            // same request may become valid later.
            LeagueError::InvalidState(_) => true,
            LeagueError::InvalidTeamCount { .. } => true,
            LeagueError::ScheduleAlreadyExists(_) => false,
            LeagueError::NotFound(_) => false,
            LeagueError::InvalidReference(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
