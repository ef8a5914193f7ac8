use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LeagueId, MatchId, TeamId};

/// Final score of a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home_goals: u8,
    pub away_goals: u8,
}

/// One fixture in a league schedule. `result` stays None until the match is
/// played and the score entered; `scheduled_at` is None until a kickoff is
/// assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub league_id: LeagueId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub round: u32,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub result: Option<Score>,
}

impl Match {
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}
