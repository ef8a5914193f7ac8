//! League aggregate and its forward-only lifecycle.
//!
//! Draft leagues collect teams; locking freezes the team list and moves the
//! league to Active, which is the only state schedule generation accepts.
//! Transitions never go backwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::models::{LeagueId, TeamId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeagueStatus {
    Draft,
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub city: String,
    pub season: String,
    pub start_date: NaiveDate,
    pub status: LeagueStatus,
    pub owner_id: UserId,
    pub team_ids: Vec<TeamId>,
}

impl League {
    fn require_owner(&self, actor: UserId, action: &str) -> Result<()> {
        if actor != self.owner_id {
            return Err(LeagueError::Forbidden(format!(
                "{action} on league {} requires the league owner",
                self.name
            )));
        }
        Ok(())
    }

    /// Add a team while the league is still in Draft. Duplicates rejected.
    pub fn add_team(&mut self, actor: UserId, team_id: TeamId) -> Result<()> {
        self.require_owner(actor, "add team")?;

        if self.status != LeagueStatus::Draft {
            return Err(LeagueError::InvalidState(format!(
                "teams can only be added while league {} is in draft",
                self.name
            )));
        }
        if self.team_ids.contains(&team_id) {
            return Err(LeagueError::InvalidState(format!(
                "team {team_id} is already entered in league {}",
                self.name
            )));
        }

        self.team_ids.push(team_id);
        Ok(())
    }

    /// Lock the league: Draft -> Active. Requires at least two teams.
    /// Locking an already locked or completed league is rejected.
    pub fn lock(&mut self, actor: UserId) -> Result<()> {
        self.require_owner(actor, "lock")?;

        if self.status != LeagueStatus::Draft {
            return Err(LeagueError::InvalidState(format!(
                "league {} is already {:?}",
                self.name, self.status
            )));
        }
        if self.team_ids.len() < 2 {
            return Err(LeagueError::InvalidState(format!(
                "league {} needs at least 2 teams to lock, has {}",
                self.name,
                self.team_ids.len()
            )));
        }

        self.status = LeagueStatus::Active;
        log::info!("league {} locked with {} teams", self.name, self.team_ids.len());
        Ok(())
    }

    /// Close out the season: Active -> Completed.
    pub fn complete(&mut self, actor: UserId) -> Result<()> {
        self.require_owner(actor, "complete")?;

        if self.status != LeagueStatus::Active {
            return Err(LeagueError::InvalidState(format!(
                "only an active league can be completed, {} is {:?}",
                self.name, self.status
            )));
        }

        self.status = LeagueStatus::Completed;
        log::info!("league {} completed", self.name);
        Ok(())
    }
}
