use serde::{Deserialize, Serialize};

use crate::models::{PitchId, TeamId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Owner,
    Captain,
    Member,
}

impl TeamRole {
    /// Owner and Captain both count as the team's single controlling member.
    pub fn is_controlling(&self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Captain)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: UserId,
    pub name: String,
    pub username: String,
    pub role: TeamRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub city: String,
    pub captain_id: UserId,
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub preferred_pitch_id: Option<PitchId>,
}

impl Team {
    pub fn validate(&self) -> Result<(), String> {
        let controlling = self.members.iter().filter(|m| m.role.is_controlling()).count();
        if controlling != 1 {
            return Err(format!(
                "team {} must have exactly one owner/captain member, found {}",
                self.name, controlling
            ));
        }

        if !self.is_member(self.captain_id) {
            return Err(format!(
                "captain of team {} is not a current member",
                self.name
            ));
        }

        Ok(())
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn member(&self, user_id: UserId) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn is_captain(&self, user_id: UserId) -> bool {
        self.captain_id == user_id
    }
}
