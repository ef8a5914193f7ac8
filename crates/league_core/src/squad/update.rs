//! Boundary validation for the update-squad contract.
//!
//! The transport layer hands us `{mode, formation_id, slots}` as sent by the
//! squad editor UI. Validation happens once, here, and produces a fully
//! typed `Squad`; nothing downstream re-checks these rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::formation;
use crate::models::{PlayerRef, Squad, SquadSlot, Team, UserId};
use crate::formation::SquadMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_key: String,
    pub player_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadUpdate {
    pub mode: SquadMode,
    pub formation_id: String,
    pub slots: Vec<SlotAssignment>,
}

impl SquadUpdate {
    /// Validate the payload against the formation catalog and the team
    /// roster, returning the squad to persist. Slots omitted from the
    /// payload stay unassigned.
    pub fn into_squad(self, team: &Team) -> Result<Squad> {
        let formation = formation::formation_by_id(&self.formation_id)
            .ok_or_else(|| LeagueError::NotFound(format!("formation {}", self.formation_id)))?;
        if formation.mode != self.mode {
            return Err(LeagueError::InvalidReference(format!(
                "formation {} is for {}-a-side, payload says {}-a-side",
                formation.id,
                formation.mode.player_count(),
                self.mode.player_count()
            )));
        }

        let mut seen_keys: HashSet<&str> = HashSet::new();
        let mut seen_players: HashSet<UserId> = HashSet::new();
        for assignment in &self.slots {
            if !formation.has_slot(&assignment.slot_key) {
                return Err(LeagueError::InvalidReference(format!(
                    "slot {} does not belong to formation {}",
                    assignment.slot_key, formation.id
                )));
            }
            if !seen_keys.insert(assignment.slot_key.as_str()) {
                return Err(LeagueError::InvalidReference(format!(
                    "slot {} appears more than once in the payload",
                    assignment.slot_key
                )));
            }
            if let Some(player_id) = assignment.player_id {
                if !team.is_member(player_id) {
                    return Err(LeagueError::InvalidReference(format!(
                        "player {player_id} is not a member of team {}",
                        team.name
                    )));
                }
                if !seen_players.insert(player_id) {
                    return Err(LeagueError::PlayerAlreadyAssigned {
                        player: player_id,
                        slot: assignment.slot_key.clone(),
                    });
                }
            }
        }

        let slots = formation
            .slots
            .iter()
            .map(|template| {
                let player = self
                    .slots
                    .iter()
                    .find(|a| a.slot_key == template.key)
                    .and_then(|a| a.player_id)
                    .and_then(|id| team.member(id))
                    .map(|member| PlayerRef {
                        id: member.user_id,
                        name: member.name.clone(),
                        username: member.username.clone(),
                    });
                SquadSlot {
                    slot_key: template.key.to_string(),
                    role: template.role,
                    player,
                }
            })
            .collect();

        Ok(Squad {
            team_id: team.id,
            mode: self.mode,
            formation_id: formation.id.to_string(),
            slots,
        })
    }
}
