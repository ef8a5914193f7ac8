use serde::{Deserialize, Serialize};

use crate::formation::{Formation, SlotRole, SquadMode};
use crate::models::{TeamId, UserId};

/// Display snapshot of the assigned player, denormalized from the roster so
/// the squad renders without a member lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: UserId,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSlot {
    pub slot_key: String,
    pub role: SlotRole,
    pub player: Option<PlayerRef>,
}

/// Persisted squad layout for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub team_id: TeamId,
    pub mode: SquadMode,
    pub formation_id: String,
    pub slots: Vec<SquadSlot>,
}

impl Squad {
    /// All slots of a formation, nobody assigned.
    pub fn empty(team_id: TeamId, formation: &Formation) -> Self {
        Squad {
            team_id,
            mode: formation.mode,
            formation_id: formation.id.to_string(),
            slots: formation
                .slots
                .iter()
                .map(|slot| SquadSlot {
                    slot_key: slot.key.to_string(),
                    role: slot.role,
                    player: None,
                })
                .collect(),
        }
    }

    pub fn assigned_players(&self) -> impl Iterator<Item = &PlayerRef> {
        self.slots.iter().filter_map(|s| s.player.as_ref())
    }
}
