// crates/league_core/src/formation/mod.rs
// Static catalog of small-sided formations (5-a-side and 6-a-side).
// Read-only reference data; squads point into it by formation id.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Squad size, goalkeeper included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SquadMode {
    Five,
    Six,
}

impl SquadMode {
    pub fn player_count(&self) -> usize {
        match self {
            SquadMode::Five => 5,
            SquadMode::Six => 6,
        }
    }
}

impl From<SquadMode> for u8 {
    fn from(mode: SquadMode) -> u8 {
        mode.player_count() as u8
    }
}

impl TryFrom<u8> for SquadMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            5 => Ok(SquadMode::Five),
            6 => Ok(SquadMode::Six),
            other => Err(format!("unsupported squad mode: {other}")),
        }
    }
}

/// Role a formation slot is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotRole {
    Gk,
    Def,
    Mid,
    Att,
}

impl SlotRole {
    pub fn short_name(&self) -> &'static str {
        match self {
            SlotRole::Gk => "GK",
            SlotRole::Def => "DEF",
            SlotRole::Mid => "MID",
            SlotRole::Att => "ATT",
        }
    }
}

/// One position in a formation. Coordinates are normalized:
/// x 0.0 = left touchline, 1.0 = right touchline;
/// y 0.0 = own goal, 1.0 = opponent goal.
#[derive(Debug, Clone, Serialize)]
pub struct SlotTemplate {
    pub key: &'static str,
    pub role: SlotRole,
    pub x: f32,
    pub y: f32,
    pub label: &'static str,
}

impl SlotTemplate {
    fn new(key: &'static str, role: SlotRole, x: f32, y: f32, label: &'static str) -> Self {
        SlotTemplate { key, role, x, y, label }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Formation {
    pub id: &'static str,
    pub mode: SquadMode,
    pub slots: Vec<SlotTemplate>,
}

impl Formation {
    fn new(id: &'static str, mode: SquadMode, slots: Vec<SlotTemplate>) -> Self {
        debug_assert_eq!(slots.len(), mode.player_count());
        debug_assert_eq!(slots.iter().filter(|s| s.role == SlotRole::Gk).count(), 1);
        Formation { id, mode, slots }
    }

    pub fn slot(&self, key: &str) -> Option<&SlotTemplate> {
        self.slots.iter().find(|s| s.key == key)
    }

    pub fn has_slot(&self, key: &str) -> bool {
        self.slot(key).is_some()
    }

    /// Slots of one role, ordered left to right by x. The remap logic relies
    /// on this ordering being stable.
    pub fn slots_for_role(&self, role: SlotRole) -> Vec<&SlotTemplate> {
        let mut slots: Vec<&SlotTemplate> = self.slots.iter().filter(|s| s.role == role).collect();
        slots.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.key.cmp(b.key)));
        slots
    }

    pub fn role_count(&self, role: SlotRole) -> usize {
        self.slots.iter().filter(|s| s.role == role).count()
    }
}

use SlotRole::{Att, Def, Gk, Mid};

static CATALOG: Lazy<Vec<Formation>> = Lazy::new(|| {
    vec![
        // 5-a-side. The diamond is the default.
        Formation::new(
            "5-1-2-1",
            SquadMode::Five,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def", Def, 0.5, 0.25, "DEF"),
                SlotTemplate::new("mid-l", Mid, 0.25, 0.5, "LM"),
                SlotTemplate::new("mid-r", Mid, 0.75, 0.5, "RM"),
                SlotTemplate::new("att", Att, 0.5, 0.8, "ST"),
            ],
        ),
        Formation::new(
            "5-2-1-1",
            SquadMode::Five,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def-l", Def, 0.3, 0.25, "LD"),
                SlotTemplate::new("def-r", Def, 0.7, 0.25, "RD"),
                SlotTemplate::new("mid", Mid, 0.5, 0.55, "CM"),
                SlotTemplate::new("att", Att, 0.5, 0.8, "ST"),
            ],
        ),
        Formation::new(
            "5-3-0-1",
            SquadMode::Five,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def-l", Def, 0.2, 0.25, "LD"),
                SlotTemplate::new("def-c", Def, 0.5, 0.22, "CD"),
                SlotTemplate::new("def-r", Def, 0.8, 0.25, "RD"),
                SlotTemplate::new("att", Att, 0.5, 0.75, "ST"),
            ],
        ),
        // 6-a-side.
        Formation::new(
            "6-2-2-1",
            SquadMode::Six,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def-l", Def, 0.3, 0.25, "LD"),
                SlotTemplate::new("def-r", Def, 0.7, 0.25, "RD"),
                SlotTemplate::new("mid-l", Mid, 0.3, 0.55, "LM"),
                SlotTemplate::new("mid-r", Mid, 0.7, 0.55, "RM"),
                SlotTemplate::new("att", Att, 0.5, 0.8, "ST"),
            ],
        ),
        Formation::new(
            "6-2-1-2",
            SquadMode::Six,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def-l", Def, 0.3, 0.25, "LD"),
                SlotTemplate::new("def-r", Def, 0.7, 0.25, "RD"),
                SlotTemplate::new("mid", Mid, 0.5, 0.5, "CM"),
                SlotTemplate::new("att-l", Att, 0.3, 0.8, "LF"),
                SlotTemplate::new("att-r", Att, 0.7, 0.8, "RF"),
            ],
        ),
        Formation::new(
            "6-3-1-1",
            SquadMode::Six,
            vec![
                SlotTemplate::new("gk", Gk, 0.5, 0.05, "GK"),
                SlotTemplate::new("def-l", Def, 0.2, 0.25, "LD"),
                SlotTemplate::new("def-c", Def, 0.5, 0.22, "CD"),
                SlotTemplate::new("def-r", Def, 0.8, 0.25, "RD"),
                SlotTemplate::new("mid", Mid, 0.5, 0.55, "CM"),
                SlotTemplate::new("att", Att, 0.5, 0.8, "ST"),
            ],
        ),
    ]
});

/// Canonical formation for a mode. Every mode has one, so this is total.
pub fn default_formation(mode: SquadMode) -> &'static Formation {
    CATALOG
        .iter()
        .find(|f| f.mode == mode)
        .expect("catalog has at least one formation per mode")
}

/// Lookup by id. An id can be syntactically valid but belong to the wrong
/// mode; callers must check `formation.mode` before using the result.
pub fn formation_by_id(id: &str) -> Option<&'static Formation> {
    CATALOG.iter().find(|f| f.id == id)
}

pub fn formations_for_mode(mode: SquadMode) -> Vec<&'static Formation> {
    CATALOG.iter().filter(|f| f.mode == mode).collect()
}
