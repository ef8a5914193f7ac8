//! Squad assignment engine.
//!
//! One `SquadEditor` per team and edit session. It keeps the mapping between
//! formation slots and roster players consistent: a player occupies at most
//! one slot, slot roles are fixed by the formation, and switching mode or
//! formation redistributes assignments by role instead of discarding them.
//!
//! Mutating operations are captain-gated. In the spirit of a permission
//! checked UI action, a call by anyone else is ignored (`Ok(false)` / `false`,
//! state untouched) rather than treated as an error; only `save` surfaces
//! `Forbidden`, because its caller needs a reportable outcome.

mod update;

pub use update::{SlotAssignment, SquadUpdate};

use std::collections::VecDeque;

use crate::error::{LeagueError, Result};
use crate::formation::{self, Formation, SlotRole, SquadMode};
use crate::models::{PlayerRef, Squad, SquadSlot, Team, UserId};

pub struct SquadEditor {
    team: Team,
    acting_user: UserId,
    formation: &'static Formation,
    slots: Vec<SquadSlot>,
    active_slot: Option<String>,
    saved: Option<Squad>,
}

impl SquadEditor {
    /// Open an editor for `team`, optionally seeded with the last persisted
    /// squad. A persisted formation id that no longer resolves, or that
    /// belongs to a different mode than the squad claims, falls back to the
    /// mode's default formation; assignments are carried over by role.
    pub fn load(team: Team, acting_user: UserId, saved: Option<Squad>) -> Self {
        let (formation, slots) = match &saved {
            Some(squad) => {
                let formation = match formation::formation_by_id(&squad.formation_id) {
                    Some(f) if f.mode == squad.mode => f,
                    _ => {
                        let fallback = formation::default_formation(squad.mode);
                        log::warn!(
                            "squad for team {} references formation {:?} which does not match mode {}; falling back to {}",
                            squad.team_id,
                            squad.formation_id,
                            squad.mode.player_count(),
                            fallback.id
                        );
                        fallback
                    }
                };
                let slots = rebuild_slots(formation, squad);
                (formation, slots)
            }
            None => {
                let formation = formation::default_formation(SquadMode::Five);
                (formation, empty_slots(formation))
            }
        };

        SquadEditor { team, acting_user, formation, slots, active_slot: None, saved }
    }

    fn is_captain(&self) -> bool {
        self.team.is_captain(self.acting_user)
    }

    pub fn formation(&self) -> &'static Formation {
        self.formation
    }

    pub fn mode(&self) -> SquadMode {
        self.formation.mode
    }

    pub fn slots(&self) -> &[SquadSlot] {
        &self.slots
    }

    pub fn active_slot(&self) -> Option<&str> {
        self.active_slot.as_deref()
    }

    /// Current editor state as a squad value (what `save` would persist).
    pub fn current_squad(&self) -> Squad {
        Squad {
            team_id: self.team.id,
            mode: self.formation.mode,
            formation_id: self.formation.id.to_string(),
            slots: self.slots.clone(),
        }
    }

    /// Roster members not assigned to any slot.
    pub fn bench(&self) -> Vec<&crate::models::TeamMember> {
        self.team
            .members
            .iter()
            .filter(|m| {
                !self
                    .slots
                    .iter()
                    .any(|s| s.player.as_ref().is_some_and(|p| p.id == m.user_id))
            })
            .collect()
    }

    /// Mark a slot as the target for the next assignment.
    pub fn select_slot(&mut self, slot_key: &str) -> bool {
        if !self.is_captain() || !self.formation.has_slot(slot_key) {
            return false;
        }
        self.active_slot = Some(slot_key.to_string());
        true
    }

    /// Assign a roster player to a slot. `Ok(false)` when ignored for a
    /// non-captain; `PlayerAlreadyAssigned` when the player already occupies
    /// a different slot (the existing assignment is left untouched).
    pub fn assign_player(&mut self, slot_key: &str, player_id: UserId) -> Result<bool> {
        if !self.is_captain() {
            return Ok(false);
        }
        if !self.formation.has_slot(slot_key) {
            return Err(LeagueError::InvalidReference(format!(
                "slot {slot_key} does not exist in formation {}",
                self.formation.id
            )));
        }
        let member = self.team.member(player_id).ok_or_else(|| {
            LeagueError::InvalidReference(format!(
                "player {player_id} is not a member of team {}",
                self.team.name
            ))
        })?;

        if let Some(occupied) = self
            .slots
            .iter()
            .find(|s| s.slot_key != slot_key && s.player.as_ref().is_some_and(|p| p.id == player_id))
        {
            return Err(LeagueError::PlayerAlreadyAssigned {
                player: player_id,
                slot: occupied.slot_key.clone(),
            });
        }

        let player = PlayerRef {
            id: member.user_id,
            name: member.name.clone(),
            username: member.username.clone(),
        };
        if let Some(slot) = self.slots.iter_mut().find(|s| s.slot_key == slot_key) {
            slot.player = Some(player);
        }
        self.active_slot = None;
        Ok(true)
    }

    /// Clear a slot's assignment; the player goes back to the bench.
    pub fn remove_player(&mut self, slot_key: &str) -> Result<bool> {
        if !self.is_captain() {
            return Ok(false);
        }
        match self.slots.iter_mut().find(|s| s.slot_key == slot_key) {
            Some(slot) => {
                slot.player = None;
                Ok(true)
            }
            None => Err(LeagueError::InvalidReference(format!(
                "slot {slot_key} does not exist in formation {}",
                self.formation.id
            ))),
        }
    }

    /// Drag-and-drop outcome: swap two occupied slots, or move an assignment
    /// into an empty slot. No-op when the keys are equal or unknown.
    pub fn swap_or_move(&mut self, from_slot_key: &str, to_slot_key: &str) -> bool {
        if !self.is_captain() || from_slot_key == to_slot_key {
            return false;
        }
        let from = self.slots.iter().position(|s| s.slot_key == from_slot_key);
        let to = self.slots.iter().position(|s| s.slot_key == to_slot_key);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };

        let moved = self.slots[from].player.take();
        let displaced = std::mem::replace(&mut self.slots[to].player, moved);
        self.slots[from].player = displaced;
        self.active_slot = None;
        true
    }

    /// Switch squad size; the new mode's default formation is applied and
    /// assignments are remapped by role.
    pub fn change_mode(&mut self, new_mode: SquadMode) -> bool {
        if !self.is_captain() || new_mode == self.formation.mode {
            return false;
        }
        self.remap_to(formation::default_formation(new_mode));
        true
    }

    /// Switch to another formation of the current mode. A formation whose
    /// mode differs from the current one is a no-op; an unknown id is a
    /// referential error.
    pub fn change_formation(&mut self, formation_id: &str) -> Result<bool> {
        if !self.is_captain() {
            return Ok(false);
        }
        let target = formation::formation_by_id(formation_id).ok_or_else(|| {
            LeagueError::NotFound(format!("formation {formation_id}"))
        })?;
        if target.mode != self.formation.mode || target.id == self.formation.id {
            return Ok(false);
        }
        self.remap_to(target);
        Ok(true)
    }

    /// Role-preserving remap. Assignments are grouped by role and ordered by
    /// the x coordinate of the slot they currently occupy (left to right,
    /// slot key as tie-break), then poured into the target formation's slots
    /// of the same role in that order. Surplus players return to the bench.
    /// Deterministic for a given prior state.
    fn remap_to(&mut self, target: &'static Formation) {
        let mut assigned: Vec<(SlotRole, f32, String, PlayerRef)> = self
            .slots
            .iter()
            .filter_map(|slot| {
                let player = slot.player.clone()?;
                let x = self.formation.slot(&slot.slot_key).map_or(0.0, |t| t.x);
                Some((slot.role, x, slot.slot_key.clone(), player))
            })
            .collect();
        assigned.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.2.cmp(&b.2)));

        let mut new_slots = empty_slots(target);
        for role in [SlotRole::Gk, SlotRole::Def, SlotRole::Mid, SlotRole::Att] {
            let mut queue: VecDeque<PlayerRef> = assigned
                .iter()
                .filter(|(r, ..)| *r == role)
                .map(|(.., p)| p.clone())
                .collect();
            for template in target.slots_for_role(role) {
                let Some(player) = queue.pop_front() else {
                    break;
                };
                if let Some(slot) = new_slots.iter_mut().find(|s| s.slot_key == template.key) {
                    slot.player = Some(player);
                }
            }
            if !queue.is_empty() {
                log::debug!(
                    "{} {} assignment(s) benched remapping {} -> {}",
                    queue.len(),
                    role.short_name(),
                    self.formation.id,
                    target.id
                );
            }
        }

        self.formation = target;
        self.slots = new_slots;
        self.active_slot = None;
    }

    /// Persist the current layout. Captain-only; last write wins.
    pub fn save(&mut self) -> Result<Squad> {
        if !self.is_captain() {
            return Err(LeagueError::Forbidden(format!(
                "only the captain of team {} may save its squad",
                self.team.name
            )));
        }
        let squad = self.current_squad();
        self.saved = Some(squad.clone());
        Ok(squad)
    }

    /// Discard unsaved edits, restoring the last persisted squad (or the
    /// empty default when nothing was ever saved).
    pub fn reset(&mut self) {
        match self.saved.clone() {
            Some(squad) => {
                let formation = formation::formation_by_id(&squad.formation_id)
                    .filter(|f| f.mode == squad.mode)
                    .unwrap_or_else(|| formation::default_formation(squad.mode));
                self.slots = rebuild_slots(formation, &squad);
                self.formation = formation;
            }
            None => {
                let formation = formation::default_formation(SquadMode::Five);
                self.formation = formation;
                self.slots = empty_slots(formation);
            }
        }
        self.active_slot = None;
    }
}

fn empty_slots(formation: &Formation) -> Vec<SquadSlot> {
    formation
        .slots
        .iter()
        .map(|slot| SquadSlot {
            slot_key: slot.key.to_string(),
            role: slot.role,
            player: None,
        })
        .collect()
}

/// Rebuild editor slots from a persisted squad. Assignments are matched by
/// slot key when the key still exists with the same role; anything else is
/// carried over through the role-based redistribution used for formation
/// changes, so a fallback formation keeps as many assignments as it can.
fn rebuild_slots(formation: &'static Formation, squad: &Squad) -> Vec<SquadSlot> {
    let keys_match = squad
        .slots
        .iter()
        .all(|s| formation.slot(&s.slot_key).is_some_and(|t| t.role == s.role));

    if keys_match && squad.slots.len() == formation.slots.len() {
        // Normalize to formation order.
        return formation
            .slots
            .iter()
            .map(|template| SquadSlot {
                slot_key: template.key.to_string(),
                role: template.role,
                player: squad
                    .slots
                    .iter()
                    .find(|s| s.slot_key == template.key)
                    .and_then(|s| s.player.clone()),
            })
            .collect();
    }

    // Keys do not line up (fallback formation): redistribute by role, ordered
    // by the stored slot order as the best remaining proxy for layout.
    let mut slots = empty_slots(formation);
    for role in [SlotRole::Gk, SlotRole::Def, SlotRole::Mid, SlotRole::Att] {
        let mut queue: VecDeque<PlayerRef> = squad
            .slots
            .iter()
            .filter(|s| s.role == role)
            .filter_map(|s| s.player.clone())
            .collect();
        for template in formation.slots_for_role(role) {
            let Some(player) = queue.pop_front() else {
                break;
            };
            if let Some(slot) = slots.iter_mut().find(|s| s.slot_key == template.key) {
                slot.player = Some(player);
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests;
