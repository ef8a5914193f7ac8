use super::*;
use crate::formation::SquadMode;
use crate::models::{TeamMember, TeamRole};
use uuid::Uuid;

fn roster(size: usize) -> Team {
    let mut members: Vec<TeamMember> = (0..size)
        .map(|i| TeamMember {
            user_id: Uuid::new_v4(),
            name: format!("Player {i}"),
            username: format!("player-{i}"),
            role: TeamRole::Member,
        })
        .collect();
    members[0].role = TeamRole::Captain;
    let captain_id = members[0].user_id;
    Team {
        id: Uuid::new_v4(),
        name: "Rovers".to_string(),
        city: "Leeds".to_string(),
        captain_id,
        members,
        preferred_pitch_id: None,
    }
}

fn editor_for_captain(team: &Team) -> SquadEditor {
    SquadEditor::load(team.clone(), team.captain_id, None)
}

#[test]
fn assign_then_reassign_elsewhere_is_rejected() {
    let team = roster(8);
    let player = team.members[1].user_id;
    let mut editor = editor_for_captain(&team);

    assert!(editor.assign_player("gk", player).expect("first assignment"));
    let err = editor.assign_player("att", player).unwrap_err();
    assert!(matches!(err, LeagueError::PlayerAlreadyAssigned { .. }));

    // Existing assignment untouched.
    let squad = editor.current_squad();
    let gk = squad.slots.iter().find(|s| s.slot_key == "gk").unwrap();
    assert_eq!(gk.player.as_ref().map(|p| p.id), Some(player));
    let att = squad.slots.iter().find(|s| s.slot_key == "att").unwrap();
    assert!(att.player.is_none());
}

#[test]
fn non_member_cannot_be_assigned() {
    let team = roster(6);
    let mut editor = editor_for_captain(&team);
    let err = editor.assign_player("gk", Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, LeagueError::InvalidReference(_)));
}

#[test]
fn non_captain_mutations_leave_state_identical() {
    let team = roster(8);
    let captain = team.captain_id;
    let outsider = team.members[2].user_id;
    let p1 = team.members[1].user_id;

    let mut editor = SquadEditor::load(team.clone(), captain, None);
    editor.assign_player("gk", p1).unwrap();
    let saved = editor.save().unwrap();

    let mut editor = SquadEditor::load(team.clone(), outsider, Some(saved.clone()));
    let before = editor.current_squad();

    assert!(!editor.select_slot("att"));
    assert!(!editor.assign_player("att", outsider).unwrap());
    assert!(!editor.remove_player("gk").unwrap());
    assert!(!editor.swap_or_move("gk", "att"));
    assert!(!editor.change_mode(SquadMode::Six));
    assert!(!editor.change_formation("5-2-1-1").unwrap());
    assert!(matches!(editor.save(), Err(LeagueError::Forbidden(_))));

    assert_eq!(editor.current_squad(), before);
}

#[test]
fn swap_exchanges_two_occupied_slots() {
    let team = roster(8);
    let p1 = team.members[1].user_id;
    let p2 = team.members[2].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("mid-l", p1).unwrap();
    editor.assign_player("mid-r", p2).unwrap();

    assert!(editor.swap_or_move("mid-l", "mid-r"));

    let squad = editor.current_squad();
    let slot = |key: &str| {
        squad
            .slots
            .iter()
            .find(|s| s.slot_key == key)
            .and_then(|s| s.player.as_ref())
            .map(|p| p.id)
    };
    assert_eq!(slot("mid-l"), Some(p2));
    assert_eq!(slot("mid-r"), Some(p1));
}

#[test]
fn move_into_empty_slot_vacates_source() {
    let team = roster(8);
    let p1 = team.members[1].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("mid-l", p1).unwrap();

    assert!(editor.swap_or_move("mid-l", "att"));

    let squad = editor.current_squad();
    assert!(squad.slots.iter().find(|s| s.slot_key == "mid-l").unwrap().player.is_none());
    assert_eq!(
        squad
            .slots
            .iter()
            .find(|s| s.slot_key == "att")
            .unwrap()
            .player
            .as_ref()
            .map(|p| p.id),
        Some(p1)
    );
}

#[test]
fn swap_same_or_unknown_slot_is_noop() {
    let team = roster(8);
    let p1 = team.members[1].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("gk", p1).unwrap();
    let before = editor.current_squad();

    assert!(!editor.swap_or_move("gk", "gk"));
    assert!(!editor.swap_or_move("gk", "no-such-slot"));
    assert!(!editor.swap_or_move("no-such-slot", "gk"));
    assert_eq!(editor.current_squad(), before);
}

#[test]
fn mode_change_remaps_defenders_left_to_right() {
    // Three defenders at x = 0.2 / 0.5 / 0.8; the 6-a-side default has only
    // two DEF slots, so the leftmost two survive and the third is benched.
    let team = roster(8);
    let (p1, p2, p3) = (
        team.members[1].user_id,
        team.members[2].user_id,
        team.members[3].user_id,
    );
    let mut editor = editor_for_captain(&team);
    assert!(editor.change_formation("5-3-0-1").unwrap());
    editor.assign_player("def-l", p1).unwrap(); // x = 0.2
    editor.assign_player("def-c", p2).unwrap(); // x = 0.5
    editor.assign_player("def-r", p3).unwrap(); // x = 0.8

    assert!(editor.change_mode(SquadMode::Six));
    assert_eq!(editor.formation().id, "6-2-2-1");

    let squad = editor.current_squad();
    let def_players: Vec<_> = squad
        .slots
        .iter()
        .filter(|s| s.role == SlotRole::Def)
        .map(|s| s.player.as_ref().map(|p| p.id))
        .collect();
    assert_eq!(def_players, vec![Some(p1), Some(p2)]);
    assert!(editor.bench().iter().any(|m| m.user_id == p3));
}

#[test]
fn mode_change_remap_is_repeatable() {
    let team = roster(8);
    let build = || {
        let mut editor = editor_for_captain(&team);
        editor.change_formation("5-3-0-1").unwrap();
        editor.assign_player("def-l", team.members[1].user_id).unwrap();
        editor.assign_player("def-c", team.members[2].user_id).unwrap();
        editor.assign_player("def-r", team.members[3].user_id).unwrap();
        editor.change_mode(SquadMode::Six);
        editor.current_squad()
    };
    assert_eq!(build(), build());
}

#[test]
fn formation_change_keeps_same_role_assignments() {
    let team = roster(8);
    let gk = team.members[1].user_id;
    let att = team.members[2].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("gk", gk).unwrap();
    editor.assign_player("att", att).unwrap();

    assert!(editor.change_formation("5-2-1-1").unwrap());

    let squad = editor.current_squad();
    let by_role = |role: SlotRole| {
        squad
            .slots
            .iter()
            .filter(|s| s.role == role)
            .filter_map(|s| s.player.as_ref())
            .map(|p| p.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(by_role(SlotRole::Gk), vec![gk]);
    assert_eq!(by_role(SlotRole::Att), vec![att]);
}

#[test]
fn change_formation_across_modes_is_noop() {
    let team = roster(8);
    let mut editor = editor_for_captain(&team);
    assert!(!editor.change_formation("6-2-2-1").unwrap());
    assert_eq!(editor.formation().id, "5-1-2-1");
    assert!(editor.change_formation("nope").is_err());
}

#[test]
fn reset_restores_last_saved_state() {
    let team = roster(8);
    let p1 = team.members[1].user_id;
    let p2 = team.members[2].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("gk", p1).unwrap();
    let saved = editor.save().unwrap();

    editor.assign_player("att", p2).unwrap();
    editor.reset();
    assert_eq!(editor.current_squad(), saved);
}

#[test]
fn reset_without_save_returns_to_empty_default() {
    let team = roster(8);
    let mut editor = editor_for_captain(&team);
    editor.assign_player("gk", team.members[1].user_id).unwrap();
    editor.reset();
    assert_eq!(editor.formation().id, "5-1-2-1");
    assert!(editor.current_squad().assigned_players().next().is_none());
}

#[test]
fn select_slot_is_cleared_by_assignment() {
    let team = roster(8);
    let mut editor = editor_for_captain(&team);
    assert!(editor.select_slot("mid-l"));
    assert_eq!(editor.active_slot(), Some("mid-l"));
    editor.assign_player("mid-l", team.members[1].user_id).unwrap();
    assert_eq!(editor.active_slot(), None);
}

#[test]
fn loading_mismatched_formation_falls_back_to_mode_default() {
    let team = roster(8);
    let p1 = team.members[1].user_id;
    let mut editor = editor_for_captain(&team);
    editor.assign_player("gk", p1).unwrap();
    let mut saved = editor.save().unwrap();

    // Corrupt the persisted record: formation from the wrong mode.
    saved.formation_id = "6-2-2-1".to_string();

    let editor = SquadEditor::load(team.clone(), team.captain_id, Some(saved));
    assert_eq!(editor.formation().id, "5-1-2-1");
    let squad = editor.current_squad();
    let gk = squad.slots.iter().find(|s| s.role == SlotRole::Gk).unwrap();
    assert_eq!(gk.player.as_ref().map(|p| p.id), Some(p1));
}

mod update_payload {
    use super::*;

    fn update(formation_id: &str, slots: Vec<(&str, Option<UserId>)>) -> SquadUpdate {
        SquadUpdate {
            mode: SquadMode::Five,
            formation_id: formation_id.to_string(),
            slots: slots
                .into_iter()
                .map(|(key, player_id)| SlotAssignment { slot_key: key.to_string(), player_id })
                .collect(),
        }
    }

    #[test]
    fn valid_payload_builds_a_squad_with_snapshots() {
        let team = roster(8);
        let p1 = team.members[1].user_id;
        let squad = update("5-1-2-1", vec![("gk", Some(p1)), ("att", None)])
            .into_squad(&team)
            .expect("valid payload");
        assert_eq!(squad.formation_id, "5-1-2-1");
        assert_eq!(squad.slots.len(), 5);
        let gk = squad.slots.iter().find(|s| s.slot_key == "gk").unwrap();
        let player = gk.player.as_ref().expect("assigned");
        assert_eq!(player.id, p1);
        assert_eq!(player.name, team.members[1].name);
    }

    #[test]
    fn unknown_formation_rejected() {
        let team = roster(8);
        let err = update("4-4-2", vec![]).into_squad(&team).unwrap_err();
        assert!(matches!(err, LeagueError::NotFound(_)));
    }

    #[test]
    fn formation_mode_mismatch_rejected() {
        let team = roster(8);
        let err = update("6-2-2-1", vec![]).into_squad(&team).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidReference(_)));
    }

    #[test]
    fn foreign_slot_key_rejected() {
        let team = roster(8);
        let err = update("5-1-2-1", vec![("def-l", None)]).into_squad(&team).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidReference(_)));
    }

    #[test]
    fn duplicate_player_rejected() {
        let team = roster(8);
        let p1 = team.members[1].user_id;
        let err = update("5-1-2-1", vec![("gk", Some(p1)), ("att", Some(p1))])
            .into_squad(&team)
            .unwrap_err();
        assert!(matches!(err, LeagueError::PlayerAlreadyAssigned { .. }));
    }

    #[test]
    fn non_member_player_rejected() {
        let team = roster(8);
        let err = update("5-1-2-1", vec![("gk", Some(Uuid::new_v4()))])
            .into_squad(&team)
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidReference(_)));
    }
}
