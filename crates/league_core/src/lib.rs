//! # league_core - Amateur League Scheduling & Standings Core
//!
//! Domain core for organizing amateur football leagues: squad formation
//! layout and assignment, round-robin fixture generation, and result-driven
//! standings computation. The JSON API makes it easy to drive from an HTTP
//! layer or background jobs without linking against the domain types.
//!
//! ## Properties
//! - Fully deterministic scheduling (same teams + config = same fixtures)
//! - Standings recomputed from the match list on every read, never cached
//! - Typed error taxonomy; transport mapping is the caller's concern

pub mod api;
pub mod error;
pub mod formation;
pub mod models;
pub mod schedule;
pub mod squad;
pub mod standings;

// Re-export main API functions
pub use api::{
    add_league_team_json, generate_schedule_json, get_squad_json, get_standings_json,
    lock_league_json, update_squad_json,
};
pub use error::{LeagueError, Result};

// Re-export the formation catalog
pub use formation::{
    default_formation, formation_by_id, formations_for_mode, Formation, SlotRole, SlotTemplate,
    SquadMode,
};

// Re-export domain models
pub use models::{
    League, LeagueStatus, Match, PlayerRef, Score, Squad, SquadSlot, Team, TeamMember, TeamRole,
};

// Re-export component entry points
pub use schedule::{generate_schedule, Legs, ScheduleConfig};
pub use squad::{SquadEditor, SquadUpdate};
pub use standings::{compute_standings, StandingsOutcome, StandingsRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn member(name: &str, role: TeamRole) -> TeamMember {
        TeamMember {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            username: name.to_lowercase().replace(' ', "-"),
            role,
        }
    }

    fn team(name: &str) -> Team {
        let captain = member(&format!("{name} captain"), TeamRole::Captain);
        let captain_id = captain.user_id;
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            city: "Bristol".to_string(),
            captain_id,
            members: vec![
                captain,
                member(&format!("{name} keeper"), TeamRole::Member),
                member(&format!("{name} striker"), TeamRole::Member),
            ],
            preferred_pitch_id: None,
        }
    }

    // End-to-end pass over the whole core: draft a league, lock it, generate
    // fixtures, enter results, and read the table.
    #[test]
    fn full_season_flow() {
        let owner = Uuid::new_v4();
        let teams: Vec<Team> = ["Albion", "Borough", "Casuals", "Dynamo"]
            .iter()
            .map(|n| team(n))
            .collect();

        let mut league = League {
            id: Uuid::new_v4(),
            name: "City League".to_string(),
            city: "Bristol".to_string(),
            season: "2026".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            status: LeagueStatus::Draft,
            owner_id: owner,
            team_ids: Vec::new(),
        };
        for t in &teams {
            league.add_team(owner, t.id).expect("draft league accepts teams");
        }
        league.lock(owner).expect("lock with 4 teams");

        let mut matches =
            generate_schedule(&league, &[], &ScheduleConfig::default()).expect("schedule");
        assert_eq!(matches.len(), 6);

        // Home team wins round 1, everything else is a 1-1 draw.
        for m in &mut matches {
            m.result = Some(if m.round == 1 {
                Score { home_goals: 2, away_goals: 0 }
            } else {
                Score { home_goals: 1, away_goals: 1 }
            });
        }

        let outcome = compute_standings(&teams, &matches);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.rows.len(), 4);
        for row in &outcome.rows {
            assert_eq!(row.played, 3);
            assert_eq!(row.played, row.won + row.drawn + row.lost);
            assert_eq!(row.points, 3 * row.won + row.drawn);
        }
        // Round 1 winners top the table.
        assert_eq!(outcome.rows[0].won, 1);
        assert_eq!(outcome.rows[0].points, 5);
    }

    #[test]
    fn squad_editor_flows_from_catalog_defaults() {
        let team = team("Albion");
        let captain = team.captain_id;
        let keeper = team.members[1].user_id;

        let mut editor = SquadEditor::load(team, captain, None);
        assert_eq!(editor.formation().id, default_formation(SquadMode::Five).id);
        editor.assign_player("gk", keeper).expect("keeper fits the squad");
        let saved = editor.save().expect("captain saves");
        assert_eq!(saved.assigned_players().count(), 1);
    }
}
