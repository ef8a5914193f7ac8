//! Standings computation.
//!
//! The match list is the source of truth: every call rebuilds the table from
//! scratch, so entered or corrected results can never drift from the rows
//! shown. Input order does not matter; the output ordering is fully
//! deterministic (points, goal difference, goals for, then team name).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Match, MatchId, Team, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl StandingsRow {
    fn zeroed(team: &Team) -> Self {
        StandingsRow {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
        if scored > conceded {
            self.won += 1;
            self.points += 3;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }
}

/// A played match whose teams are not all in the supplied team list. The
/// match is excluded from the table, but never silently: callers get the
/// full list of exclusions to surface or repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub match_id: MatchId,
    pub unknown_team_id: TeamId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsOutcome {
    pub rows: Vec<StandingsRow>,
    pub issues: Vec<IntegrityIssue>,
}

/// Compute the points table for one league.
///
/// Every team gets a row, including teams yet to play. Only matches with a
/// recorded result contribute; win 3, draw 1, loss 0.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> StandingsOutcome {
    let mut rows: HashMap<TeamId, StandingsRow> =
        teams.iter().map(|t| (t.id, StandingsRow::zeroed(t))).collect();
    let mut issues = Vec::new();

    for m in matches {
        let Some(score) = m.result else {
            continue;
        };

        let mut unknown = Vec::new();
        for side in [m.home_team_id, m.away_team_id] {
            if !rows.contains_key(&side) {
                unknown.push(side);
            }
        }
        if !unknown.is_empty() {
            for team_id in unknown {
                log::warn!(
                    "match {} references team {} which is not in the league; excluding it",
                    m.id,
                    team_id
                );
                issues.push(IntegrityIssue { match_id: m.id, unknown_team_id: team_id });
            }
            continue;
        }

        let (home_goals, away_goals) = (score.home_goals as u32, score.away_goals as u32);
        rows.get_mut(&m.home_team_id)
            .expect("checked above")
            .record(home_goals, away_goals);
        rows.get_mut(&m.away_team_id)
            .expect("checked above")
            .record(away_goals, home_goals);
    }

    let mut rows: Vec<StandingsRow> = rows.into_values().collect();
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    StandingsOutcome { rows, issues }
}
