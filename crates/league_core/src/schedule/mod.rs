//! Round-robin fixture generation.
//!
//! Standard circle method: fix the first team, rotate the rest through n-1
//! rounds, pair position i with position n-1-i. An odd team count gets a
//! synthetic bye slot whose pairings are dropped. The output is fully
//! deterministic for a given team ordering and configuration; there is no
//! randomness anywhere in the scheduler.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::models::{League, LeagueStatus, Match, TeamId};

/// How many times each pair of teams meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legs {
    Single,
    Double,
}

impl Legs {
    pub fn count(&self) -> u32 {
        match self {
            Legs::Single => 1,
            Legs::Double => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub legs: Legs,
    /// Days between consecutive rounds.
    pub round_interval_days: i64,
    /// Kickoff time applied to every fixture, interpreted as UTC.
    pub kickoff: NaiveTime,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            legs: Legs::Single,
            round_interval_days: 7,
            kickoff: NaiveTime::from_hms_opt(10, 0, 0).expect("valid kickoff time"),
        }
    }
}

/// Generate the complete fixture list for a locked league.
///
/// `existing` is the league's current match list; any row at all means a
/// schedule was generated before and the call is rejected, since running the
/// generator twice would duplicate every fixture.
pub fn generate_schedule(
    league: &League,
    existing: &[Match],
    config: &ScheduleConfig,
) -> Result<Vec<Match>> {
    if league.status != LeagueStatus::Active {
        return Err(LeagueError::InvalidState(format!(
            "schedule generation requires an active league, {} is {:?}",
            league.name, league.status
        )));
    }
    if existing.iter().any(|m| m.league_id == league.id) {
        return Err(LeagueError::ScheduleAlreadyExists(league.id));
    }
    if league.team_ids.len() < 2 {
        return Err(LeagueError::InvalidTeamCount { found: league.team_ids.len() });
    }

    // None is the bye slot; a pairing touching it means that team rests.
    let mut ring: Vec<Option<TeamId>> = league.team_ids.iter().copied().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None);
    }
    let n = ring.len();
    let rounds_per_leg = (n - 1) as u32;

    let mut first_leg: Vec<(u32, TeamId, TeamId)> = Vec::with_capacity(n * (n - 1) / 2);
    for r in 0..rounds_per_leg {
        for i in 0..n / 2 {
            let (Some(a), Some(b)) = (ring[i], ring[n - 1 - i]) else {
                continue;
            };
            // Home/away alternates by round parity. Exact venue balance is
            // not guaranteed within a single leg; a double round-robin
            // equalizes it by construction.
            let (home, away) = if r % 2 == 0 { (a, b) } else { (b, a) };
            first_leg.push((r + 1, home, away));
        }
        ring[1..].rotate_right(1);
    }

    let mut matches = Vec::with_capacity(first_leg.len() * config.legs.count() as usize);
    for &(round, home, away) in &first_leg {
        matches.push(build_match(league, round, home, away, config));
    }
    if config.legs == Legs::Double {
        // Second leg: same pairings, reversed venues, continued numbering.
        for &(round, home, away) in &first_leg {
            matches.push(build_match(league, rounds_per_leg + round, away, home, config));
        }
    }

    log::info!(
        "generated {} fixtures over {} rounds for league {}",
        matches.len(),
        rounds_per_leg * config.legs.count(),
        league.name
    );
    Ok(matches)
}

fn build_match(
    league: &League,
    round: u32,
    home: TeamId,
    away: TeamId,
    config: &ScheduleConfig,
) -> Match {
    let offset = TimeDelta::days(config.round_interval_days * (round as i64 - 1));
    let kickoff = (league.start_date + offset)
        .and_time(config.kickoff)
        .and_utc();
    Match {
        id: Uuid::new_v4(),
        league_id: league.id,
        home_team_id: home,
        away_team_id: away,
        round,
        scheduled_at: Some(kickoff),
        result: None,
    }
}

/// Highest round number present in a match list (0 when empty).
pub fn rounds_in_schedule(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.round).max().unwrap_or(0)
}
