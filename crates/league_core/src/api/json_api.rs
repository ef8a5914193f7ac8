//! JSON boundary for the league core.
//!
//! The transport layer (HTTP routes, jobs) does not link against the domain
//! types directly; it passes JSON strings through these entry points and
//! persists whatever comes back. Each request carries a `schema_version` so
//! incompatible callers fail loudly instead of misparsing.
//!
//! Persistence happens outside: requests carry the current state of the
//! aggregates involved, responses carry the state to write back.

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::models::{League, Match, Squad, Team, TeamId, UserId};
use crate::schedule::{self, ScheduleConfig};
use crate::squad::{SquadEditor, SquadUpdate};
use crate::standings::{self, IntegrityIssue, StandingsRow};
use crate::SCHEMA_VERSION;

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(LeagueError::InvalidReference(format!(
            "unsupported schema version {version}, expected {SCHEMA_VERSION}"
        )));
    }
    Ok(())
}

// ============================================================================
// League management
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LockLeagueRequest {
    pub schema_version: u8,
    pub actor: UserId,
    pub league: League,
}

#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub schema_version: u8,
    pub league: League,
}

/// Lock a draft league, freezing its team list. Draft -> Active.
pub fn lock_league_json(request_json: &str) -> Result<String> {
    let request: LockLeagueRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let mut league = request.league;
    league.lock(request.actor)?;

    let response = LeagueResponse { schema_version: SCHEMA_VERSION, league };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct AddLeagueTeamRequest {
    pub schema_version: u8,
    pub actor: UserId,
    pub league: League,
    pub team_id: TeamId,
}

/// Enter a team into a draft league.
pub fn add_league_team_json(request_json: &str) -> Result<String> {
    let request: AddLeagueTeamRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let mut league = request.league;
    league.add_team(request.actor, request.team_id)?;

    let response = LeagueResponse { schema_version: SCHEMA_VERSION, league };
    Ok(serde_json::to_string(&response)?)
}

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateScheduleRequest {
    pub schema_version: u8,
    pub actor: UserId,
    pub league: League,
    /// Current match rows of the league; used for the generate-once guard.
    #[serde(default)]
    pub existing_matches: Vec<Match>,
    #[serde(default)]
    pub config: Option<ScheduleConfig>,
}

#[derive(Debug, Serialize)]
pub struct GenerateScheduleResponse {
    pub schema_version: u8,
    pub matches: Vec<Match>,
}

/// Generate the round-robin schedule for an active league. Owner only.
pub fn generate_schedule_json(request_json: &str) -> Result<String> {
    let request: GenerateScheduleRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    if request.actor != request.league.owner_id {
        return Err(LeagueError::Forbidden(format!(
            "only the owner of league {} may generate its schedule",
            request.league.name
        )));
    }

    let config = request.config.unwrap_or_default();
    let matches = schedule::generate_schedule(&request.league, &request.existing_matches, &config)?;

    let response = GenerateScheduleResponse { schema_version: SCHEMA_VERSION, matches };
    Ok(serde_json::to_string(&response)?)
}

// ============================================================================
// Standings
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetStandingsRequest {
    pub schema_version: u8,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
}

#[derive(Debug, Serialize)]
pub struct GetStandingsResponse {
    pub schema_version: u8,
    pub rows: Vec<StandingsRow>,
    pub issues: Vec<IntegrityIssue>,
}

/// Recompute the points table. Read-only; call as often as needed.
pub fn get_standings_json(request_json: &str) -> Result<String> {
    let request: GetStandingsRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let outcome = standings::compute_standings(&request.teams, &request.matches);

    let response = GetStandingsResponse {
        schema_version: SCHEMA_VERSION,
        rows: outcome.rows,
        issues: outcome.issues,
    };
    Ok(serde_json::to_string(&response)?)
}

// ============================================================================
// Squads
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateSquadRequest {
    pub schema_version: u8,
    pub actor: UserId,
    pub team: Team,
    pub update: SquadUpdate,
}

#[derive(Debug, Serialize)]
pub struct UpdateSquadResponse {
    pub schema_version: u8,
    pub squad: Squad,
}

/// Validate and apply a squad update. Captain only.
pub fn update_squad_json(request_json: &str) -> Result<String> {
    let request: UpdateSquadRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    if !request.team.is_captain(request.actor) {
        return Err(LeagueError::Forbidden(format!(
            "only the captain of team {} may update its squad",
            request.team.name
        )));
    }

    let squad = request.update.into_squad(&request.team)?;

    let response = UpdateSquadResponse { schema_version: SCHEMA_VERSION, squad };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct GetSquadRequest {
    pub schema_version: u8,
    pub team: Team,
    /// The persisted squad, if any was ever saved.
    #[serde(default)]
    pub squad: Option<Squad>,
}

#[derive(Debug, Serialize)]
pub struct GetSquadResponse {
    pub schema_version: u8,
    /// False when no squad was ever saved; `squad` is then the empty default
    /// layout the editor starts from.
    pub saved: bool,
    pub squad: Squad,
}

/// Fetch a team's squad for display, normalizing stale formation references
/// the same way the editor does on load.
pub fn get_squad_json(request_json: &str) -> Result<String> {
    let request: GetSquadRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let saved = request.squad.is_some();
    // Reuse the editor's load path so fallback handling stays in one place.
    let viewer = request.team.captain_id;
    let editor = SquadEditor::load(request.team, viewer, request.squad);

    let response = GetSquadResponse {
        schema_version: SCHEMA_VERSION,
        saved,
        squad: editor.current_squad(),
    };
    Ok(serde_json::to_string(&response)?)
}
