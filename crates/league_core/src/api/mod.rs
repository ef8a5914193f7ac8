pub mod json_api;

pub use json_api::{
    add_league_team_json, generate_schedule_json, get_squad_json, get_standings_json,
    lock_league_json, update_squad_json, AddLeagueTeamRequest, GenerateScheduleRequest,
    GenerateScheduleResponse, GetSquadRequest, GetSquadResponse, GetStandingsRequest,
    GetStandingsResponse, LeagueResponse, LockLeagueRequest, UpdateSquadRequest,
    UpdateSquadResponse,
};
