use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rusqlite::Connection;

use crate::api::handlers::{AppState, db_conn};
use crate::api::models::{CreateTournamentRequest, PlayerResponse, TournamentResponse};
use crate::database::models::Tournament;
use crate::errors::{ApiError, ApiResult};
use crate::services::tournaments;

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTournamentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let tournament = tournaments::create(&mut conn, &body.name, body.date)?;
    let response = with_roster(&conn, tournament)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let tournament = tournaments::get_by_id(&conn, id)?;
    Ok(Json(with_roster(&conn, tournament)?))
}

pub async fn add_player(
    State(state): State<Arc<AppState>>,
    Path((id, player_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let tournament = tournaments::add_player(&mut conn, id, player_id)?;
    Ok(Json(with_roster(&conn, tournament)?))
}

pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path((id, player_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let tournament = tournaments::remove_player(&mut conn, id, player_id)?;
    Ok(Json(with_roster(&conn, tournament)?))
}

pub async fn finish_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let tournament = tournaments::finish(&mut conn, id)?;
    Ok(Json(with_roster(&conn, tournament)?))
}

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let roster: Vec<PlayerResponse> = tournaments::list_players(&conn, id)?
        .into_iter()
        .map(PlayerResponse::from)
        .collect();
    Ok(Json(roster))
}

fn with_roster(conn: &Connection, tournament: Tournament) -> ApiResult<TournamentResponse> {
    let roster = tournaments::list_players(conn, tournament.id)?;
    Ok(TournamentResponse::new(tournament, roster))
}
