use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::handlers::{AppState, db_conn};
use crate::api::models::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest};
use crate::errors::ApiError;
use crate::services::players;

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let player = players::create(&mut conn, &body.name)?;
    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))))
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let player = players::get_by_id(&conn, id)?;
    Ok(Json(PlayerResponse::from(player)))
}

pub async fn get_player_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let player = players::get_by_name(&conn, &name)?;
    Ok(Json(PlayerResponse::from(player)))
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let player = players::update(&mut conn, id, &body.name)?;
    Ok(Json(PlayerResponse::from(player)))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    players::delete_by_id(&mut conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}
