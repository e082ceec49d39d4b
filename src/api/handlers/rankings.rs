use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::api::handlers::{AppState, db_conn};
use crate::api::models::{PlayerRankingSummaryResponse, RankingResponse};
use crate::errors::ApiError;
use crate::services::rankings;

pub async fn get_global_rankings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let rows: Vec<RankingResponse> = rankings::get_global(&conn)?
        .into_iter()
        .map(RankingResponse::from)
        .collect();
    Ok(Json(rows))
}

pub async fn get_tournament_rankings(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let rows: Vec<RankingResponse> = rankings::get_for_tournament(&conn, tournament_id)?
        .into_iter()
        .map(RankingResponse::from)
        .collect();
    Ok(Json(rows))
}

pub async fn get_player_summary(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let summary = rankings::get_player_summary(&conn, player_id)?;
    Ok(Json(PlayerRankingSummaryResponse::from(summary)))
}
