use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::handlers::{AppState, db_conn};
use crate::api::models::{
    ChallengeResponse, ExecutionParams, ExecutionResponse, FibonacciChallengeRequest,
    PalindromeChallengeRequest, SortingChallengeRequest,
};
use crate::errors::ApiError;
use crate::services::challenges;

pub async fn execute_fibonacci(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FibonacciChallengeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let outcome = challenges::execute_fibonacci(
        &mut conn,
        &state.config.challenge,
        body.player_id,
        body.number,
        body.tournament_id,
    )?;
    Ok((StatusCode::CREATED, Json(ChallengeResponse::from(outcome))))
}

pub async fn execute_palindrome(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PalindromeChallengeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let outcome = challenges::execute_palindrome(
        &mut conn,
        &state.config.challenge,
        body.player_id,
        &body.input,
        body.tournament_id,
    )?;
    Ok((StatusCode::CREATED, Json(ChallengeResponse::from(outcome))))
}

pub async fn execute_sorting(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortingChallengeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = db_conn(&state)?;
    let outcome = challenges::execute_sorting(
        &mut conn,
        &state.config.challenge,
        body.player_id,
        &body.numbers,
        body.tournament_id,
    )?;
    Ok((StatusCode::CREATED, Json(ChallengeResponse::from(outcome))))
}

pub async fn list_executions(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
    Query(params): Query<ExecutionParams>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = db_conn(&state)?;
    let rows = match params.tournament_id {
        Some(tournament_id) => {
            challenges::get_player_tournament_executions(&conn, player_id, tournament_id)?
        }
        None => challenges::get_player_executions(&conn, player_id)?,
    };

    let executions: Vec<ExecutionResponse> = rows.into_iter().map(ExecutionResponse::from).collect();
    Ok(Json(executions))
}
