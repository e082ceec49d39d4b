pub mod challenges;
pub mod players;
pub mod rankings;
pub mod tournaments;

use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool};
use crate::errors::ApiResult;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

pub fn db_conn(state: &AppState) -> ApiResult<DbConn> {
    Ok(database::get_connection(&state.pool)?)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
