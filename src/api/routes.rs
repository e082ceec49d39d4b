use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{AppState, challenges, health, players, rankings, tournaments};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/players", post(players::create_player))
        .route(
            "/api/players/:id",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .route("/api/players/by-name/:name", get(players::get_player_by_name))
        .route("/api/tournaments", post(tournaments::create_tournament))
        .route("/api/tournaments/:id", get(tournaments::get_tournament))
        .route("/api/tournaments/:id/finish", post(tournaments::finish_tournament))
        .route("/api/tournaments/:id/players", get(tournaments::list_players))
        .route(
            "/api/tournaments/:id/players/:player_id",
            post(tournaments::add_player).delete(tournaments::remove_player),
        )
        .route("/api/challenges/fibonacci", post(challenges::execute_fibonacci))
        .route("/api/challenges/palindrome", post(challenges::execute_palindrome))
        .route("/api/challenges/sorting", post(challenges::execute_sorting))
        .route(
            "/api/challenges/executions/:player_id",
            get(challenges::list_executions),
        )
        .route("/api/rankings/global", get(rankings::get_global_rankings))
        .route(
            "/api/rankings/tournament/:id",
            get(rankings::get_tournament_rankings),
        )
        .route("/api/rankings/player/:id", get(rankings::get_player_summary))
        .with_state(state)
}
