use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::{admin_new_season, admin_rankings, admin_reset, admin_sync},
    archetypes::{create_archetype, get_archetypes},
    locals::{create_local, get_locals},
    matches::{get_matches, post_match},
    players::{create_player, get_player_detail, get_players},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players).post(create_player))
        .route("/api/players/:id", get(get_player_detail))
        .route("/api/matches", get(get_matches).post(post_match))
        .route("/api/locals", get(get_locals).post(create_local))
        .route("/api/archetypes", get(get_archetypes).post(create_archetype))
        .route("/api/admin/sync", post(admin_sync))
        .route("/api/admin/rankings", post(admin_rankings))
        .route("/api/admin/reset", post(admin_reset))
        .route("/api/admin/new-season", post(admin_new_season))
        .with_state(state)
}
