use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::services::reconciler;
use super::AppState;

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.config.server.admin_token);
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        == Some(expected.as_str())
}

pub async fn admin_sync(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match reconciler::sync_player_stats(&mut conn) {
        Ok(()) => (StatusCode::OK, "Player stats synced").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Sync failed: {}", e))
            .into_response(),
    }
}

pub async fn admin_rankings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match reconciler::recalculate_rankings(&mut conn) {
        Ok(()) => (StatusCode::OK, "Rankings recalculated").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Recalculation failed: {}", e))
            .into_response(),
    }
}

pub async fn admin_reset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match reconciler::reset_all_players(&mut conn, &state.config.rating) {
        Ok(()) => (StatusCode::OK, "All players reset").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Reset failed: {}", e))
            .into_response(),
    }
}

pub async fn admin_new_season(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match reconciler::start_new_season(&mut conn, &state.config.rating) {
        Ok(()) => (StatusCode::OK, "New season started").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Season start failed: {}", e))
            .into_response(),
    }
}
