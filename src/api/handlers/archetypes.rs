use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{ArchetypeResponse, CreateArchetypeRequest};
use crate::database;
use super::AppState;

pub async fn get_archetypes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::archetypes::list_all(&mut conn) {
        Ok(archetypes) => {
            let items: Vec<ArchetypeResponse> =
                archetypes.into_iter().map(ArchetypeResponse::from).collect();
            Json(items).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn create_archetype(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateArchetypeRequest>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Archetype name must not be empty").into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::archetypes::insert_archetype(
        &mut conn,
        req.name.trim(),
        req.description.as_deref(),
        req.image_url.as_deref(),
    ) {
        Ok(archetype) => {
            (StatusCode::CREATED, Json(ArchetypeResponse::from(archetype))).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Insert Error: {}", e))
            .into_response(),
    }
}
