use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{CreateLocalRequest, LocalResponse};
use crate::database;
use super::AppState;

pub async fn get_locals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::locals::list_all(&mut conn) {
        Ok(locals) => {
            let items: Vec<LocalResponse> = locals.into_iter().map(LocalResponse::from).collect();
            Json(items).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn create_local(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLocalRequest>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Local name must not be empty").into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::locals::insert_local(
        &mut conn,
        req.name.trim(),
        &req.location,
        req.description.as_deref(),
    ) {
        Ok(local) => (StatusCode::CREATED, Json(LocalResponse::from(local))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Insert Error: {}", e))
            .into_response(),
    }
}
