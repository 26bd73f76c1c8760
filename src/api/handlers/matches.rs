use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, NaiveDateTime};
use std::sync::Arc;

use crate::api::models::{MatchResponse, RecordMatchRequest};
use crate::database::{self, models::MatchType};
use crate::services::recorder::{self, RecordRequest};
use super::AppState;

pub async fn get_matches(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::matches::list_all(&mut conn) {
        Ok(matches) => {
            let items: Vec<MatchResponse> = matches.into_iter().map(MatchResponse::from).collect();
            Json(items).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn post_match(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordMatchRequest>,
) -> impl IntoResponse {
    let match_type = match req.match_type.as_deref() {
        None => MatchType::Ranked,
        Some(s) => match MatchType::parse(s) {
            Some(t) => t,
            None => {
                return (StatusCode::BAD_REQUEST, format!("Unknown match type: {}", s))
                    .into_response()
            }
        },
    };

    let date = match req.date.as_deref().map(parse_match_date) {
        None => None,
        Some(Ok(date)) => Some(date),
        Some(Err(_)) => {
            return (StatusCode::BAD_REQUEST, "Unparseable match date").into_response()
        }
    };

    let record = RecordRequest {
        player1_id: req.player1_id,
        player2_id: req.player2_id,
        winner_id: req.winner_id,
        winner_score: req.winner_score,
        loser_score: req.loser_score,
        match_type,
        date,
    };

    if let Err(e) = recorder::validate_request(&record) {
        return (StatusCode::BAD_REQUEST, format!("Invalid match: {}", e)).into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match recorder::record_match(&mut conn, &record) {
        Ok(saved) => (StatusCode::CREATED, Json(MatchResponse::from(saved))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Record Error: {}", e))
            .into_response(),
    }
}

fn parse_match_date(date_str: &str) -> Result<NaiveDateTime, ()> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    Err(())
}
