use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    CreatePlayerRequest, LeaderboardResponse, MatchResponse, PlayerDetailResponse, PlayerResponse,
};
use crate::database::{self, models::NewPlayer};
use crate::rating;
use super::AppState;

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let mut players = match database::players::list_all(&mut conn) {
        Ok(players) => players,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    // Rank from the live ordering, same tie-break as the reconciler.
    players.sort_by(|a, b| b.elo.cmp(&a.elo).then(a.id.cmp(&b.id)));
    let items: Vec<PlayerResponse> = players
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let mut response = PlayerResponse::from(p);
            response.rank = (i + 1) as i32;
            response
        })
        .collect();

    Json(LeaderboardResponse { total: items.len(), items }).into_response()
}

pub async fn get_player_detail(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let player = match database::players::find_by_id(&mut conn, player_id) {
        Ok(Some(player)) => player,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let limit = state.config.rating.recent_matches_limit;
    let recent_matches = match database::matches::list_for_player(&mut conn, player_id, limit) {
        Ok(matches) => matches.into_iter().map(MatchResponse::from).collect(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    Json(PlayerDetailResponse {
        player: PlayerResponse::from(player),
        recent_matches,
    })
    .into_response()
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePlayerRequest>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Player name must not be empty").into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let starting_elo = state.config.rating.starting_elo;
    let new_player = NewPlayer {
        name: req.name.trim().to_string(),
        user_id: req.user_id,
        avatar_url: req.avatar_url,
        main_deck: req.main_deck,
        locals: req.locals,
        elo: starting_elo,
        tier: rating::tier_for_elo(starting_elo).as_str().to_string(),
    };

    match database::players::insert_player(&mut conn, &new_player) {
        Ok(player) => (StatusCode::CREATED, Json(PlayerResponse::from(player))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Insert Error: {}", e))
            .into_response(),
    }
}
