use serde::{Deserialize, Serialize};

use crate::database::models::{DeckArchetype, Local, Match, Player};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i32,
    pub user_id: Option<String>,
    pub name: String,
    pub avatar_url: Option<String>,
    pub main_deck: Option<String>,
    pub locals: Vec<i32>,
    pub elo: i32,
    pub peak_elo: i32,
    pub tier: String,
    pub wins: i32,
    pub losses: i32,
    pub total_matches: i32,
    pub win_rate: i32,
    pub streak: i32,
    pub rank: i32,
    pub last_season_elo: Option<i32>,
    pub last_season_peak_elo: Option<i32>,
    pub last_season_rank: Option<i32>,
}

impl From<Player> for PlayerResponse {
    fn from(p: Player) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            avatar_url: p.avatar_url,
            main_deck: p.main_deck,
            locals: p.locals,
            elo: p.elo,
            peak_elo: p.peak_elo,
            tier: p.tier,
            wins: p.wins,
            losses: p.losses,
            total_matches: p.total_matches,
            win_rate: p.win_rate,
            streak: p.streak,
            rank: p.rank,
            last_season_elo: p.last_season_elo,
            last_season_peak_elo: p.last_season_peak_elo,
            last_season_rank: p.last_season_rank,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub items: Vec<PlayerResponse>,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailResponse {
    #[serde(flatten)]
    pub player: PlayerResponse,
    pub recent_matches: Vec<MatchResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: i32,
    pub player1_id: i32,
    pub player2_id: i32,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_deck: Option<String>,
    pub player2_deck: Option<String>,
    pub winner_id: i32,
    pub winner_score: i32,
    pub loser_score: i32,
    pub winner_elo: i32,
    pub loser_elo: i32,
    pub elo_change: i32,
    pub dominant_win_bonus: Option<i32>,
    pub streak_bonus: Option<i32>,
    pub date: String,
    pub match_type: String,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            player1_id: m.player1_id,
            player2_id: m.player2_id,
            player1_name: m.player1_name,
            player2_name: m.player2_name,
            player1_deck: m.player1_deck,
            player2_deck: m.player2_deck,
            winner_id: m.winner_id,
            winner_score: m.winner_score,
            loser_score: m.loser_score,
            winner_elo: m.winner_elo,
            loser_elo: m.loser_elo,
            elo_change: m.elo_change,
            dominant_win_bonus: m.dominant_win_bonus,
            streak_bonus: m.streak_bonus,
            date: m.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            match_type: m.match_type.as_str().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
    pub user_id: Option<String>,
    pub avatar_url: Option<String>,
    pub main_deck: Option<String>,
    #[serde(default)]
    pub locals: Vec<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchRequest {
    pub player1_id: i32,
    pub player2_id: i32,
    pub winner_id: i32,
    pub winner_score: i32,
    pub loser_score: i32,
    pub match_type: Option<String>,
    pub date: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
}

impl From<Local> for LocalResponse {
    fn from(l: Local) -> Self {
        Self {
            id: l.id,
            name: l.name,
            location: l.location,
            description: l.description,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocalRequest {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<DeckArchetype> for ArchetypeResponse {
    fn from(a: DeckArchetype) -> Self {
        Self {
            id: a.id,
            name: a.name,
            description: a.description,
            image_url: a.image_url,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArchetypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
