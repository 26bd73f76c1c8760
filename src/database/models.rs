use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i32,
    pub user_id: Option<String>,
    pub name: String,
    pub avatar_url: Option<String>,
    pub main_deck: Option<String>,
    /// Ids of the locals this player attends.
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
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Match {
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
    /// Ratings as they stood before this match.
    pub winner_elo: i32,
    pub loser_elo: i32,
    pub elo_change: i32,
    pub dominant_win_bonus: Option<i32>,
    pub streak_bonus: Option<i32>,
    pub date: NaiveDateTime,
    pub match_type: MatchType,
    pub created_at: Option<NaiveDateTime>,
}

/// Registration payload; counters start zeroed via column defaults.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub user_id: Option<String>,
    pub avatar_url: Option<String>,
    pub main_deck: Option<String>,
    pub locals: Vec<i32>,
    pub elo: i32,
    pub tier: String,
}

/// Insert payload for an immutable match record.
#[derive(Debug, Clone)]
pub struct NewMatch {
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
    pub dominant_win_bonus: i32,
    pub streak_bonus: i32,
    pub date: NaiveDateTime,
    pub match_type: MatchType,
}

/// Category label only; every match counts for rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Ranked,
    Casual,
    Tournament,
}

impl MatchType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ranked" => Some(MatchType::Ranked),
            "casual" => Some(MatchType::Casual),
            "tournament" => Some(MatchType::Tournament),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchType::Ranked => "ranked",
            MatchType::Casual => "casual",
            MatchType::Tournament => "tournament",
        }
    }
}

/// Derived record counters, recomputed from the match log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub wins: i32,
    pub losses: i32,
    pub total_matches: i32,
    pub win_rate: i32,
    pub streak: i32,
}

#[derive(Debug, Clone)]
pub struct Local {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct DeckArchetype {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
