#[derive(Debug, Clone)]
pub struct RatingSettings {
    /// Rating assigned at registration and after a season reset.
    pub starting_elo: i32,
    /// How many matches a player profile response includes.
    pub recent_matches_limit: usize,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            starting_elo: 1200,
            recent_matches_limit: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub admin_token: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "secret".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            server: ServerSettings::default(),
        }
    }
}
