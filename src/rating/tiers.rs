use serde::{Deserialize, Serialize};

/// Display tier derived from rating. Bands are 200 points wide with an
/// 800 floor; everything below that is Wood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Wood,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

/// Inclusive lower bound per tier, highest first. The table is the single
/// place boundaries live; swap the entries to change the scheme.
pub const TIER_FLOORS: [(i32, Tier); 9] = [
    (2400, Tier::Challenger),
    (2200, Tier::Grandmaster),
    (2000, Tier::Master),
    (1800, Tier::Diamond),
    (1600, Tier::Platinum),
    (1400, Tier::Gold),
    (1200, Tier::Silver),
    (1000, Tier::Bronze),
    (800, Tier::Iron),
];

pub fn tier_for_elo(elo: i32) -> Tier {
    TIER_FLOORS
        .iter()
        .find(|(floor, _)| elo >= *floor)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::Wood)
}

impl Tier {
    pub fn as_str(&self) -> &str {
        match self {
            Tier::Wood => "wood",
            Tier::Iron => "iron",
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Diamond => "diamond",
            Tier::Master => "master",
            Tier::Grandmaster => "grandmaster",
            Tier::Challenger => "challenger",
        }
    }
}
