pub mod elo;
pub mod k_factor;
pub mod tiers;

pub use elo::{calculate_elo, expected_score, EloCalculation};
pub use k_factor::{k_factor, match_k_factor};
pub use tiers::{tier_for_elo, Tier};
