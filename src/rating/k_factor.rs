/// Players with fewer matches than this get the provisional K regardless
/// of rating, so new ratings converge quickly.
const PROVISIONAL_MATCHES: i32 = 30;
const PROVISIONAL_K: i32 = 40;

const ELITE_RATING: i32 = 2400;
const ELITE_K: i32 = 16;

const HIGH_RATING: i32 = 2100;
const HIGH_K: i32 = 24;

const STANDARD_K: i32 = 32;

pub fn k_factor(elo: i32, matches_played: i32) -> i32 {
    if matches_played < PROVISIONAL_MATCHES {
        return PROVISIONAL_K;
    }

    if elo >= ELITE_RATING {
        return ELITE_K;
    }
    if elo >= HIGH_RATING {
        return HIGH_K;
    }

    STANDARD_K
}

/// The whole match uses the larger of the two participants' K-factors, so
/// a provisional player facing a veteran still converges quickly.
pub fn match_k_factor(
    winner_elo: i32,
    winner_matches: i32,
    loser_elo: i32,
    loser_matches: i32,
) -> i32 {
    k_factor(winner_elo, winner_matches).max(k_factor(loser_elo, loser_matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_players_are_provisional_at_any_rating() {
        assert_eq!(k_factor(1200, 0), 40);
        assert_eq!(k_factor(2500, 29), 40);
    }

    #[test]
    fn established_players_scale_down_with_rating() {
        assert_eq!(k_factor(2450, 50), 16);
        assert_eq!(k_factor(2400, 30), 16);
        assert_eq!(k_factor(2100, 100), 24);
        assert_eq!(k_factor(2099, 100), 32);
        assert_eq!(k_factor(1200, 30), 32);
    }

    #[test]
    fn match_uses_larger_of_both_k_factors() {
        // Veteran at 2450 (K=16) against a brand new player (K=40).
        assert_eq!(match_k_factor(2450, 50, 1200, 0), 40);
        assert_eq!(match_k_factor(1200, 0, 2450, 50), 40);
        // Two established mid-rating players.
        assert_eq!(match_k_factor(1500, 40, 1600, 80), 32);
    }
}
