/// Flat bonus awarded for a 2-0 sweep, as a fraction of K.
const DOMINANT_WIN_RATE: f64 = 0.15;

/// Bonus per win in the winner's entering streak, as a fraction of K.
/// The streak stops counting past `STREAK_BONUS_CAP` games.
const STREAK_BONUS_PER_WIN: f64 = 0.05;
const STREAK_BONUS_CAP: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct EloCalculation {
    pub new_winner_elo: i32,
    pub new_loser_elo: i32,
    /// Total delta awarded to the winner, bonuses included.
    pub elo_change: i32,
    pub dominant_win_bonus: i32,
    pub streak_bonus: i32,
}

/// Logistic expected score for `rating` against `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / 400.0))
}

/// Computes the rating update for one completed match.
///
/// The winner takes the base expected-score gain plus the dominant-win and
/// streak bonuses; the loser takes only the base expected-score loss.
/// `winner_streak` is the winner's streak entering the match; a negative
/// value (losing streak) earns no bonus.
pub fn calculate_elo(
    winner_elo: i32,
    loser_elo: i32,
    k_factor: i32,
    winner_score: i32,
    loser_score: i32,
    winner_streak: i32,
) -> EloCalculation {
    let k = k_factor as f64;

    let expected_winner = expected_score(winner_elo, loser_elo);
    let expected_loser = expected_score(loser_elo, winner_elo);

    let base_winner_change = k * (1.0 - expected_winner);
    let base_loser_change = k * (0.0 - expected_loser);

    let dominant_win_bonus = if winner_score == 2 && loser_score == 0 {
        (k * DOMINANT_WIN_RATE).round() as i32
    } else {
        0
    };

    let effective_streak = winner_streak.clamp(0, STREAK_BONUS_CAP);
    let streak_bonus = (k * effective_streak as f64 * STREAK_BONUS_PER_WIN).round() as i32;

    let elo_change =
        (base_winner_change + (dominant_win_bonus + streak_bonus) as f64).round() as i32;

    EloCalculation {
        new_winner_elo: winner_elo + elo_change,
        new_loser_elo: (loser_elo as f64 + base_loser_change).round() as i32,
        elo_change,
        dominant_win_bonus,
        streak_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_scores_sum_to_one() {
        for (a, b) in [(1200, 1200), (1000, 1400), (2450, 800), (1337, 1336)] {
            let sum = expected_score(a, b) + expected_score(b, a);
            assert!((sum - 1.0).abs() < 1e-9, "{a} vs {b} summed to {sum}");
        }
    }

    #[test]
    fn dominant_win_between_new_equals() {
        // Equal 1200 players, K=40, 2-0 sweep, no streak.
        // Base 20, dominant bonus round(40 * 0.15) = 6, total 26.
        let calc = calculate_elo(1200, 1200, 40, 2, 0, 0);
        assert_eq!(calc.dominant_win_bonus, 6);
        assert_eq!(calc.streak_bonus, 0);
        assert_eq!(calc.elo_change, 26);
        assert_eq!(calc.new_winner_elo, 1226);
        assert_eq!(calc.new_loser_elo, 1180);
    }

    #[test]
    fn capped_streak_bonus_on_close_win() {
        // 10-win streak, 2-1 result: no sweep bonus, streak bonus at the
        // 50% cap. Base 20 + round(40 * 0.5) = 40 total.
        let calc = calculate_elo(1200, 1200, 40, 2, 1, 10);
        assert_eq!(calc.dominant_win_bonus, 0);
        assert_eq!(calc.streak_bonus, 20);
        assert_eq!(calc.elo_change, 40);
        assert_eq!(calc.new_winner_elo, 1240);
    }

    #[test]
    fn close_win_earns_no_dominant_bonus() {
        let calc = calculate_elo(1400, 1300, 32, 2, 1, 0);
        assert_eq!(calc.dominant_win_bonus, 0);
    }

    #[test]
    fn losing_streak_earns_no_bonus() {
        let calc = calculate_elo(1200, 1200, 40, 2, 1, -4);
        assert_eq!(calc.streak_bonus, 0);
    }

    #[test]
    fn streak_bonus_grows_then_plateaus() {
        let bonus_at = |streak| calculate_elo(1200, 1200, 40, 2, 1, streak).streak_bonus;
        let mut previous = bonus_at(0);
        for streak in 1..=10 {
            let bonus = bonus_at(streak);
            assert!(bonus >= previous, "bonus shrank at streak {streak}");
            previous = bonus;
        }
        assert_eq!(bonus_at(10), bonus_at(15));
    }

    #[test]
    fn loser_is_not_charged_for_bonuses() {
        let plain = calculate_elo(1200, 1200, 40, 2, 1, 0);
        let boosted = calculate_elo(1200, 1200, 40, 2, 0, 10);
        assert_eq!(plain.new_loser_elo, boosted.new_loser_elo);
    }

    #[test]
    fn underdog_gains_more_than_favorite_would() {
        let underdog = calculate_elo(1000, 1400, 32, 2, 1, 0);
        let favorite = calculate_elo(1400, 1000, 32, 2, 1, 0);
        assert!(underdog.elo_change > favorite.elo_change);
    }
}
