use anyhow::{bail, Result};
use log::{error, info};

use crate::config::settings::RatingSettings;
use crate::database::{self, DbConn};
use crate::database::models::{Match, Player, PlayerStats};
use crate::rating;

/// Integer win percentage, 0 for a player with no history.
pub fn win_rate(wins: i32, total_matches: i32) -> i32 {
    if total_matches == 0 {
        return 0;
    }
    ((wins as f64 / total_matches as f64) * 100.0).round() as i32
}

/// Recomputes one player's record counters from the full match log.
/// Rating fields are untouched; those only move on match recording.
pub fn compute_stats(player_id: i32, matches: &[Match]) -> PlayerStats {
    let mut wins = 0;
    let mut losses = 0;
    let mut own: Vec<&Match> = Vec::new();

    for m in matches {
        if m.player1_id != player_id && m.player2_id != player_id {
            continue;
        }
        own.push(m);
        if m.winner_id == player_id {
            wins += 1;
        } else {
            losses += 1;
        }
    }

    // Most recent first; matches sharing a date fall back to reverse
    // insertion order so the streak walk is deterministic.
    own.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let total_matches = wins + losses;
    PlayerStats {
        wins,
        losses,
        total_matches,
        win_rate: win_rate(wins, total_matches),
        streak: current_streak(player_id, &own),
    }
}

/// Length of the unbroken same-outcome run ending at the most recent
/// match. Positive while winning, negative while losing.
fn current_streak(player_id: i32, recent_first: &[&Match]) -> i32 {
    let mut streak = 0;
    let mut last_was_win: Option<bool> = None;

    for m in recent_first {
        let won = m.winner_id == player_id;
        match last_was_win {
            None => {
                last_was_win = Some(won);
                streak = if won { 1 } else { -1 };
            }
            Some(prev) if prev == won => {
                streak += if won { 1 } else { -1 };
            }
            Some(_) => break,
        }
    }

    streak
}

/// Rank is a pure function of the player set: elo descending, ties broken
/// by lower id. Returns (player_id, rank) pairs.
pub fn assign_ranks(players: &[Player]) -> Vec<(i32, i32)> {
    let mut order: Vec<(i32, i32)> = players.iter().map(|p| (p.id, p.elo)).collect();
    order.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    order
        .into_iter()
        .enumerate()
        .map(|(idx, (id, _))| (id, (idx + 1) as i32))
        .collect()
}

pub fn recalculate_rankings(conn: &mut DbConn) -> Result<()> {
    let players = database::players::list_all(conn)?;
    let ranks = assign_ranks(&players);

    let mut failures = 0usize;
    for (id, rank) in &ranks {
        if let Err(e) = database::players::update_rank(conn, *id, *rank) {
            error!("Rank update failed for player {}: {:?}", id, e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("rank update failed for {} of {} players", failures, ranks.len());
    }
    info!("Recalculated ranks for {} players", ranks.len());
    Ok(())
}

/// Full reconciliation: replays the entire match log and overwrites every
/// player's derived counters, then reassigns ranks. Idempotent, so a
/// partial failure is safe to retry.
pub fn sync_player_stats(conn: &mut DbConn) -> Result<()> {
    let players = database::players::list_all(conn)?;
    let matches = database::matches::list_all(conn)?;
    info!(
        "Syncing stats for {} players from {} matches",
        players.len(),
        matches.len()
    );

    let mut failures = 0usize;
    for player in &players {
        let stats = compute_stats(player.id, &matches);
        if let Err(e) = database::players::update_stats(conn, player.id, &stats) {
            error!("Stat sync failed for player {}: {:?}", player.id, e);
            failures += 1;
        }
    }

    // Ranks are reassigned even when some updates failed; the pass is
    // derive-from-source, so the caller just retries.
    recalculate_rankings(conn)?;

    if failures > 0 {
        bail!("stat sync failed for {} of {} players", failures, players.len());
    }
    Ok(())
}

/// Resets every player to the starting rating, preserving their pre-reset
/// standing in the season-carryover fields.
pub fn reset_all_players(conn: &mut DbConn, settings: &RatingSettings) -> Result<()> {
    let players = database::players::list_all(conn)?;
    let tier = rating::tier_for_elo(settings.starting_elo);
    info!(
        "Resetting {} players to {} elo ({})",
        players.len(),
        settings.starting_elo,
        tier.as_str()
    );

    let mut failures = 0usize;
    for player in &players {
        if let Err(e) =
            database::players::reset_for_new_season(conn, player.id, settings.starting_elo, tier.as_str())
        {
            error!("Season reset failed for player {}: {:?}", player.id, e);
            failures += 1;
        }
    }

    recalculate_rankings(conn)?;

    if failures > 0 {
        bail!("season reset failed for {} of {} players", failures, players.len());
    }
    Ok(())
}

/// Same routine as [`reset_all_players`]; the two admin entry points are
/// intentionally aliases.
pub fn start_new_season(conn: &mut DbConn, settings: &RatingSettings) -> Result<()> {
    info!("Starting new season");
    reset_all_players(conn, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::models::{MatchType, NewMatch, NewPlayer};
    use crate::database::setup::init_database;
    use crate::database::{matches, players, DbPool};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap()
    }

    fn fake_match(id: i32, p1: i32, p2: i32, winner: i32, date: NaiveDateTime) -> Match {
        Match {
            id,
            player1_id: p1,
            player2_id: p2,
            player1_name: format!("p{p1}"),
            player2_name: format!("p{p2}"),
            player1_deck: None,
            player2_deck: None,
            winner_id: winner,
            winner_score: 2,
            loser_score: 1,
            winner_elo: 1200,
            loser_elo: 1200,
            elo_change: 16,
            dominant_win_bonus: Some(0),
            streak_bonus: Some(0),
            date,
            match_type: MatchType::Ranked,
            created_at: None,
        }
    }

    fn fake_player(id: i32, elo: i32) -> Player {
        Player {
            id,
            user_id: None,
            name: format!("p{id}"),
            avatar_url: None,
            main_deck: None,
            locals: vec![],
            elo,
            peak_elo: elo,
            tier: "silver".to_string(),
            wins: 0,
            losses: 0,
            total_matches: 0,
            win_rate: 0,
            streak: 0,
            rank: 0,
            last_season_elo: None,
            last_season_peak_elo: None,
            last_season_rank: None,
            created_at: None,
        }
    }

    #[test]
    fn win_rate_rounds_to_whole_percent() {
        assert_eq!(win_rate(0, 0), 0);
        assert_eq!(win_rate(7, 10), 70);
        assert_eq!(win_rate(1, 3), 33);
        assert_eq!(win_rate(2, 3), 67);
    }

    #[test]
    fn stats_from_ten_match_log() {
        // Player 1 wins 7 of 10.
        let mut log = Vec::new();
        for i in 0..10 {
            let winner = if i < 7 { 1 } else { 2 };
            log.push(fake_match(i + 1, 1, 2, winner, day((i + 1) as u32)));
        }

        let stats = compute_stats(1, &log);
        assert_eq!(stats.wins, 7);
        assert_eq!(stats.losses, 3);
        assert_eq!(stats.total_matches, 10);
        assert_eq!(stats.win_rate, 70);
        // The three most recent matches are losses.
        assert_eq!(stats.streak, -3);
    }

    #[test]
    fn streak_stops_at_first_outcome_change() {
        let log = vec![
            fake_match(1, 1, 2, 2, day(1)),
            fake_match(2, 1, 2, 1, day(2)),
            fake_match(3, 1, 2, 1, day(3)),
        ];
        assert_eq!(compute_stats(1, &log).streak, 2);
        assert_eq!(compute_stats(2, &log).streak, -2);
    }

    #[test]
    fn same_date_matches_use_insertion_order() {
        // Both on the same evening; the later insert (higher id) is the
        // most recent result.
        let log = vec![
            fake_match(1, 1, 2, 1, day(5)),
            fake_match(2, 1, 2, 2, day(5)),
        ];
        assert_eq!(compute_stats(1, &log).streak, -1);
    }

    #[test]
    fn matches_against_unknown_players_are_ignored() {
        let log = vec![fake_match(1, 7, 8, 7, day(1))];
        let stats = compute_stats(1, &log);
        assert_eq!(stats, PlayerStats { wins: 0, losses: 0, total_matches: 0, win_rate: 0, streak: 0 });
    }

    #[test]
    fn ranks_follow_elo_with_id_tie_break() {
        let players = vec![fake_player(1, 1300), fake_player(2, 1500), fake_player(3, 1300)];
        let ranks = assign_ranks(&players);
        assert_eq!(ranks, vec![(2, 1), (1, 2), (3, 3)]);
    }

    fn seeded_pool() -> DbPool {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();

        for name in ["alice", "bob"] {
            players::insert_player(
                &mut conn,
                &NewPlayer {
                    name: name.to_string(),
                    user_id: None,
                    avatar_url: None,
                    main_deck: None,
                    locals: vec![],
                    elo: 1200,
                    tier: "silver".to_string(),
                },
            )
            .unwrap();
        }

        for (i, winner) in [1, 1, 2].iter().enumerate() {
            matches::insert_match(
                &mut conn,
                &NewMatch {
                    player1_id: 1,
                    player2_id: 2,
                    player1_name: "alice".to_string(),
                    player2_name: "bob".to_string(),
                    player1_deck: None,
                    player2_deck: None,
                    winner_id: *winner,
                    winner_score: 2,
                    loser_score: 1,
                    winner_elo: 1200,
                    loser_elo: 1200,
                    elo_change: 20,
                    dominant_win_bonus: 0,
                    streak_bonus: 0,
                    date: day((i + 1) as u32),
                    match_type: MatchType::Ranked,
                },
            )
            .unwrap();
        }

        drop(conn);
        pool
    }

    #[test]
    fn sync_is_idempotent() {
        let pool = seeded_pool();
        let mut conn = get_connection(&pool).unwrap();

        sync_player_stats(&mut conn).unwrap();
        let first_pass = players::list_all(&mut conn).unwrap();

        sync_player_stats(&mut conn).unwrap();
        let second_pass = players::list_all(&mut conn).unwrap();

        for (a, b) in first_pass.iter().zip(&second_pass) {
            assert_eq!((a.wins, a.losses, a.total_matches, a.win_rate, a.streak, a.rank),
                       (b.wins, b.losses, b.total_matches, b.win_rate, b.streak, b.rank));
        }

        let alice = &first_pass[0];
        assert_eq!(alice.wins, 2);
        assert_eq!(alice.losses, 1);
        assert_eq!(alice.total_matches, 3);
        assert_eq!(alice.win_rate, 67);
        assert_eq!(alice.streak, -1);
        assert_eq!(alice.wins + alice.losses, alice.total_matches);
    }

    #[test]
    fn reset_preserves_prior_standing() {
        let pool = seeded_pool();
        let mut conn = get_connection(&pool).unwrap();

        // Give alice a real standing first.
        players::apply_match_result(&mut conn, 1, 1340, "gold", 5, 1, 6, 83, 3, 1360).unwrap();
        recalculate_rankings(&mut conn).unwrap();
        let before = players::find_by_id(&mut conn, 1).unwrap().unwrap();

        let settings = RatingSettings::default();
        reset_all_players(&mut conn, &settings).unwrap();

        let after = players::find_by_id(&mut conn, 1).unwrap().unwrap();
        assert_eq!(after.last_season_elo, Some(before.elo));
        assert_eq!(after.last_season_peak_elo, Some(before.peak_elo));
        assert_eq!(after.last_season_rank, Some(before.rank));
        assert_eq!(after.elo, 1200);
        assert_eq!(after.peak_elo, 1200);
        assert_eq!(after.tier, "silver");
        assert_eq!(after.wins, 0);
        assert_eq!(after.losses, 0);
        assert_eq!(after.total_matches, 0);
        assert_eq!(after.win_rate, 0);
        assert_eq!(after.streak, 0);
        // Everyone tied at 1200; the id tie-break keeps ranks deterministic.
        assert_eq!(after.rank, 1);
    }
}
