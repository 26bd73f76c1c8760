use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDateTime, Utc};
use log::info;

use crate::database::{self, DbConn};
use crate::database::models::{Match, MatchType, NewMatch, Player};
use crate::rating;
use crate::services::reconciler;

#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub player1_id: i32,
    pub player2_id: i32,
    pub winner_id: i32,
    pub winner_score: i32,
    pub loser_score: i32,
    pub match_type: MatchType,
    /// Defaults to now when the caller does not supply a date.
    pub date: Option<NaiveDateTime>,
}

/// Caller-mistake checks, run before anything is persisted.
pub fn validate_request(req: &RecordRequest) -> Result<()> {
    if req.player1_id == req.player2_id {
        bail!("a match requires two distinct players");
    }
    if req.winner_id != req.player1_id && req.winner_id != req.player2_id {
        bail!("winner {} is not one of the participants", req.winner_id);
    }
    if req.winner_score < 0 || req.loser_score < 0 {
        bail!("scores must be non-negative");
    }
    if req.winner_score < req.loser_score {
        bail!("winner score must be at least the loser score");
    }
    Ok(())
}

/// Records one completed match: computes the rating update, persists the
/// immutable match record with its audit fields, applies both player
/// updates, and reassigns ranks. Not idempotent; every call records a
/// new match.
pub fn record_match(conn: &mut DbConn, req: &RecordRequest) -> Result<Match> {
    validate_request(req)?;

    let loser_id = if req.winner_id == req.player1_id {
        req.player2_id
    } else {
        req.player1_id
    };
    let winner = load_player(conn, req.winner_id)?;
    let loser = load_player(conn, loser_id)?;

    let k = rating::match_k_factor(winner.elo, winner.total_matches, loser.elo, loser.total_matches);
    let calc = rating::calculate_elo(
        winner.elo,
        loser.elo,
        k,
        req.winner_score,
        req.loser_score,
        winner.streak,
    );

    let (player1, player2) = if req.winner_id == req.player1_id {
        (&winner, &loser)
    } else {
        (&loser, &winner)
    };
    let record = NewMatch {
        player1_id: player1.id,
        player2_id: player2.id,
        player1_name: player1.name.clone(),
        player2_name: player2.name.clone(),
        player1_deck: player1.main_deck.clone(),
        player2_deck: player2.main_deck.clone(),
        winner_id: winner.id,
        winner_score: req.winner_score,
        loser_score: req.loser_score,
        winner_elo: winner.elo,
        loser_elo: loser.elo,
        elo_change: calc.elo_change,
        dominant_win_bonus: calc.dominant_win_bonus,
        streak_bonus: calc.streak_bonus,
        date: req.date.unwrap_or_else(|| Utc::now().naive_utc()),
        match_type: req.match_type,
    };
    let saved = database::matches::insert_match(conn, &record)?;

    apply_winner_update(conn, &winner, calc.new_winner_elo)?;
    apply_loser_update(conn, &loser, calc.new_loser_elo)?;
    reconciler::recalculate_rankings(conn)?;

    info!(
        "Recorded match {}: {} beat {} {}-{} for {:+} elo (k={})",
        saved.id, winner.name, loser.name, req.winner_score, req.loser_score, calc.elo_change, k
    );
    Ok(saved)
}

fn load_player(conn: &mut DbConn, id: i32) -> Result<Player> {
    database::players::find_by_id(conn, id)?
        .ok_or_else(|| anyhow!("player {} not found", id))
}

fn apply_winner_update(conn: &mut DbConn, player: &Player, new_elo: i32) -> Result<()> {
    let wins = player.wins + 1;
    let total = player.total_matches + 1;
    let streak = if player.streak >= 0 { player.streak + 1 } else { 1 };

    database::players::apply_match_result(
        conn,
        player.id,
        new_elo,
        rating::tier_for_elo(new_elo).as_str(),
        wins,
        player.losses,
        total,
        reconciler::win_rate(wins, total),
        streak,
        player.peak_elo.max(new_elo),
    )
}

fn apply_loser_update(conn: &mut DbConn, player: &Player, new_elo: i32) -> Result<()> {
    let losses = player.losses + 1;
    let total = player.total_matches + 1;
    let streak = if player.streak <= 0 { player.streak - 1 } else { -1 };

    database::players::apply_match_result(
        conn,
        player.id,
        new_elo,
        rating::tier_for_elo(new_elo).as_str(),
        player.wins,
        losses,
        total,
        reconciler::win_rate(player.wins, total),
        streak,
        player.peak_elo,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::models::NewPlayer;
    use crate::database::setup::init_database;
    use crate::database::{players, DbPool};

    fn request(winner_id: i32) -> RecordRequest {
        RecordRequest {
            player1_id: 1,
            player2_id: 2,
            winner_id,
            winner_score: 2,
            loser_score: 0,
            match_type: MatchType::Ranked,
            date: None,
        }
    }

    fn pool_with_players() -> DbPool {
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
                    main_deck: Some("Sky Striker".to_string()),
                    locals: vec![],
                    elo: 1200,
                    tier: "silver".to_string(),
                },
            )
            .unwrap();
        }
        pool
    }

    #[test]
    fn rejects_same_player_on_both_sides() {
        let req = RecordRequest { player2_id: 1, ..request(1) };
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn rejects_winner_outside_the_match() {
        assert!(validate_request(&request(99)).is_err());
    }

    #[test]
    fn rejects_inverted_scores() {
        let req = RecordRequest { winner_score: 0, loser_score: 2, ..request(1) };
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn dominant_win_updates_both_players_and_ranks() {
        let pool = pool_with_players();
        let mut conn = get_connection(&pool).unwrap();

        let saved = record_match(&mut conn, &request(1)).unwrap();

        // Fresh equal players, K=40, 2-0: base 20 + 6 dominant bonus.
        assert_eq!(saved.elo_change, 26);
        assert_eq!(saved.dominant_win_bonus, Some(6));
        assert_eq!(saved.streak_bonus, Some(0));
        assert_eq!(saved.winner_elo, 1200);
        assert_eq!(saved.loser_elo, 1200);

        let alice = players::find_by_id(&mut conn, 1).unwrap().unwrap();
        assert_eq!(alice.elo, 1226);
        assert_eq!(alice.peak_elo, 1226);
        assert_eq!((alice.wins, alice.losses, alice.total_matches), (1, 0, 1));
        assert_eq!(alice.win_rate, 100);
        assert_eq!(alice.streak, 1);
        assert_eq!(alice.rank, 1);

        let bob = players::find_by_id(&mut conn, 2).unwrap().unwrap();
        assert_eq!(bob.elo, 1180);
        // Peak does not follow the rating down.
        assert_eq!(bob.peak_elo, 1200);
        assert_eq!((bob.wins, bob.losses, bob.total_matches), (0, 1, 1));
        assert_eq!(bob.streak, -1);
        assert_eq!(bob.rank, 2);
    }

    #[test]
    fn streaks_extend_and_flip() {
        let pool = pool_with_players();
        let mut conn = get_connection(&pool).unwrap();

        record_match(&mut conn, &request(1)).unwrap();
        record_match(&mut conn, &request(1)).unwrap();
        let alice = players::find_by_id(&mut conn, 1).unwrap().unwrap();
        let bob = players::find_by_id(&mut conn, 2).unwrap().unwrap();
        assert_eq!(alice.streak, 2);
        assert_eq!(bob.streak, -2);

        record_match(&mut conn, &request(2)).unwrap();
        let alice = players::find_by_id(&mut conn, 1).unwrap().unwrap();
        let bob = players::find_by_id(&mut conn, 2).unwrap().unwrap();
        assert_eq!(alice.streak, -1);
        assert_eq!(bob.streak, 1);
    }

    #[test]
    fn validation_failure_persists_nothing() {
        let pool = pool_with_players();
        let mut conn = get_connection(&pool).unwrap();

        let req = RecordRequest { winner_score: 1, loser_score: 2, ..request(1) };
        assert!(record_match(&mut conn, &req).is_err());

        let alice = players::find_by_id(&mut conn, 1).unwrap().unwrap();
        assert_eq!(alice.total_matches, 0);
        assert!(crate::database::matches::list_all(&mut conn).unwrap().is_empty());
    }
}
