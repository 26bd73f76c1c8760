use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{Match, MatchType, NewMatch};

const MATCH_COLUMNS: &str = "id, player1_id, player2_id, player1_name, player2_name, player1_deck, player2_deck, winner_id, winner_score, loser_score, winner_elo, loser_elo, elo_change, dominant_win_bonus, streak_bonus, date, match_type, created_at";

pub fn insert_match(conn: &mut DbConn, m: &NewMatch) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (player1_id, player2_id, player1_name, player2_name, player1_deck, player2_deck, winner_id, winner_score, loser_score, winner_elo, loser_elo, elo_change, dominant_win_bonus, streak_bonus, date, match_type) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16) RETURNING {MATCH_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            m.player1_id,
            m.player2_id,
            m.player1_name,
            m.player2_name,
            m.player1_deck,
            m.player2_deck,
            m.winner_id,
            m.winner_score,
            m.loser_score,
            m.winner_elo,
            m.loser_elo,
            m.elo_change,
            m.dominant_win_bonus,
            m.streak_bonus,
            m.date,
            m.match_type.as_str(),
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    let match_type: String = row.get(16)?;
    Ok(Match {
        id: row.get(0)?,
        player1_id: row.get(1)?,
        player2_id: row.get(2)?,
        player1_name: row.get(3)?,
        player2_name: row.get(4)?,
        player1_deck: row.get(5)?,
        player2_deck: row.get(6)?,
        winner_id: row.get(7)?,
        winner_score: row.get(8)?,
        loser_score: row.get(9)?,
        winner_elo: row.get(10)?,
        loser_elo: row.get(11)?,
        elo_change: row.get(12)?,
        dominant_win_bonus: row.get(13)?,
        streak_bonus: row.get(14)?,
        date: row.get(15)?,
        match_type: MatchType::parse(&match_type).unwrap_or(MatchType::Ranked),
        created_at: row.get(17)?,
    })
}

/// Full match log, most recent first. Matches sharing a date come back in
/// reverse insertion order, matching the streak walk's tie-break.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<Match>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_for_player(conn: &mut DbConn, player_id: i32, limit: usize) -> Result<Vec<Match>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE player1_id = ?1 OR player2_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, limit as i64], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
