use anyhow::{bail, Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{NewPlayer, Player, PlayerStats};

const PLAYER_COLUMNS: &str = "id, user_id, name, avatar_url, main_deck, locals, elo, peak_elo, tier, wins, losses, total_matches, win_rate, streak, rank, last_season_elo, last_season_peak_elo, last_season_rank, created_at";

pub fn insert_player(conn: &mut DbConn, player: &NewPlayer) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (user_id, name, avatar_url, main_deck, locals, elo, peak_elo, tier) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7) RETURNING {PLAYER_COLUMNS}"
    );
    let locals_json = serde_json::to_string(&player.locals)?;

    conn.query_row(
        &sql,
        params![
            player.user_id,
            player.name,
            player.avatar_url,
            player.main_deck,
            locals_json,
            player.elo,
            player.tier,
        ],
        parse_player_row,
    )
    .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    let locals_json: String = row.get(5)?;
    Ok(Player {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        avatar_url: row.get(3)?,
        main_deck: row.get(4)?,
        locals: serde_json::from_str(&locals_json).unwrap_or_default(),
        elo: row.get(6)?,
        peak_elo: row.get(7)?,
        tier: row.get(8)?,
        wins: row.get(9)?,
        losses: row.get(10)?,
        total_matches: row.get(11)?,
        win_rate: row.get(12)?,
        streak: row.get(13)?,
        rank: row.get(14)?,
        last_season_elo: row.get(15)?,
        last_season_peak_elo: row.get(16)?,
        last_season_rank: row.get(17)?,
        created_at: row.get(18)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: i32) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub fn apply_match_result(
    conn: &mut DbConn,
    id: i32,
    elo: i32,
    tier: &str,
    wins: i32,
    losses: i32,
    total_matches: i32,
    win_rate: i32,
    streak: i32,
    peak_elo: i32,
) -> Result<()> {
    let sql = "UPDATE players SET elo = ?1, tier = ?2, wins = ?3, losses = ?4, total_matches = ?5, win_rate = ?6, streak = ?7, peak_elo = ?8 WHERE id = ?9";

    let updated = conn
        .execute(
            sql,
            params![elo, tier, wins, losses, total_matches, win_rate, streak, peak_elo, id],
        )
        .context("Failed to apply match result to player")?;
    ensure_updated(updated, id)
}

pub fn update_stats(conn: &mut DbConn, id: i32, stats: &PlayerStats) -> Result<()> {
    let sql = "UPDATE players SET wins = ?1, losses = ?2, total_matches = ?3, win_rate = ?4, streak = ?5 WHERE id = ?6";

    let updated = conn
        .execute(
            sql,
            params![
                stats.wins,
                stats.losses,
                stats.total_matches,
                stats.win_rate,
                stats.streak,
                id
            ],
        )
        .context("Failed to update player stats")?;
    ensure_updated(updated, id)
}

pub fn update_rank(conn: &mut DbConn, id: i32, rank: i32) -> Result<()> {
    let updated = conn
        .execute("UPDATE players SET rank = ?1 WHERE id = ?2", params![rank, id])
        .context("Failed to update player rank")?;
    ensure_updated(updated, id)
}

/// Saves the player's current standing into the season-carryover columns,
/// then zeroes the live record. The carryover assignments read the
/// pre-update column values, so ordering within the statement is safe.
pub fn reset_for_new_season(
    conn: &mut DbConn,
    id: i32,
    starting_elo: i32,
    tier: &str,
) -> Result<()> {
    let sql = "UPDATE players SET last_season_elo = elo, last_season_peak_elo = peak_elo, last_season_rank = rank, elo = ?1, peak_elo = ?1, tier = ?2, wins = 0, losses = 0, total_matches = 0, win_rate = 0, streak = 0 WHERE id = ?3";

    let updated = conn
        .execute(sql, params![starting_elo, tier, id])
        .context("Failed to reset player for new season")?;
    ensure_updated(updated, id)
}

fn ensure_updated(rows: usize, id: i32) -> Result<()> {
    if rows == 0 {
        bail!("player {} not found", id);
    }
    Ok(())
}
