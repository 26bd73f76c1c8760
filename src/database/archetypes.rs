use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::DeckArchetype;

pub fn insert_archetype(
    conn: &mut DbConn,
    name: &str,
    description: Option<&str>,
    image_url: Option<&str>,
) -> Result<DeckArchetype> {
    let sql = "INSERT INTO deck_archetypes (name, description, image_url) VALUES (?1, ?2, ?3) RETURNING id, name, description, image_url, created_at";

    conn.query_row(sql, params![name, description, image_url], parse_archetype_row)
        .context("Failed to insert deck archetype")
}

fn parse_archetype_row(row: &rusqlite::Row) -> rusqlite::Result<DeckArchetype> {
    Ok(DeckArchetype {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        image_url: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<DeckArchetype>> {
    let sql = "SELECT id, name, description, image_url, created_at FROM deck_archetypes ORDER BY name ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_archetype_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
