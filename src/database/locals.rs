use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::Local;

pub fn insert_local(
    conn: &mut DbConn,
    name: &str,
    location: &str,
    description: Option<&str>,
) -> Result<Local> {
    let sql = "INSERT INTO locals (name, location, description) VALUES (?1, ?2, ?3) RETURNING id, name, location, description, created_at";

    conn.query_row(sql, params![name, location, description], parse_local_row)
        .context("Failed to insert local")
}

fn parse_local_row(row: &rusqlite::Row) -> rusqlite::Result<Local> {
    Ok(Local {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Local>> {
    let sql = "SELECT id, name, location, description, created_at FROM locals ORDER BY name ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_local_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
