use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::Player;

pub fn insert(conn: &Connection, name: &str) -> Result<Player> {
    let sql = "INSERT INTO players (name) VALUES (?1) RETURNING id, name, created_at, updated_at";

    conn.query_row(sql, params![name], parse_player_row)
        .context("Failed to insert new player")
}

pub fn update_name(conn: &Connection, id: i64, name: &str) -> Result<Player> {
    let sql = "UPDATE players SET name = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2 RETURNING id, name, created_at, updated_at";

    conn.query_row(sql, params![name, id], parse_player_row)
        .context("Failed to update player name")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = "SELECT id, name, created_at, updated_at FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Player>> {
    let sql = "SELECT id, name, created_at, updated_at FROM players WHERE name = ?1";

    conn.query_row(sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

pub fn exists_by_id(conn: &Connection, id: i64) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM players WHERE id = ?1)";

    conn.query_row(sql, params![id], |row| row.get(0))
        .context("Failed to check player existence")
}

pub fn delete_by_id(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")
        .map(|_| ())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
