use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use super::models::{Player, Tournament};

const TOURNAMENT_COLUMNS: &str = "id, name, date, is_finished, created_at, updated_at";

pub fn insert(conn: &Connection, name: &str, date: NaiveDate) -> Result<Tournament> {
    let sql = format!(
        "INSERT INTO tournaments (name, date) VALUES (?1, ?2) RETURNING {TOURNAMENT_COLUMNS}"
    );

    conn.query_row(&sql, params![name, date], parse_tournament_row)
        .context("Failed to insert new tournament")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Tournament>> {
    let sql = format!("SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn exists_by_name(conn: &Connection, name: &str) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM tournaments WHERE name = ?1)";

    conn.query_row(sql, params![name], |row| row.get(0))
        .context("Failed to check tournament name existence")
}

pub fn set_finished(conn: &Connection, id: i64) -> Result<Tournament> {
    let sql = format!(
        "UPDATE tournaments SET is_finished = 1, updated_at = CURRENT_TIMESTAMP WHERE id = ?1 RETURNING {TOURNAMENT_COLUMNS}"
    );

    conn.query_row(&sql, params![id], parse_tournament_row)
        .context("Failed to finish tournament")
}

pub fn add_player(conn: &Connection, tournament_id: i64, player_id: i64) -> Result<()> {
    let sql = "INSERT INTO tournament_players (tournament_id, player_id) VALUES (?1, ?2)";
    conn.execute(sql, params![tournament_id, player_id])
        .context("Failed to add player to tournament roster")?;

    touch(conn, tournament_id)
}

/// Returns false when the player was not in the roster.
pub fn remove_player(conn: &Connection, tournament_id: i64, player_id: i64) -> Result<bool> {
    let sql = "DELETE FROM tournament_players WHERE tournament_id = ?1 AND player_id = ?2";
    let removed = conn
        .execute(sql, params![tournament_id, player_id])
        .context("Failed to remove player from tournament roster")?;

    if removed > 0 {
        touch(conn, tournament_id)?;
    }
    Ok(removed > 0)
}

pub fn is_in_roster(conn: &Connection, tournament_id: i64, player_id: i64) -> Result<bool> {
    let sql =
        "SELECT EXISTS(SELECT 1 FROM tournament_players WHERE tournament_id = ?1 AND player_id = ?2)";

    conn.query_row(sql, params![tournament_id, player_id], |row| row.get(0))
        .context("Failed to check roster membership")
}

pub fn list_roster(conn: &Connection, tournament_id: i64) -> Result<Vec<Player>> {
    let sql = "SELECT p.id, p.name, p.created_at, p.updated_at
               FROM players p
               JOIN tournament_players tp ON tp.player_id = p.id
               WHERE tp.tournament_id = ?1
               ORDER BY p.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok(Player {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn touch(conn: &Connection, tournament_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE tournaments SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
        params![tournament_id],
    )
    .context("Failed to touch tournament timestamp")
    .map(|_| ())
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        is_finished: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
