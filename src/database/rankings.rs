use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::Ranking;

const RANKING_COLUMNS: &str = "id, player_id, total_score, tournament_id, created_at, updated_at";

// The two upserts below lean on the partial unique indexes in schema.sql so
// that read-modify-write never happens in application code; concurrent
// scoring for the same player serializes inside SQLite.

pub fn add_to_global(conn: &Connection, player_id: i64, delta: i64) -> Result<Ranking> {
    let sql = format!(
        "INSERT INTO rankings (player_id, total_score) VALUES (?1, ?2)
         ON CONFLICT (player_id) WHERE tournament_id IS NULL
         DO UPDATE SET total_score = total_score + excluded.total_score, updated_at = CURRENT_TIMESTAMP
         RETURNING {RANKING_COLUMNS}"
    );

    conn.query_row(&sql, params![player_id, delta], parse_ranking_row)
        .context("Failed to upsert global ranking")
}

pub fn add_to_tournament(
    conn: &Connection,
    player_id: i64,
    tournament_id: i64,
    delta: i64,
) -> Result<Ranking> {
    let sql = format!(
        "INSERT INTO rankings (player_id, tournament_id, total_score) VALUES (?1, ?2, ?3)
         ON CONFLICT (player_id, tournament_id) WHERE tournament_id IS NOT NULL
         DO UPDATE SET total_score = total_score + excluded.total_score, updated_at = CURRENT_TIMESTAMP
         RETURNING {RANKING_COLUMNS}"
    );

    conn.query_row(&sql, params![player_id, tournament_id, delta], parse_ranking_row)
        .context("Failed to upsert tournament ranking")
}

pub fn find_global(conn: &Connection, player_id: i64) -> Result<Option<Ranking>> {
    let sql = format!(
        "SELECT {RANKING_COLUMNS} FROM rankings WHERE player_id = ?1 AND tournament_id IS NULL"
    );

    conn.query_row(&sql, params![player_id], parse_ranking_row)
        .optional()
        .context("Failed to query global ranking")
}

pub fn find_by_player_and_tournament(
    conn: &Connection,
    player_id: i64,
    tournament_id: i64,
) -> Result<Option<Ranking>> {
    let sql = format!(
        "SELECT {RANKING_COLUMNS} FROM rankings WHERE player_id = ?1 AND tournament_id = ?2"
    );

    conn.query_row(&sql, params![player_id, tournament_id], parse_ranking_row)
        .optional()
        .context("Failed to query tournament ranking")
}

pub fn list_global_desc(conn: &Connection) -> Result<Vec<Ranking>> {
    let sql = format!(
        "SELECT {RANKING_COLUMNS} FROM rankings WHERE tournament_id IS NULL ORDER BY total_score DESC, id"
    );

    query_rankings(conn, &sql, params![])
}

pub fn list_by_tournament_desc(conn: &Connection, tournament_id: i64) -> Result<Vec<Ranking>> {
    let sql = format!(
        "SELECT {RANKING_COLUMNS} FROM rankings WHERE tournament_id = ?1 ORDER BY total_score DESC, id"
    );

    query_rankings(conn, &sql, params![tournament_id])
}

pub fn list_by_player(conn: &Connection, player_id: i64) -> Result<Vec<Ranking>> {
    let sql = format!("SELECT {RANKING_COLUMNS} FROM rankings WHERE player_id = ?1 ORDER BY id");

    query_rankings(conn, &sql, params![player_id])
}

fn query_rankings(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Ranking>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse_ranking_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<Ranking> {
    Ok(Ranking {
        id: row.get(0)?,
        player_id: row.get(1)?,
        total_score: row.get(2)?,
        tournament_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
