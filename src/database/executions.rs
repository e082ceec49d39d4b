use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use super::models::ChallengeExecution;

const EXECUTION_COLUMNS: &str =
    "id, player_id, challenge_id, success, score, result, tournament_id, executed_at";

pub fn insert(
    conn: &Connection,
    player_id: i64,
    challenge_id: i64,
    success: bool,
    score: i64,
    result: &str,
    tournament_id: Option<i64>,
) -> Result<ChallengeExecution> {
    let sql = format!(
        "INSERT INTO challenge_executions (player_id, challenge_id, success, score, result, tournament_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {EXECUTION_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![player_id, challenge_id, success, score, result, tournament_id],
        parse_execution_row,
    )
    .context("Failed to insert challenge execution")
}

pub fn list_by_player(conn: &Connection, player_id: i64) -> Result<Vec<ChallengeExecution>> {
    let sql = format!(
        "SELECT {EXECUTION_COLUMNS} FROM challenge_executions WHERE player_id = ?1 ORDER BY id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_execution_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_player_and_tournament(
    conn: &Connection,
    player_id: i64,
    tournament_id: i64,
) -> Result<Vec<ChallengeExecution>> {
    let sql = format!(
        "SELECT {EXECUTION_COLUMNS} FROM challenge_executions WHERE player_id = ?1 AND tournament_id = ?2 ORDER BY id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, tournament_id], parse_execution_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_execution_row(row: &rusqlite::Row) -> rusqlite::Result<ChallengeExecution> {
    Ok(ChallengeExecution {
        id: row.get(0)?,
        player_id: row.get(1)?,
        challenge_id: row.get(2)?,
        success: row.get(3)?,
        score: row.get(4)?,
        result: row.get(5)?,
        tournament_id: row.get(6)?,
        executed_at: row.get(7)?,
    })
}
