use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::database::models::{Player, Tournament};
use crate::database::{players, tournaments};
use crate::errors::{ApiError, ApiResult};
use crate::services::players::player_not_found;

pub fn create(conn: &mut Connection, name: &str, date: NaiveDate) -> ApiResult<Tournament> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("Tournament name is empty".to_string()));
    }

    let tx = conn.transaction().context("Failed to begin transaction")?;
    if tournaments::exists_by_name(&tx, name)? {
        return Err(ApiError::Conflict(format!(
            "Tournament name already exists: {name}"
        )));
    }
    let tournament = tournaments::insert(&tx, name, date)?;
    tx.commit().context("Failed to commit tournament creation")?;

    log::info!("Created tournament '{}' ({})", tournament.name, tournament.id);
    Ok(tournament)
}

pub fn get_by_id(conn: &Connection, id: i64) -> ApiResult<Tournament> {
    tournaments::find_by_id(conn, id)?.ok_or_else(|| tournament_not_found(id))
}

pub fn add_player(conn: &mut Connection, tournament_id: i64, player_id: i64) -> ApiResult<Tournament> {
    let tx = conn.transaction().context("Failed to begin transaction")?;

    let tournament = require_tournament(&tx, tournament_id)?;
    if !players::exists_by_id(&tx, player_id)? {
        return Err(player_not_found(player_id));
    }
    require_active(&tournament)?;
    if tournaments::is_in_roster(&tx, tournament_id, player_id)? {
        return Err(ApiError::Conflict(
            "Player already registered in tournament".to_string(),
        ));
    }

    tournaments::add_player(&tx, tournament_id, player_id)?;
    let refreshed = require_tournament(&tx, tournament_id)?;
    tx.commit().context("Failed to commit roster addition")?;

    Ok(refreshed)
}

pub fn remove_player(
    conn: &mut Connection,
    tournament_id: i64,
    player_id: i64,
) -> ApiResult<Tournament> {
    let tx = conn.transaction().context("Failed to begin transaction")?;

    let tournament = require_tournament(&tx, tournament_id)?;
    require_active(&tournament)?;
    if !tournaments::remove_player(&tx, tournament_id, player_id)? {
        return Err(ApiError::NotFound(
            "Player not registered in tournament".to_string(),
        ));
    }

    let refreshed = require_tournament(&tx, tournament_id)?;
    tx.commit().context("Failed to commit roster removal")?;

    Ok(refreshed)
}

/// Marks the tournament as finished. Terminal: roster mutation and a second
/// finish are rejected afterwards.
pub fn finish(conn: &mut Connection, tournament_id: i64) -> ApiResult<Tournament> {
    let tx = conn.transaction().context("Failed to begin transaction")?;

    let tournament = require_tournament(&tx, tournament_id)?;
    require_active(&tournament)?;
    let finished = tournaments::set_finished(&tx, tournament_id)?;
    tx.commit().context("Failed to commit tournament finish")?;

    log::info!("Finished tournament {tournament_id}");
    Ok(finished)
}

pub fn list_players(conn: &Connection, tournament_id: i64) -> ApiResult<Vec<Player>> {
    require_tournament(conn, tournament_id)?;
    Ok(tournaments::list_roster(conn, tournament_id)?)
}

fn require_tournament(conn: &Connection, id: i64) -> ApiResult<Tournament> {
    tournaments::find_by_id(conn, id)?.ok_or_else(|| tournament_not_found(id))
}

fn require_active(tournament: &Tournament) -> ApiResult<()> {
    if tournament.is_finished {
        return Err(ApiError::PreconditionFailed(
            "Tournament is already finished".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn tournament_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Tournament not found with ID: {id}"))
}
