use anyhow::Context;
use rusqlite::Connection;

use crate::database::models::Player;
use crate::database::players;
use crate::errors::{ApiError, ApiResult};

pub fn create(conn: &mut Connection, name: &str) -> ApiResult<Player> {
    validate_name(name)?;

    let tx = conn.transaction().context("Failed to begin transaction")?;
    ensure_name_free(&tx, name, None)?;
    let player = players::insert(&tx, name)?;
    tx.commit().context("Failed to commit player creation")?;

    log::info!("Created player '{}' ({})", player.name, player.id);
    Ok(player)
}

pub fn update(conn: &mut Connection, id: i64, new_name: &str) -> ApiResult<Player> {
    validate_name(new_name)?;

    let tx = conn.transaction().context("Failed to begin transaction")?;
    require_exists(&tx, id)?;
    ensure_name_free(&tx, new_name, Some(id))?;
    let player = players::update_name(&tx, id, new_name)?;
    tx.commit().context("Failed to commit player update")?;

    Ok(player)
}

pub fn get_by_id(conn: &Connection, id: i64) -> ApiResult<Player> {
    players::find_by_id(conn, id)?.ok_or_else(|| player_not_found(id))
}

pub fn get_by_name(conn: &Connection, name: &str) -> ApiResult<Player> {
    players::find_by_name(conn, name)?
        .ok_or_else(|| ApiError::NotFound(format!("Player not found with name: {name}")))
}

pub fn delete_by_id(conn: &mut Connection, id: i64) -> ApiResult<()> {
    let tx = conn.transaction().context("Failed to begin transaction")?;
    require_exists(&tx, id)?;
    players::delete_by_id(&tx, id)?;
    tx.commit().context("Failed to commit player deletion")?;

    log::info!("Deleted player {id}");
    Ok(())
}

pub(crate) fn player_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Player not found with ID: {id}"))
}

fn validate_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("The Player name is empty".to_string()));
    }
    Ok(())
}

fn require_exists(conn: &Connection, id: i64) -> ApiResult<()> {
    if !players::exists_by_id(conn, id)? {
        return Err(player_not_found(id));
    }
    Ok(())
}

fn ensure_name_free(conn: &Connection, name: &str, exclude_id: Option<i64>) -> ApiResult<()> {
    if let Some(existing) = players::find_by_name(conn, name)? {
        if exclude_id != Some(existing.id) {
            return Err(ApiError::Conflict(format!(
                "Player name already exists: {name}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup::reset_database(&conn).unwrap();
        conn
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let mut conn = test_conn();

        let player = create(&mut conn, "Alice").unwrap();
        assert_eq!(player.name, "Alice");
        assert!(player.id > 0);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut conn = test_conn();

        let err = create(&mut conn, "   ").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let mut conn = test_conn();
        create(&mut conn, "Alice").unwrap();

        let err = create(&mut conn, "Alice").unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn update_allows_keeping_own_name() {
        let mut conn = test_conn();
        let player = create(&mut conn, "Alice").unwrap();

        let updated = update(&mut conn, player.id, "Alice").unwrap();
        assert_eq!(updated.name, "Alice");
    }

    #[test]
    fn update_rejects_name_of_another_player() {
        let mut conn = test_conn();
        create(&mut conn, "Alice").unwrap();
        let bob = create(&mut conn, "Bob").unwrap();

        let err = update(&mut conn, bob.id, "Alice").unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn update_unknown_player_is_not_found() {
        let mut conn = test_conn();

        let err = update(&mut conn, 999, "Ghost").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn lookup_by_id_and_name() {
        let mut conn = test_conn();
        let created = create(&mut conn, "Alice").unwrap();

        assert_eq!(get_by_id(&conn, created.id).unwrap().name, "Alice");
        assert_eq!(get_by_name(&conn, "Alice").unwrap().id, created.id);
        assert!(matches!(
            get_by_id(&conn, 999).unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            get_by_name(&conn, "Nobody").unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn delete_removes_player() {
        let mut conn = test_conn();
        let player = create(&mut conn, "Alice").unwrap();

        delete_by_id(&mut conn, player.id).unwrap();
        assert!(matches!(
            get_by_id(&conn, player.id).unwrap_err(),
            ApiError::NotFound(_)
        ));

        let err = delete_by_id(&mut conn, player.id).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
