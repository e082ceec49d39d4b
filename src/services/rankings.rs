use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::database::models::Ranking;
use crate::database::{players, rankings};
use crate::errors::{ApiError, ApiResult};
use crate::services::players::player_not_found;

/// Convenience aggregate over a player's global and tournament scores.
#[derive(Debug, Clone)]
pub struct PlayerRankingSummary {
    pub player_id: i64,
    pub global_score: i64,
    pub tournament_scores: BTreeMap<i64, i64>,
}

/// Adds `delta` to the player's global score and, when a tournament is
/// given, to that tournament's score as well. Both writes are single atomic
/// upserts; the caller supplies the transaction scope when the update has to
/// be atomic with other writes (challenge execution logging does).
pub fn add_score(
    conn: &Connection,
    player_id: i64,
    delta: i64,
    tournament_id: Option<i64>,
) -> ApiResult<()> {
    if delta < 0 {
        return Err(ApiError::Validation(
            "Invalid score value must be greater than zero".to_string(),
        ));
    }
    require_player(conn, player_id)?;

    rankings::add_to_global(conn, player_id, delta)?;
    if let Some(tournament_id) = tournament_id {
        rankings::add_to_tournament(conn, player_id, tournament_id, delta)?;
    }

    log::debug!("Added {delta} points for player {player_id} (tournament: {tournament_id:?})");
    Ok(())
}

pub fn get_global(conn: &Connection) -> ApiResult<Vec<Ranking>> {
    Ok(rankings::list_global_desc(conn)?)
}

pub fn get_for_tournament(conn: &Connection, tournament_id: i64) -> ApiResult<Vec<Ranking>> {
    Ok(rankings::list_by_tournament_desc(conn, tournament_id)?)
}

/// Global-scope row for the player, or `None` if they have never scored.
pub fn get_player_global(conn: &Connection, player_id: i64) -> ApiResult<Option<Ranking>> {
    require_player(conn, player_id)?;
    Ok(rankings::find_global(conn, player_id)?)
}

/// All tournament-scoped rows for the player; the global row is excluded.
pub fn get_player_tournaments(conn: &Connection, player_id: i64) -> ApiResult<Vec<Ranking>> {
    require_player(conn, player_id)?;
    let rows = rankings::list_by_player(conn, player_id)?;
    Ok(rows
        .into_iter()
        .filter(|r| r.tournament_id.is_some())
        .collect())
}

pub fn get_player_summary(conn: &Connection, player_id: i64) -> ApiResult<PlayerRankingSummary> {
    require_player(conn, player_id)?;

    let global_score = rankings::find_global(conn, player_id)?
        .map(|r| r.total_score)
        .unwrap_or(0);
    let tournament_scores = rankings::list_by_player(conn, player_id)?
        .into_iter()
        .filter_map(|r| r.tournament_id.map(|t| (t, r.total_score)))
        .collect();

    Ok(PlayerRankingSummary {
        player_id,
        global_score,
        tournament_scores,
    })
}

fn require_player(conn: &Connection, player_id: i64) -> ApiResult<()> {
    if !players::exists_by_id(conn, player_id)? {
        return Err(player_not_found(player_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup;
    use crate::services::{players as player_service, tournaments as tournament_service};
    use chrono::NaiveDate;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup::reset_database(&conn).unwrap();
        conn
    }

    fn seed_player(conn: &mut Connection, name: &str) -> i64 {
        player_service::create(conn, name).unwrap().id
    }

    fn seed_tournament(conn: &mut Connection, name: &str) -> i64 {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        tournament_service::create(conn, name, date).unwrap().id
    }

    #[test]
    fn scores_accumulate_across_scopes() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        add_score(&conn, alice, 10, Some(cup)).unwrap();
        add_score(&conn, alice, 5, Some(cup)).unwrap();

        let summary = get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 15);
        assert_eq!(summary.tournament_scores.get(&cup), Some(&15));

        // A global-only update leaves the tournament scope untouched.
        add_score(&conn, alice, 3, None).unwrap();
        let summary = get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 18);
        assert_eq!(summary.tournament_scores.get(&cup), Some(&15));
    }

    #[test]
    fn rejects_negative_delta() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let err = add_score(&conn, alice, -1, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_player() {
        let conn = test_conn();

        let err = add_score(&conn, 999, 5, None).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(matches!(
            get_player_summary(&conn, 999).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn summary_defaults_to_zero_for_player_without_scores() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let summary = get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 0);
        assert!(summary.tournament_scores.is_empty());
        assert!(get_player_global(&conn, alice).unwrap().is_none());
    }

    #[test]
    fn listings_are_ordered_by_score_descending() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let bob = seed_player(&mut conn, "Bob");
        let carol = seed_player(&mut conn, "Carol");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        add_score(&conn, alice, 5, Some(cup)).unwrap();
        add_score(&conn, bob, 20, Some(cup)).unwrap();
        add_score(&conn, carol, 10, None).unwrap();

        let global: Vec<(i64, i64)> = get_global(&conn)
            .unwrap()
            .into_iter()
            .map(|r| (r.player_id, r.total_score))
            .collect();
        assert_eq!(global, vec![(bob, 20), (carol, 10), (alice, 5)]);

        let scoped: Vec<i64> = get_for_tournament(&conn, cup)
            .unwrap()
            .into_iter()
            .map(|r| r.player_id)
            .collect();
        assert_eq!(scoped, vec![bob, alice]);
    }

    #[test]
    fn equal_scores_break_ties_by_id_ascending() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let bob = seed_player(&mut conn, "Bob");
        let carol = seed_player(&mut conn, "Carol");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        // Ties fall back to ranking row id, so with equal totals the
        // listing follows the order in which players first scored.
        add_score(&conn, carol, 10, Some(cup)).unwrap();
        add_score(&conn, alice, 10, Some(cup)).unwrap();
        add_score(&conn, bob, 10, Some(cup)).unwrap();

        let global: Vec<i64> = get_global(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.player_id)
            .collect();
        assert_eq!(global, vec![carol, alice, bob]);

        let scoped: Vec<i64> = get_for_tournament(&conn, cup)
            .unwrap()
            .into_iter()
            .map(|r| r.player_id)
            .collect();
        assert_eq!(scoped, vec![carol, alice, bob]);

        // A higher total still outranks every tied row.
        add_score(&conn, bob, 1, Some(cup)).unwrap();
        let top = get_for_tournament(&conn, cup).unwrap();
        assert_eq!(top[0].player_id, bob);
        assert_eq!(top[0].total_score, 11);
    }

    #[test]
    fn player_tournament_rows_exclude_the_global_row() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        add_score(&conn, alice, 7, Some(cup)).unwrap();

        let rows = get_player_tournaments(&conn, alice).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tournament_id, Some(cup));
        assert_eq!(rows[0].total_score, 7);
    }
}
