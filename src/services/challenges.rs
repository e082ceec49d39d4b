use anyhow::Context;
use rusqlite::{Connection, Transaction};
use serde_json::json;

use crate::challenges::{Challenge, fibonacci, palindrome, sorting};
use crate::config::settings::ChallengeSettings;
use crate::database::models::ChallengeExecution;
use crate::database::{executions, players, tournaments};
use crate::errors::{ApiError, ApiResult};
use crate::services::players::player_not_found;
use crate::services::rankings;
use crate::services::tournaments::tournament_not_found;

/// Summary returned to the caller after one challenge attempt.
#[derive(Debug, Clone)]
pub struct ChallengeResult {
    pub challenge_name: &'static str,
    pub success: bool,
    pub score: i64,
    pub result: serde_json::Value,
    pub execution_id: i64,
}

// Execution order is fixed: validate input, resolve player, resolve
// tournament, run the algorithm, log, propagate the score. A finished
// tournament still accepts execution scores; only roster mutation is gated
// on the finished flag.

pub fn execute_fibonacci(
    conn: &mut Connection,
    settings: &ChallengeSettings,
    player_id: i64,
    number: i64,
    tournament_id: Option<i64>,
) -> ApiResult<ChallengeResult> {
    if number < 0 {
        return Err(ApiError::Validation(
            "Fibonacci index cannot be negative".to_string(),
        ));
    }
    if number > settings.max_fibonacci_index {
        return Err(ApiError::Validation(format!(
            "Fibonacci index exceeds maximum value of {}",
            settings.max_fibonacci_index
        )));
    }

    let tx = conn.transaction().context("Failed to begin transaction")?;
    resolve_player(&tx, player_id)?;
    resolve_tournament(&tx, tournament_id)?;

    let value = fibonacci::compute(number as u32);
    let outcome = log_execution(
        &tx,
        Challenge::Fibonacci,
        player_id,
        tournament_id,
        true,
        true,
        json!(value),
    )?;
    tx.commit().context("Failed to commit challenge execution")?;

    Ok(outcome)
}

pub fn execute_palindrome(
    conn: &mut Connection,
    settings: &ChallengeSettings,
    player_id: i64,
    input: &str,
    tournament_id: Option<i64>,
) -> ApiResult<ChallengeResult> {
    if input.trim().is_empty() {
        return Err(ApiError::Validation(
            "Input string cannot be empty".to_string(),
        ));
    }
    if input.chars().count() > settings.max_input_length {
        return Err(ApiError::Validation(format!(
            "Input exceeds maximum length of {} characters",
            settings.max_input_length
        )));
    }

    let tx = conn.transaction().context("Failed to begin transaction")?;
    resolve_player(&tx, player_id)?;
    resolve_tournament(&tx, tournament_id)?;

    // The check itself always succeeds; points are only awarded when the
    // input actually is a palindrome.
    let is_palindrome = palindrome::check(input);
    let outcome = log_execution(
        &tx,
        Challenge::Palindrome,
        player_id,
        tournament_id,
        true,
        is_palindrome,
        json!(is_palindrome),
    )?;
    tx.commit().context("Failed to commit challenge execution")?;

    Ok(outcome)
}

pub fn execute_sorting(
    conn: &mut Connection,
    settings: &ChallengeSettings,
    player_id: i64,
    numbers: &[i64],
    tournament_id: Option<i64>,
) -> ApiResult<ChallengeResult> {
    if numbers.is_empty() {
        return Err(ApiError::Validation(
            "Numbers list cannot be empty".to_string(),
        ));
    }
    if numbers.len() > settings.max_list_size {
        return Err(ApiError::Validation(format!(
            "Input exceeds maximum size of {} elements",
            settings.max_list_size
        )));
    }

    let tx = conn.transaction().context("Failed to begin transaction")?;
    resolve_player(&tx, player_id)?;
    resolve_tournament(&tx, tournament_id)?;

    let sorted = sorting::merge_sort(numbers);
    let success = !sorted.is_empty();
    let outcome = log_execution(
        &tx,
        Challenge::Sorting,
        player_id,
        tournament_id,
        success,
        success,
        json!(sorted),
    )?;
    tx.commit().context("Failed to commit challenge execution")?;

    Ok(outcome)
}

pub fn get_player_executions(conn: &Connection, player_id: i64) -> ApiResult<Vec<ChallengeExecution>> {
    resolve_player(conn, player_id)?;
    Ok(executions::list_by_player(conn, player_id)?)
}

pub fn get_player_tournament_executions(
    conn: &Connection,
    player_id: i64,
    tournament_id: i64,
) -> ApiResult<Vec<ChallengeExecution>> {
    resolve_player(conn, player_id)?;
    Ok(executions::list_by_player_and_tournament(
        conn,
        player_id,
        tournament_id,
    )?)
}

fn resolve_player(conn: &Connection, player_id: i64) -> ApiResult<()> {
    if !players::exists_by_id(conn, player_id)? {
        return Err(player_not_found(player_id));
    }
    Ok(())
}

fn resolve_tournament(conn: &Connection, tournament_id: Option<i64>) -> ApiResult<()> {
    if let Some(id) = tournament_id {
        tournaments::find_by_id(conn, id)?.ok_or_else(|| tournament_not_found(id))?;
    }
    Ok(())
}

fn log_execution(
    tx: &Transaction,
    challenge: Challenge,
    player_id: i64,
    tournament_id: Option<i64>,
    success: bool,
    scored: bool,
    result: serde_json::Value,
) -> ApiResult<ChallengeResult> {
    let score = if scored { challenge.weight() } else { 0 };

    let execution = executions::insert(
        tx,
        player_id,
        challenge.id(),
        success,
        score,
        &result.to_string(),
        tournament_id,
    )?;

    if success {
        rankings::add_score(tx, player_id, score, tournament_id)?;
    }

    log::info!(
        "Player {player_id} executed {} (success: {success}, score: {score})",
        challenge.name()
    );

    Ok(ChallengeResult {
        challenge_name: challenge.name(),
        success,
        score,
        result,
        execution_id: execution.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup;
    use crate::services::{players as player_service, rankings as ranking_service,
        tournaments as tournament_service};
    use chrono::NaiveDate;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup::reset_database(&conn).unwrap();
        conn
    }

    fn settings() -> ChallengeSettings {
        ChallengeSettings::default()
    }

    fn seed_player(conn: &mut Connection, name: &str) -> i64 {
        player_service::create(conn, name).unwrap().id
    }

    fn seed_tournament(conn: &mut Connection, name: &str) -> i64 {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        tournament_service::create(conn, name, date).unwrap().id
    }

    #[test]
    fn fibonacci_awards_full_weight_and_updates_global_ranking() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let outcome = execute_fibonacci(&mut conn, &settings(), alice, 10, None).unwrap();
        assert_eq!(outcome.challenge_name, "Fibonacci");
        assert!(outcome.success);
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.result, json!(55));

        let summary = ranking_service::get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 10);
    }

    #[test]
    fn fibonacci_validates_range_before_any_lookup() {
        let mut conn = test_conn();

        // Player 999 does not exist; the input error must win.
        let err = execute_fibonacci(&mut conn, &settings(), 999, -1, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = execute_fibonacci(&mut conn, &settings(), 999, 1001, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn fibonacci_accepts_the_maximum_index() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let outcome = execute_fibonacci(&mut conn, &settings(), alice, 1000, None).unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn palindrome_scores_only_actual_palindromes() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let hit =
            execute_palindrome(&mut conn, &settings(), alice, "A man a plan a canal Panama", None)
                .unwrap();
        assert!(hit.success);
        assert_eq!(hit.score, 5);
        assert_eq!(hit.result, json!(true));

        let miss = execute_palindrome(&mut conn, &settings(), alice, "hello", None).unwrap();
        assert!(miss.success);
        assert_eq!(miss.score, 0);
        assert_eq!(miss.result, json!(false));

        // The miss still counts as a successful execution, so the global
        // ranking row exists but only the hit contributed points.
        let summary = ranking_service::get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 5);
    }

    #[test]
    fn palindrome_rejects_blank_and_oversized_input() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let err = execute_palindrome(&mut conn, &settings(), alice, "", None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let long = "a".repeat(1001);
        let err = execute_palindrome(&mut conn, &settings(), alice, &long, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn sorting_returns_ordered_list_and_awards_weight() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let outcome =
            execute_sorting(&mut conn, &settings(), alice, &[5, 3, 1, 4, 2], None).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.score, 8);
        assert_eq!(outcome.result, json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn sorting_rejects_empty_and_oversized_lists() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let err = execute_sorting(&mut conn, &settings(), alice, &[], None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let big = vec![0i64; 1001];
        let err = execute_sorting(&mut conn, &settings(), alice, &big, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn unknown_player_and_tournament_are_not_found() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");

        let err = execute_fibonacci(&mut conn, &settings(), 999, 5, None).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = execute_fibonacci(&mut conn, &settings(), alice, 5, Some(999)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn tournament_execution_updates_both_scopes() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        execute_fibonacci(&mut conn, &settings(), alice, 10, Some(cup)).unwrap();
        execute_sorting(&mut conn, &settings(), alice, &[2, 1], None).unwrap();

        let summary = ranking_service::get_player_summary(&conn, alice).unwrap();
        assert_eq!(summary.global_score, 18);
        assert_eq!(summary.tournament_scores.get(&cup), Some(&10));
    }

    #[test]
    fn finished_tournaments_still_accept_execution_scores() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let cup = seed_tournament(&mut conn, "Spring Cup");
        tournament_service::finish(&mut conn, cup).unwrap();

        let outcome = execute_fibonacci(&mut conn, &settings(), alice, 10, Some(cup)).unwrap();
        assert_eq!(outcome.score, 10);
    }

    #[test]
    fn execution_log_is_append_only_and_filterable() {
        let mut conn = test_conn();
        let alice = seed_player(&mut conn, "Alice");
        let cup = seed_tournament(&mut conn, "Spring Cup");

        execute_fibonacci(&mut conn, &settings(), alice, 7, None).unwrap();
        execute_palindrome(&mut conn, &settings(), alice, "racecar", Some(cup)).unwrap();

        let all = get_player_executions(&conn, alice).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].result, "13");
        assert!(all[0].tournament_id.is_none());

        let scoped = get_player_tournament_executions(&conn, alice, cup).unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].result, "true");
        assert_eq!(scoped[0].tournament_id, Some(cup));
    }
}
