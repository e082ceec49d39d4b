use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub is_finished: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One logged challenge attempt. Append-only: rows are never updated or
/// deleted once written.
#[derive(Debug, Clone)]
pub struct ChallengeExecution {
    pub id: i64,
    pub player_id: i64,
    pub challenge_id: i64,
    pub success: bool,
    pub score: i64,
    pub result: String,
    pub tournament_id: Option<i64>,
    pub executed_at: NaiveDateTime,
}

/// Cumulative score for one player in one scope. `tournament_id = None`
/// is the global scope.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub id: i64,
    pub player_id: i64,
    pub total_score: i64,
    pub tournament_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
