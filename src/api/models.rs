use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::{ChallengeExecution, Player, Ranking, Tournament};
use crate::services::challenges::ChallengeResult;
use crate::services::rankings::PlayerRankingSummary;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciChallengeRequest {
    pub player_id: i64,
    pub number: i64,
    #[serde(default)]
    pub tournament_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalindromeChallengeRequest {
    pub player_id: i64,
    pub input: String,
    #[serde(default)]
    pub tournament_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingChallengeRequest {
    pub player_id: i64,
    pub numbers: Vec<i64>,
    #[serde(default)]
    pub tournament_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionParams {
    pub tournament_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            created_at: player.created_at,
            updated_at: player.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentResponse {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub is_finished: bool,
    pub players: Vec<PlayerResponse>,
}

impl TournamentResponse {
    pub fn new(tournament: Tournament, roster: Vec<Player>) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            date: tournament.date,
            is_finished: tournament.is_finished,
            players: roster.into_iter().map(PlayerResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub challenge_name: String,
    pub success: bool,
    pub score: i64,
    pub result: Value,
    pub execution_id: i64,
}

impl From<ChallengeResult> for ChallengeResponse {
    fn from(outcome: ChallengeResult) -> Self {
        Self {
            challenge_name: outcome.challenge_name.to_string(),
            success: outcome.success,
            score: outcome.score,
            result: outcome.result,
            execution_id: outcome.execution_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub id: i64,
    pub challenge_id: i64,
    pub success: bool,
    pub score: i64,
    pub result: String,
    pub tournament_id: Option<i64>,
    pub executed_at: NaiveDateTime,
}

impl From<ChallengeExecution> for ExecutionResponse {
    fn from(execution: ChallengeExecution) -> Self {
        Self {
            id: execution.id,
            challenge_id: execution.challenge_id,
            success: execution.success,
            score: execution.score,
            result: execution.result,
            tournament_id: execution.tournament_id,
            executed_at: execution.executed_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub player_id: i64,
    pub total_score: i64,
    pub tournament_id: Option<i64>,
}

impl From<Ranking> for RankingResponse {
    fn from(ranking: Ranking) -> Self {
        Self {
            player_id: ranking.player_id,
            total_score: ranking.total_score,
            tournament_id: ranking.tournament_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRankingSummaryResponse {
    pub player_id: i64,
    pub global_score: i64,
    pub tournament_scores: BTreeMap<i64, i64>,
}

impl From<PlayerRankingSummary> for PlayerRankingSummaryResponse {
    fn from(summary: PlayerRankingSummary) -> Self {
        Self {
            player_id: summary.player_id,
            global_score: summary.global_score,
            tournament_scores: summary.tournament_scores,
        }
    }
}
