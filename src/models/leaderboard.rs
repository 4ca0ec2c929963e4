use serde::{Deserialize, Serialize};

use crate::models::score::{LeaderboardScoreView, PlayerScoreView};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub score: i64,
    pub level: String,
    #[serde(default)]
    pub time_remaining: Option<i64>,
    #[serde(default)]
    pub puzzles_solved: Option<i64>,
}

// Query params arrive as strings; unparsable values fall back to defaults.
#[derive(Debug, Deserialize)]
pub struct TopScoresQuery {
    pub limit: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreHistoryQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScorePayload {
    pub score: LeaderboardScoreView,
    pub is_new_high_score: bool,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardPayload {
    pub leaderboard: Vec<LeaderboardScoreView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ScoreHistoryPayload {
    pub scores: Vec<PlayerScoreView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_players: i64,
    pub total_games: i64,
    pub avg_score: i64,
    pub top_player: Option<TopPlayer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayer {
    pub username: String,
    pub high_score: i64,
}
