use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::difficulty::Difficulty;

/// One finished game as stored in the `scores` collection.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoreEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub username: String,
    pub score: i64,
    pub level: Difficulty,
    #[serde(default)]
    pub time_remaining: i64,
    #[serde(default = "default_puzzles_solved")]
    pub puzzles_solved: i64,
    #[serde(default = "default_played_at")]
    pub played_at: bson::DateTime,
}

fn default_puzzles_solved() -> i64 {
    1
}

fn default_played_at() -> bson::DateTime {
    bson::DateTime::now()
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardScoreView {
    pub id: String,
    pub username: String,
    pub score: i64,
    pub level: Difficulty,
    pub time_remaining: i64,
    pub puzzles_solved: i64,
    pub played_at: chrono::DateTime<chrono::Utc>,
}

impl LeaderboardScoreView {
    pub fn from_entry(entry: &ScoreEntry) -> LeaderboardScoreView {
        LeaderboardScoreView {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: entry.username.clone(),
            score: entry.score,
            level: entry.level,
            time_remaining: entry.time_remaining,
            puzzles_solved: entry.puzzles_solved,
            played_at: entry.played_at.to_chrono(),
        }
    }
}

/// Per-player history rows leave the username out, the caller already
/// knows whose scores these are.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScoreView {
    pub id: String,
    pub score: i64,
    pub level: Difficulty,
    pub time_remaining: i64,
    pub puzzles_solved: i64,
    pub played_at: chrono::DateTime<chrono::Utc>,
}

impl PlayerScoreView {
    pub fn from_entry(entry: &ScoreEntry) -> PlayerScoreView {
        PlayerScoreView {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            score: entry.score,
            level: entry.level,
            time_remaining: entry.time_remaining,
            puzzles_solved: entry.puzzles_solved,
            played_at: entry.played_at.to_chrono(),
        }
    }
}
