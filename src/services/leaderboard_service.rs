use bson::{doc, oid::ObjectId, Document};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection};

use crate::constants::{DB_NAME, SCORES_COLL};
use crate::errors::ApiError;
use crate::models::difficulty::Difficulty;
use crate::models::leaderboard::{LeaderboardStats, TopPlayer};
use crate::models::score::ScoreEntry;
use crate::models::user::User;

pub fn scores_collection(client: &Client) -> Collection<ScoreEntry> {
    client.database(DB_NAME).collection(SCORES_COLL)
}

pub async fn insert_score(
    collection: &Collection<ScoreEntry>,
    entry: &ScoreEntry,
) -> Result<ObjectId, ApiError> {
    let result = collection.insert_one(entry).await?;
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::Internal("inserted score id was not an ObjectId".to_string()))
}

pub fn level_filter(level: Option<Difficulty>) -> Document {
    match level {
        Some(level) => doc! { "level": level.as_str() },
        None => doc! {},
    }
}

/// Best scores first; ties broken by the most recent game.
pub async fn fetch_top_scores(
    collection: &Collection<ScoreEntry>,
    level: Option<Difficulty>,
    limit: i64,
) -> Result<Vec<ScoreEntry>, ApiError> {
    let mut cursor = collection
        .find(level_filter(level))
        .sort(doc! { "score": -1, "played_at": -1 })
        .limit(limit)
        .await?;

    let mut entries = Vec::new();
    while let Some(entry) = cursor.try_next().await? {
        entries.push(entry);
    }
    Ok(entries)
}

pub async fn fetch_user_scores(
    collection: &Collection<ScoreEntry>,
    user_id: ObjectId,
    limit: i64,
) -> Result<Vec<ScoreEntry>, ApiError> {
    let mut cursor = collection
        .find(doc! { "user": user_id })
        .sort(doc! { "played_at": -1 })
        .limit(limit)
        .await?;

    let mut entries = Vec::new();
    while let Some(entry) = cursor.try_next().await? {
        entries.push(entry);
    }
    Ok(entries)
}

pub fn average_score_pipeline() -> Vec<Document> {
    vec![doc! { "$group": { "_id": null, "avgScore": { "$avg": "$score" } } }]
}

pub async fn fetch_average_score(collection: &Collection<ScoreEntry>) -> Result<i64, ApiError> {
    let mut cursor = collection.aggregate(average_score_pipeline()).await?;
    let average = match cursor.try_next().await? {
        Some(group) => group.get_f64("avgScore").unwrap_or(0.0).round() as i64,
        None => 0,
    };
    Ok(average)
}

pub async fn fetch_leaderboard_stats(
    users: &Collection<User>,
    scores: &Collection<ScoreEntry>,
) -> Result<LeaderboardStats, ApiError> {
    let total_players = users.count_documents(doc! {}).await? as i64;
    let total_games = scores.count_documents(doc! {}).await? as i64;
    let avg_score = fetch_average_score(scores).await?;
    let top_player = users
        .find_one(doc! {})
        .sort(doc! { "high_score": -1 })
        .await?
        .map(|user| TopPlayer {
            username: user.username,
            high_score: user.high_score,
        });

    Ok(LeaderboardStats {
        total_players,
        total_games,
        avg_score,
        top_player,
    })
}
