use actix_web::{web, HttpResponse};
use bson::oid::ObjectId;
use mongodb::Client;

use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_TOP_LIMIT};
use crate::errors::ApiError;
use crate::models::api_response::{data_response, success_response_with_data};
use crate::models::difficulty::Difficulty;
use crate::models::leaderboard::{
    LeaderboardPayload, ScoreHistoryPayload, ScoreHistoryQuery, SubmitScorePayload,
    SubmitScoreRequest, TopScoresQuery,
};
use crate::models::score::{LeaderboardScoreView, PlayerScoreView, ScoreEntry};
use crate::services::auth_service::AuthenticatedUser;
use crate::services::leaderboard_service::{
    fetch_leaderboard_stats, fetch_top_scores, fetch_user_scores, insert_score, scores_collection,
};
use crate::services::user_service::{find_by_id, record_submission, users_collection};
use crate::utils::validation::{optional_non_negative, parse_limit};

/// POST /api/leaderboard/score. Stores the finished game and folds it into
/// the player's profile.
pub async fn submit_score(
    client: web::Data<Client>,
    auth: AuthenticatedUser,
    body: web::Json<SubmitScoreRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.score < 0 {
        return Err(ApiError::Validation(
            "Score must be a positive number".to_string(),
        ));
    }
    let level = Difficulty::parse(&body.level)
        .ok_or_else(|| ApiError::Validation("Invalid level".to_string()))?;
    let time_remaining = optional_non_negative(body.time_remaining)?;
    let puzzles_solved = optional_non_negative(body.puzzles_solved)?;

    let users = users_collection(&client);
    let user = find_by_id(&users, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Token is not valid".to_string()))?;

    let mut entry = ScoreEntry {
        id: None,
        user: auth.user_id,
        username: user.username.clone(),
        score: body.score,
        level,
        time_remaining: time_remaining.unwrap_or(0),
        puzzles_solved: puzzles_solved.unwrap_or(1),
        played_at: bson::DateTime::now(),
    };

    let scores = scores_collection(&client);
    let score_id = insert_score(&scores, &entry).await?;
    entry.id = Some(score_id);

    let (_, is_new_high_score) = record_submission(&users, &user, body.score).await?;

    Ok(HttpResponse::Created().json(success_response_with_data(
        "Score submitted successfully! 🏆",
        SubmitScorePayload {
            score: LeaderboardScoreView::from_entry(&entry),
            is_new_high_score,
        },
    )))
}

/// GET /api/leaderboard/top. An unknown level filter is ignored rather
/// than rejected.
pub async fn get_top_scores(
    client: web::Data<Client>,
    query: web::Query<TopScoresQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_TOP_LIMIT);
    let level = query.level.as_deref().and_then(Difficulty::parse);

    let scores = scores_collection(&client);
    let entries = fetch_top_scores(&scores, level, limit).await?;
    let leaderboard: Vec<LeaderboardScoreView> =
        entries.iter().map(LeaderboardScoreView::from_entry).collect();

    let count = leaderboard.len();
    Ok(HttpResponse::Ok().json(data_response(LeaderboardPayload { leaderboard, count })))
}

/// GET /api/leaderboard/user/{user_id}.
pub async fn get_user_scores(
    client: web::Data<Client>,
    path: web::Path<String>,
    query: web::Query<ScoreHistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = ObjectId::parse_str(path.as_str())
        .map_err(|_| ApiError::Validation("Invalid user id".to_string()))?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_HISTORY_LIMIT);

    let scores = scores_collection(&client);
    let entries = fetch_user_scores(&scores, user_id, limit).await?;
    let scores: Vec<PlayerScoreView> = entries.iter().map(PlayerScoreView::from_entry).collect();

    let count = scores.len();
    Ok(HttpResponse::Ok().json(data_response(ScoreHistoryPayload { scores, count })))
}

/// GET /api/leaderboard/my-scores.
pub async fn get_my_scores(
    client: web::Data<Client>,
    auth: AuthenticatedUser,
    query: web::Query<ScoreHistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_HISTORY_LIMIT);

    let scores = scores_collection(&client);
    let entries = fetch_user_scores(&scores, auth.user_id, limit).await?;
    let scores: Vec<PlayerScoreView> = entries.iter().map(PlayerScoreView::from_entry).collect();

    let count = scores.len();
    Ok(HttpResponse::Ok().json(data_response(ScoreHistoryPayload { scores, count })))
}

/// GET /api/leaderboard/stats.
pub async fn get_stats(client: web::Data<Client>) -> Result<HttpResponse, ApiError> {
    let stats =
        fetch_leaderboard_stats(&users_collection(&client), &scores_collection(&client)).await?;
    Ok(HttpResponse::Ok().json(data_response(stats)))
}
