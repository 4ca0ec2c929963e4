use bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};

use crate::constants::{DB_NAME, USERS_COLL};
use crate::errors::ApiError;
use crate::models::user::User;

pub fn users_collection(client: &Client) -> Collection<User> {
    client.database(DB_NAME).collection(USERS_COLL)
}

pub async fn find_by_username(
    collection: &Collection<User>,
    username: &str,
) -> Result<Option<User>, ApiError> {
    let user = collection.find_one(doc! { "username": username }).await?;
    Ok(user)
}

pub async fn find_by_id(
    collection: &Collection<User>,
    user_id: ObjectId,
) -> Result<Option<User>, ApiError> {
    let user = collection.find_one(doc! { "_id": user_id }).await?;
    Ok(user)
}

pub async fn insert_user(collection: &Collection<User>, user: &User) -> Result<ObjectId, ApiError> {
    let result = collection.insert_one(user).await?;
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::Internal("inserted user id was not an ObjectId".to_string()))
}

pub async fn touch_last_played(
    collection: &Collection<User>,
    user_id: ObjectId,
) -> Result<(), ApiError> {
    collection
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "last_played": bson::DateTime::now() } },
        )
        .await?;
    Ok(())
}

/// A submitted score only replaces the stored high score when it is
/// strictly greater; ties keep the earlier run on top.
pub fn bump_high_score(current: i64, submitted: i64) -> (i64, bool) {
    if submitted > current {
        (submitted, true)
    } else {
        (current, false)
    }
}

/// Folds one finished game into the player document: high score, games
/// played, and last-played timestamp.
pub async fn record_submission(
    collection: &Collection<User>,
    user: &User,
    submitted: i64,
) -> Result<(i64, bool), ApiError> {
    let user_id = require_id(user)?;
    let (high_score, is_new_high_score) = bump_high_score(user.high_score, submitted);
    collection
        .update_one(
            doc! { "_id": user_id },
            doc! {
                "$set": {
                    "high_score": high_score,
                    "last_played": bson::DateTime::now(),
                },
                "$inc": { "total_games_played": 1_i64 },
            },
        )
        .await?;
    Ok((high_score, is_new_high_score))
}

pub fn require_id(user: &User) -> Result<ObjectId, ApiError> {
    user.id
        .ok_or_else(|| ApiError::Internal("user document missing _id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_score_replaces_the_record() {
        assert_eq!(bump_high_score(50, 80), (80, true));
    }

    #[test]
    fn equal_score_is_not_a_new_record() {
        assert_eq!(bump_high_score(50, 50), (50, false));
    }

    #[test]
    fn lower_score_keeps_the_record() {
        assert_eq!(bump_high_score(50, 20), (50, false));
    }

    #[test]
    fn first_score_beats_the_zero_default() {
        assert_eq!(bump_high_score(0, 10), (10, true));
    }
}
