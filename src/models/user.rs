use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A player document as stored in the `users` collection.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub high_score: i64,
    #[serde(default)]
    pub total_games_played: i64,
    #[serde(default = "default_created_at")]
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<bson::DateTime>,
}

fn default_created_at() -> bson::DateTime {
    bson::DateTime::now()
}

pub fn new_user(username: String, password_hash: Option<String>) -> User {
    User {
        id: None,
        username,
        password_hash,
        high_score: 0,
        total_games_played: 0,
        created_at: bson::DateTime::now(),
        last_played: None,
    }
}

/// The client-facing shape of a user. Registration and login reply with the
/// summary form; `/me` adds the timestamps.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub high_score: i64,
    pub total_games_played: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    pub fn summary(user: &User) -> UserProfile {
        UserProfile {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username.clone(),
            high_score: user.high_score,
            total_games_played: user.total_games_played,
            created_at: None,
            last_played: None,
        }
    }

    pub fn detailed(user: &User) -> UserProfile {
        UserProfile {
            created_at: Some(user.created_at.to_chrono()),
            last_played: user.last_played.map(|at| at.to_chrono()),
            ..UserProfile::summary(user)
        }
    }
}
