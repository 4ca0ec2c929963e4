use bson::doc;
use dotenv::dotenv;
use mongodb::options::IndexOptions;
use mongodb::{Client, IndexModel};

use crate::constants::{DB_NAME, SCORES_COLL, USERS_COLL};
use crate::models::score::ScoreEntry;
use crate::models::user::User;

pub async fn connect_to_mongodb() -> Client {
    dotenv().ok();

    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());

    match Client::with_uri_str(uri).await {
        Ok(client) => client,
        Err(e) => {
            panic!("Failed to connect to MongoDB: {:?}", e);
        }
    }
}

pub fn get_server_address() -> String {
    let host = std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    format!("{}:{}", host, port)
}

/// Indexes backing the leaderboard queries. Safe to run on every start,
/// existing indexes are left alone.
pub async fn create_indexes(client: &Client) -> Result<(), mongodb::error::Error> {
    let database = client.database(DB_NAME);

    let unique_username = IndexModel::builder()
        .keys(doc! { "username": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    database
        .collection::<User>(USERS_COLL)
        .create_index(unique_username)
        .await?;

    let score_indexes = vec![
        IndexModel::builder()
            .keys(doc! { "score": -1, "played_at": -1 })
            .build(),
        IndexModel::builder()
            .keys(doc! { "user": 1, "score": -1 })
            .build(),
        IndexModel::builder()
            .keys(doc! { "level": 1, "score": -1 })
            .build(),
    ];
    database
        .collection::<ScoreEntry>(SCORES_COLL)
        .create_indexes(score_indexes)
        .await?;

    Ok(())
}
