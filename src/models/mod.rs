pub mod api_response;
pub mod auth;
pub mod difficulty;
pub mod leaderboard;
pub mod puzzle;
pub mod score;
pub mod user;
