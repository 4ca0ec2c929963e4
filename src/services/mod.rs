pub mod auth_service;
pub mod leaderboard_service;
pub mod puzzle_service;
pub mod user_service;
