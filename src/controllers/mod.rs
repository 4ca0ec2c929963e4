pub mod auth_controller;
pub mod leaderboard_controller;
