pub mod auth_routes;
pub mod leaderboard_routes;
