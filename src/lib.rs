//! Backend for the Banana Beast puzzle game: token auth, score submission
//! and leaderboards over MongoDB, plus the game session engine.

pub mod config;
pub mod constants;
pub mod controllers;
pub mod errors;
pub mod game;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
