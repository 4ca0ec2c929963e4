use actix_web::web;

use crate::routes::auth_routes::configure_auth_routes;
use crate::routes::leaderboard_routes::configure_leaderboard_routes;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_leaderboard_routes(cfg);
}
