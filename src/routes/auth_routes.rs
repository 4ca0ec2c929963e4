use actix_web::web;

use crate::controllers::auth_controller::{login, me, register};

pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/auth/register", web::post().to(register))
        .route("/api/auth/login", web::post().to(login))
        .route("/api/auth/me", web::get().to(me));
}
