use actix_web::web;

use crate::controllers::leaderboard_controller::{
    get_my_scores, get_stats, get_top_scores, get_user_scores, submit_score,
};

pub fn configure_leaderboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/leaderboard/score", web::post().to(submit_score))
        .route("/api/leaderboard/top", web::get().to(get_top_scores))
        .route(
            "/api/leaderboard/user/{user_id}",
            web::get().to(get_user_scores),
        )
        .route("/api/leaderboard/my-scores", web::get().to(get_my_scores))
        .route("/api/leaderboard/stats", web::get().to(get_stats));
}
