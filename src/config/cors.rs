use actix_cors::Cors;
use actix_web::http::header;

pub fn configure_cors() -> Cors {
    let origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
    Cors::default()
        .allowed_origin(&origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600) // Cache preflight responses for 1 hour
}
