use actix_web::{web, HttpResponse};
use mongodb::Client;

use crate::errors::ApiError;
use crate::models::api_response::{data_response, success_response_with_data};
use crate::models::auth::{AuthPayload, LoginRequest, MePayload, RegisterRequest};
use crate::models::user::{new_user, UserProfile};
use crate::services::auth_service::{AuthenticatedUser, TokenSigner};
use crate::services::user_service::{
    find_by_id, find_by_username, insert_user, require_id, touch_last_played, users_collection,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{normalize_username, validate_password, validate_username};

/// POST /api/auth/register. The password is optional; accounts created
/// without one are casual profiles anyone can log into by name.
pub async fn register(
    client: web::Data<Client>,
    signer: web::Data<TokenSigner>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let username = normalize_username(&body.username);
    validate_username(&username)?;

    let password = body
        .password
        .as_deref()
        .map(str::trim)
        .filter(|password| !password.is_empty());
    if let Some(password) = password {
        validate_password(password)?;
    }

    let collection = users_collection(&client);
    if find_by_username(&collection, &username).await?.is_some() {
        return Err(ApiError::Validation("Username already exists".to_string()));
    }

    let password_hash = password.map(hash_password).transpose()?;
    let mut user = new_user(username, password_hash);
    let user_id = insert_user(&collection, &user).await?;
    user.id = Some(user_id);

    let token = signer.issue(user_id);
    Ok(HttpResponse::Created().json(success_response_with_data(
        "User registered successfully! 🎉",
        AuthPayload {
            token,
            user: UserProfile::summary(&user),
        },
    )))
}

/// POST /api/auth/login.
pub async fn login(
    client: web::Data<Client>,
    signer: web::Data<TokenSigner>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let username = normalize_username(&body.username);
    if username.is_empty() {
        return Err(ApiError::Validation("Username is required".to_string()));
    }

    let collection = users_collection(&client);
    let user = find_by_username(&collection, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Some(stored_hash) = &user.password_hash {
        let supplied = body.password.as_deref().map(str::trim).unwrap_or_default();
        if !verify_password(supplied, stored_hash) {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    }

    let user_id = require_id(&user)?;
    touch_last_played(&collection, user_id).await?;

    let token = signer.issue(user_id);
    Ok(HttpResponse::Ok().json(success_response_with_data(
        "Login successful! 🐵",
        AuthPayload {
            token,
            user: UserProfile::summary(&user),
        },
    )))
}

/// GET /api/auth/me.
pub async fn me(
    client: web::Data<Client>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let collection = users_collection(&client);
    let user = find_by_id(&collection, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Token is not valid".to_string()))?;

    Ok(HttpResponse::Ok().json(data_response(MePayload {
        user: UserProfile::detailed(&user),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::routes::auth_routes::configure_auth_routes;

    // The driver connects lazily, so no database is needed for requests
    // that are rejected before any query runs.
    async fn test_client() -> Client {
        Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn register_rejects_short_usernames() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_client().await))
                .app_data(web::Data::new(TokenSigner::new("test-secret")))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "ab" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["message"],
            json!("Username must be between 3 and 30 characters")
        );
    }

    #[actix_web::test]
    async fn register_rejects_invalid_characters() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_client().await))
                .app_data(web::Data::new(TokenSigner::new("test-secret")))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "bad name!" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            json!("Username can only contain letters, numbers, and underscores")
        );
    }

    #[actix_web::test]
    async fn register_rejects_short_passwords() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_client().await))
                .app_data(web::Data::new(TokenSigner::new("test-secret")))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "banana_fan", "password": "abc" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], json!("Password must be at least 6 characters"));
    }

    #[actix_web::test]
    async fn login_requires_a_username() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_client().await))
                .app_data(web::Data::new(TokenSigner::new("test-secret")))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], json!("Username is required"));
    }

    #[actix_web::test]
    async fn me_requires_a_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_client().await))
                .app_data(web::Data::new(TokenSigner::new("test-secret")))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], json!("No token, authorization denied"));
    }
}
