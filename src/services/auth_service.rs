use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::constants::TOKEN_TTL_DAYS;
use crate::errors::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies the bearer tokens handed out at registration and
/// login. A token is `base64url(claims).base64url(hmac-sha256(claims))`.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> TokenSigner {
        TokenSigner {
            secret: secret.into(),
        }
    }

    pub fn from_env() -> TokenSigner {
        let secret = std::env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set");
        TokenSigner::new(secret)
    }

    pub fn issue(&self, user_id: ObjectId) -> String {
        let now = Utc::now();
        let claims = serde_json::json!({
            "sub": user_id.to_hex(),
            "iat": now.timestamp(),
            "exp": (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        })
        .to_string();
        let payload = URL_SAFE_NO_PAD.encode(claims);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));
        format!("{payload}.{signature}")
    }

    /// Checks signature and expiry, returning the user id the token was
    /// issued for.
    pub fn authenticate(&self, token: &str) -> Result<ObjectId, ApiError> {
        let (payload, signature) = token.split_once('.').ok_or_else(invalid_token)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| invalid_token())?;
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| invalid_token())?;

        let claims = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| invalid_token())?;
        let claims: Claims = serde_json::from_slice(&claims).map_err(|_| invalid_token())?;
        if claims.exp < Utc::now().timestamp() {
            return Err(invalid_token());
        }
        ObjectId::parse_str(&claims.sub).map_err(|_| invalid_token())
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

fn invalid_token() -> ApiError {
    ApiError::Unauthorized("Token is not valid".to_string())
}

fn missing_token() -> ApiError {
    ApiError::Unauthorized("No token, authorization denied".to_string())
}

/// Request guard for endpoints that need a signed-in player. Pulls the
/// Bearer token out of the Authorization header and verifies it.
#[derive(Clone, Copy, Debug)]
pub struct AuthenticatedUser {
    pub user_id: ObjectId,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let signer = req
        .app_data::<web::Data<TokenSigner>>()
        .ok_or_else(|| ApiError::Internal("token signer is not configured".to_string()))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(missing_token)?;
    let token = header.strip_prefix("Bearer ").ok_or_else(missing_token)?;
    let user_id = signer.authenticate(token)?;
    Ok(AuthenticatedUser { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn forged(signer: &TokenSigner, claims: serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signature = URL_SAFE_NO_PAD.encode(signer.sign(payload.as_bytes()));
        format!("{payload}.{signature}")
    }

    #[test]
    fn issued_tokens_verify() {
        let signer = TokenSigner::new("test-secret");
        let user_id = ObjectId::new();
        let token = signer.issue(user_id);
        assert_eq!(signer.authenticate(&token).unwrap(), user_id);
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue(ObjectId::new());

        let mut tampered = token.clone();
        tampered.insert(1, 'x');
        assert!(signer.authenticate(&tampered).is_err());
        assert!(signer.authenticate("no-dot-in-here").is_err());
        assert!(signer.authenticate("").is_err());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let signer = TokenSigner::new("test-secret");
        let other = TokenSigner::new("other-secret");
        let token = other.issue(ObjectId::new());
        assert!(signer.authenticate(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let signer = TokenSigner::new("test-secret");
        let token = forged(
            &signer,
            serde_json::json!({
                "sub": ObjectId::new().to_hex(),
                "iat": 0,
                "exp": 1,
            }),
        );
        assert!(signer.authenticate(&token).is_err());
    }

    #[test]
    fn claims_must_carry_a_valid_object_id() {
        let signer = TokenSigner::new("test-secret");
        let token = forged(
            &signer,
            serde_json::json!({
                "sub": "not-an-object-id",
                "exp": Utc::now().timestamp() + 60,
            }),
        );
        assert!(signer.authenticate(&token).is_err());
    }

    #[actix_web::test]
    async fn extractor_accepts_a_bearer_token() {
        let signer = TokenSigner::new("test-secret");
        let user_id = ObjectId::new();
        let token = signer.issue(user_id);

        let req = TestRequest::default()
            .app_data(web::Data::new(signer))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();
        let auth = AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(auth.user_id, user_id);
    }

    #[actix_web::test]
    async fn extractor_rejects_a_missing_header() {
        let req = TestRequest::default()
            .app_data(web::Data::new(TokenSigner::new("test-secret")))
            .to_http_request();
        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn extractor_rejects_non_bearer_schemes() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue(ObjectId::new());

        let req = TestRequest::default()
            .app_data(web::Data::new(signer))
            .insert_header((AUTHORIZATION, format!("Basic {token}")))
            .to_http_request();
        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }
}
