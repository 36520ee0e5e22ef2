use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use taskboard_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller behind a request that passed [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User e-mail.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Hmac<Sha256>,
    ttl_seconds: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_seconds: i64) -> Result<Self, AppError> {
        let key = Hmac::new_from_slice(secret.as_bytes())
            .map_err(|e| AppError::TokenError(e.to_string()))?;
        Ok(Self { key, ttl_seconds })
    }

    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: email.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };
        claims
            .sign_with_key(&self.key)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }

    /// Check the signature and expiry. Every failure is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims: Claims = token
            .verify_with_key(&self.key)
            .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

        if claims.exp < Utc::now().timestamp() {
            return Err(AppError::Unauthorized("Token expired".into()));
        }
        Ok(claims)
    }
}

/// Middleware accepting `Authorization: Bearer <jwt>` or
/// `Authorization: Basic <base64 email:password>`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = authenticate(&state, request.headers()).await;
    match outcome {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rejected request");
            ApiError(err).into_response()
        }
    }
}

async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header value".into()))?;

    let (scheme, value) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header value".into()))?;

    if scheme.eq_ignore_ascii_case("bearer") {
        let claims = state.tokens.verify(value.trim())?;
        Ok(AuthenticatedUser { email: claims.sub })
    } else if scheme.eq_ignore_ascii_case("basic") {
        let (email, password) = decode_basic(value.trim())?;
        let user = state.users().authenticate(&email, &password).await?;
        Ok(AuthenticatedUser { email: user.email })
    } else {
        Err(AppError::Unauthorized(format!(
            "Unsupported authentication scheme {scheme}"
        )))
    }
}

fn decode_basic(value: &str) -> Result<(String, String), AppError> {
    let invalid = || AppError::Unauthorized("Invalid Basic credentials".into());

    let decoded = STANDARD.decode(value).map_err(|_| invalid())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
    let (email, password) = decoded.split_once(':').ok_or_else(invalid)?;
    Ok((email.to_string(), password.to_string()))
}
