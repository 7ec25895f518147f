//! Session/auth gate: maps the opaque session cookie to a user row.
//!
//! Tokens are random, handed to the browser in a cookie, and stored only as
//! a SHA-256 hash. Passwords are hashed with Argon2; the original design
//! this replaces stored them in plaintext.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::{DbPool, User};
use crate::AppState;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "ticklist_session";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random session token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a session row for the user and return the raw token for the cookie.
pub async fn create_session(pool: &DbPool, user_id: i64, ttl_hours: i64) -> sqlx::Result<String> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    let now = Utc::now();
    let expires_at = (now + chrono::Duration::hours(ttl_hours)).to_rfc3339();

    let session_id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&session_id)
    .bind(user_id)
    .bind(&token_hash)
    .bind(&expires_at)
    .bind(now.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(token)
}

/// Invalidate the session bound to this token. A stale or unknown token is
/// not an error; logout is idempotent.
pub async fn destroy_session(pool: &DbPool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
        .bind(hash_token(token))
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve a session token to its user, if the session exists and has not
/// expired.
pub async fn session_user(pool: &DbPool, token: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as(
        r#"
        SELECT u.id, u.username, u.password_hash, u.created_at
        FROM users u
        JOIN sessions s ON s.user_id = u.id
        WHERE s.token_hash = ? AND s.expires_at > ?
        "#,
    )
    .bind(hash_token(token))
    .bind(Utc::now().to_rfc3339())
    .fetch_optional(pool)
    .await
}

/// Resolve the current user from a cookie jar, anonymous as `None`.
pub async fn current_user(pool: &DbPool, jar: &CookieJar) -> sqlx::Result<Option<User>> {
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => session_user(pool, cookie.value()).await,
        None => Ok(None),
    }
}

/// Rejection for gated routes: anonymous requests go back to the login page.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

/// Extractor for the authenticated user on gated routes.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).ok_or(AuthRedirect)?.value().to_string();
        match session_user(&state.db, &token).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => Err(AuthRedirect),
            Err(err) => {
                tracing::error!(error = %err, "session lookup failed");
                Err(AuthRedirect)
            }
        }
    }
}
