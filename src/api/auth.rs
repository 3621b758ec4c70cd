//! Account and session endpoints: signup, signin, signout, check
//!
//! All field validation mirrors the account-store contract: emails are
//! normalized (trimmed, lower-cased) before use as store keys, passwords
//! are hashed with SHA-256, and credential failures are reported with one
//! uniform message so callers cannot enumerate registered emails.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{hash_password, normalize_email};
use crate::error::{ApiError, Result};
use crate::session::{removal_cookie, session_cookie, SessionUser};
use crate::AppState;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email pattern"));

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthUser {
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    success: bool,
    message: String,
    user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct SignoutResponse {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<CheckedUser>,
}

#[derive(Debug, Serialize)]
pub struct CheckedUser {
    email: String,
    name: String,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let name = req.name.trim().to_string();
    let email = normalize_email(&req.email);

    if name.is_empty() || email.is_empty() || req.password.is_empty() || req.confirm_password.is_empty()
    {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    if req.password != req.confirm_password {
        return Err(ApiError::BadRequest("Passwords do not match".to_string()));
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if !EMAIL_PATTERN.is_match(&email) {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    state
        .users
        .create(&email, &name, &hash_password(&req.password))
        .await?;

    info!(email = %email, "New account registered");

    let token = state
        .sessions
        .create(SessionUser {
            email: email.clone(),
            name: name.clone(),
        })
        .await;

    Ok((
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            success: true,
            message: "Account created successfully".to_string(),
            user: AuthUser { name, email },
        }),
    ))
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SigninRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let email = normalize_email(&req.email);

    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let record = state
        .users
        .find(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if record.password_hash != hash_password(&req.password) {
        return Err(ApiError::InvalidCredentials);
    }

    state.users.record_login(&email).await?;

    info!(email = %email, "User signed in");

    let token = state
        .sessions
        .create(SessionUser {
            email: email.clone(),
            name: record.name.clone(),
        })
        .await;

    Ok((
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            success: true,
            message: "Login successful".to_string(),
            user: AuthUser {
                name: record.name,
                email,
            },
        }),
    ))
}

/// POST /api/auth/signout
pub async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SignoutResponse>) {
    if let Some(cookie) = jar.get(crate::session::SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    (
        jar.remove(removal_cookie()),
        Json(SignoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// GET /api/auth/check
pub async fn check_auth(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<AuthCheckResponse> {
    match state.sessions.lookup(&jar).await {
        Some(user) => Json(AuthCheckResponse {
            authenticated: true,
            user: Some(CheckedUser {
                email: user.email,
                name: user.name,
            }),
        }),
        None => Json(AuthCheckResponse {
            authenticated: false,
            user: None,
        }),
    }
}
