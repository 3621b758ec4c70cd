//! In-memory session authority
//!
//! Maps opaque UUIDv4 tokens to the signed-in identity. Sessions live for
//! the browser session or until the process restarts; nothing is persisted.
//! Handlers resolve the cookie jar to a validated [`SessionUser`] up front
//! instead of reading ambient global state.

use std::collections::HashMap;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "learnly_session";

/// Identity bound to a session token
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

/// Token-to-identity map guarding all authenticated endpoints
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for `user`, returning the opaque token
    pub async fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), user);
        token
    }

    /// Look up the identity behind a token
    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Drop a session (sign-out)
    pub async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Resolve the request's cookie jar to an identity, if any
    pub async fn lookup(&self, jar: &CookieJar) -> Option<SessionUser> {
        let cookie = jar.get(SESSION_COOKIE)?;
        self.get(cookie.value()).await
    }

    /// Resolve the request's cookie jar to an identity, or fail Unauthorized
    pub async fn authenticate(&self, jar: &CookieJar) -> Result<SessionUser, ApiError> {
        self.lookup(jar).await.ok_or(ApiError::Unauthorized)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the session cookie carrying `token`
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to clear the session on sign-out
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}
