//! Flat-file account store
//!
//! Accounts live in a single JSON object keyed by normalized email. The
//! whole map is read and rewritten in full on every mutation. A store-level
//! mutex serializes those read-modify-write cycles so concurrent signups in
//! one process cannot silently drop each other's writes.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Account store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User already exists with this email")]
    Duplicate,

    #[error("User store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// A stored account record (value side of the email-keyed map)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub password_hash: String,
    pub created_at: String,
    pub last_login: Option<String>,
}

/// Flat-file account store keyed by normalized email
pub struct UserStore {
    path: PathBuf,
    /// Serializes load-mutate-save cycles
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the full account map; a missing file is an empty store
    pub async fn load(&self) -> Result<HashMap<String, UserRecord>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, users: &HashMap<String, UserRecord>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(users)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Find an account by normalized email
    pub async fn find(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.load().await?.get(email).cloned())
    }

    /// Create an account, failing with [`StoreError::Duplicate`] if the
    /// email is already registered
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        let record = UserRecord {
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now().to_rfc3339(),
            last_login: None,
        };
        users.insert(email.to_string(), record.clone());
        self.save(&users).await?;

        Ok(record)
    }

    /// Stamp `last_login` for an existing account
    pub async fn record_login(&self, email: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if let Some(record) = users.get_mut(email) {
            record.last_login = Some(Utc::now().to_rfc3339());
            self.save(&users).await?;
        }
        Ok(())
    }
}

/// Normalize an email address for use as a store key
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// SHA-256 hex digest of a password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
