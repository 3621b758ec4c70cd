//! Persistence layer: flat-file account store

pub mod users;

pub use users::{hash_password, normalize_email, StoreError, UserRecord, UserStore};
