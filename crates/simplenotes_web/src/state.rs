//! Shared application state injected into handlers at startup.
//!
//! # Invariants
//! - The SQLite connection is the sole shared mutable resource; every
//!   request serializes on its mutex and runs to completion.

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// State shared across handlers; built once in `main` and cloned per route.
#[derive(Clone)]
pub struct AppState {
    /// Single process-wide database connection.
    pub db: Arc<Mutex<Connection>>,
    /// Shared bearer credential; `None` disables authentication.
    pub auth_token: Option<String>,
}

impl AppState {
    /// Wraps a migrated connection and the configured credential.
    pub fn new(conn: Connection, auth_token: Option<String>) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            auth_token,
        }
    }
}
