//! Session Store
//!
//! The browser keeps the auth cookies for the web console. The CLI has no
//! cookie jar between runs, so it writes them to a small JSON file instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::User;

/// What a login leaves behind
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Session {
    /// `name=value` pairs as sent back in the `Cookie` header
    pub cookies: Vec<String>,
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(cookies: Vec<String>) -> Self {
        Self {
            cookies,
            user: None,
            created_at: Utc::now(),
        }
    }
}

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, or `None` when nobody is logged in
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;

        tracing::debug!(path = ?self.path, "session saved");
        Ok(())
    }

    /// Remove the stored session. Missing files are fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        let session = Session::new(vec!["access_token=abc".to_string(), "logged_in=true".to_string()]);
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.cookies, session.cookies);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Corrupt { .. })));
    }
}
