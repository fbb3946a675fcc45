//! Auth token persistence — the client-side cookie of the original web app,
//! rendered as a JSON file with an absolute expiry under the platform data
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a login response: the server hands back an
    /// expiry window in weeks.
    pub fn from_token(token: String, expiration_weeks: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + chrono::Duration::weeks(expiration_weeks),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Stores the session on disk. Absent and expired files both read as "no
/// session"; expired files are removed on load.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform default: `<data dir>/taskboard/session.json`, falling back
    /// to the working directory when the platform reports no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskboard")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let json = serde_json::to_string_pretty(session).context("Failed to encode session")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file at {}", self.path.display()))?;
        Ok(())
    }

    /// Load the stored session. `None` when the file is absent, unreadable
    /// as a session, or expired.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file at {}", self.path.display())
                })
            }
        };
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
                self.delete()?;
                return Ok(None);
            }
        };
        if session.is_expired() {
            self.delete()?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub fn delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to delete session file at {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_file(dir: &TempDir) -> SessionFile {
        SessionFile::new(dir.path().join("session.json"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = session_file(&dir);
        let session = Session::from_token("t0ken".to_string(), 2);

        file.save(&session).unwrap();
        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.token, "t0ken");
        assert!(!loaded.is_expired());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let file = session_file(&dir);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn expired_session_loads_as_none_and_is_removed() {
        let dir = TempDir::new().unwrap();
        let file = session_file(&dir);
        let session = Session {
            token: "stale".to_string(),
            expires_at: Utc::now() - chrono::Duration::days(1),
        };
        file.save(&session).unwrap();

        assert!(file.load().unwrap().is_none());
        assert!(!file.path().exists());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let file = session_file(&dir);
        std::fs::write(file.path(), "not json").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = session_file(&dir);
        file.delete().unwrap();
        file.save(&Session::from_token("t".to_string(), 1)).unwrap();
        file.delete().unwrap();
        file.delete().unwrap();
        assert!(!file.path().exists());
    }
}
