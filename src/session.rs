//! Identity storage.
//!
//! The only session state is the user identifier, kept in `session.json`
//! inside the data directory. Every store is scoped by it; without one the
//! stores run in anonymous mode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable that overrides the stored user id
pub const USER_ID_ENV: &str = "PANTRY_USER_ID";

/// Session data structure stored in session.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: String,
}

/// Where the current user id came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Environment,
    SessionFile,
}

pub struct SessionStore {
    session_path: PathBuf,
    env_user: Option<String>,
}

impl SessionStore {
    /// Create a session store rooted at `data_dir`, reading the
    /// `PANTRY_USER_ID` override from the environment.
    pub fn new(data_dir: &Path) -> Result<Self> {
        Self::with_env_user(data_dir, std::env::var(USER_ID_ENV).ok())
    }

    pub fn with_env_user(data_dir: &Path, env_user: Option<String>) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

        Ok(Self {
            session_path: data_dir.join("session.json"),
            env_user: env_user
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        })
    }

    #[allow(dead_code)]
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    /// Current user id and its origin. Environment wins over the file.
    pub fn current(&self) -> Option<(String, IdentitySource)> {
        if let Some(user) = &self.env_user {
            return Some((user.clone(), IdentitySource::Environment));
        }
        self.read_session_file()
            .map(|s| (s.user_id, IdentitySource::SessionFile))
    }

    pub fn current_user(&self) -> Option<String> {
        self.current().map(|(user, _)| user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    fn read_session_file(&self) -> Option<SessionData> {
        if !self.session_path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.session_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read session file: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<SessionData>(&content) {
            Ok(session) if !session.user_id.trim().is_empty() => Some(session),
            Ok(_) => {
                warn!("Session file has an empty user id, ignoring it");
                None
            }
            Err(e) => {
                warn!("Failed to parse session JSON: {}", e);
                None
            }
        }
    }

    /// Persist `user_id` as the signed-in user.
    pub fn login(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            anyhow::bail!("User id cannot be empty");
        }

        let session = SessionData {
            user_id: user_id.to_string(),
        };
        let content =
            serde_json::to_string_pretty(&session).context("Failed to serialize session data")?;
        std::fs::write(&self.session_path, content)
            .with_context(|| format!("Failed to write session file: {:?}", self.session_path))?;

        info!("Signed in as {}", user_id);
        debug!("Session saved to {:?}", self.session_path);
        Ok(())
    }

    /// Remove the stored session. Stored records are kept.
    pub fn logout(&self) -> Result<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path).with_context(|| {
                format!("Failed to remove session file: {:?}", self.session_path)
            })?;
        }
        info!("Session removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_store_is_anonymous() {
        let tmp = tempdir().unwrap();
        let store = SessionStore::with_env_user(tmp.path(), None).unwrap();
        assert!(!store.is_logged_in());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_login_and_logout() {
        let tmp = tempdir().unwrap();
        let store = SessionStore::with_env_user(tmp.path(), None).unwrap();

        store.login("  cook42 ").unwrap();
        assert_eq!(
            store.current(),
            Some(("cook42".to_string(), IdentitySource::SessionFile))
        );
        assert!(store.session_path().exists());

        store.logout().unwrap();
        assert!(!store.session_path().exists());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_login_rejects_blank_id() {
        let tmp = tempdir().unwrap();
        let store = SessionStore::with_env_user(tmp.path(), None).unwrap();
        assert!(store.login("   ").is_err());
    }

    #[test]
    fn test_env_user_takes_priority() {
        let tmp = tempdir().unwrap();
        let store = SessionStore::with_env_user(tmp.path(), Some("from-env".into())).unwrap();
        store.login("from-file").unwrap();
        assert_eq!(
            store.current(),
            Some(("from-env".to_string(), IdentitySource::Environment))
        );
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("session.json"), "{oops").unwrap();
        let store = SessionStore::with_env_user(tmp.path(), None).unwrap();
        assert!(store.current_user().is_none());
    }
}
