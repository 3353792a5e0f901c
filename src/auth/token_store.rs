use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The companion `user` record cached next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub id: String,
    pub nome: String,
    pub email: String,
}

/// Single source of truth for the bearer credential.
///
/// `get` never fails: storage problems read as "no token". Expiry is not
/// checked here, see [`crate::auth::session`].
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> io::Result<()>;
    /// Removes the token and the cached user.
    fn clear(&self) -> io::Result<()>;
    fn user(&self) -> Option<CachedUser>;
    fn set_user(&self, user: &CachedUser) -> io::Result<()>;
}

/// On-disk layout, keyed the same way as the browser storage it replaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<CachedUser>,
}

/// Persists the session as a small JSON document (`{"token": .., "user": ..}`).
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoredSession {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return StoredSession::default(),
            Err(e) => {
                log::warn!("Token store {} unreadable: {}", self.path.display(), e);
                return StoredSession::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Token store {} is corrupt, ignoring: {}", self.path.display(), e);
            StoredSession::default()
        })
    }

    fn save(&self, session: &StoredSession) -> io::Result<()> {
        if session.token.is_none() && session.user.is_none() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    fn modify(&self, f: impl FnOnce(&mut StoredSession)) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut session = self.load();
        f(&mut session);
        self.save(&session)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load().token.filter(|t| !t.trim().is_empty())
    }

    fn set(&self, token: &str) -> io::Result<()> {
        self.modify(|s| s.token = Some(token.to_string()))
    }

    fn clear(&self) -> io::Result<()> {
        self.modify(|s| *s = StoredSession::default())
    }

    fn user(&self) -> Option<CachedUser> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load().user
    }

    fn set_user(&self, user: &CachedUser) -> io::Result<()> {
        self.modify(|s| s.user = Some(user.clone()))
    }
}

/// Process-local store, used by tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<StoredSession>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            inner: Mutex::new(StoredSession {
                token: Some(token.to_string()),
                user: None,
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.token.clone().filter(|t| !t.trim().is_empty())
    }

    fn set(&self, token: &str) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = StoredSession::default();
        Ok(())
    }

    fn user(&self) -> Option<CachedUser> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.user.clone()
    }

    fn set_user(&self, user: &CachedUser) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.user = Some(user.clone());
        Ok(())
    }
}
