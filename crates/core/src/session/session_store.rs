use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, RwLock},
};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::users::AuthSession;

const CURRENT_VERSION: u32 = 1;

/// Persistence for the signed-in session.
pub trait SessionStoreTrait: Send + Sync {
    /// Returns the stored session, or `None` when signed out.
    fn load(&self) -> Result<Option<AuthSession>>;
    fn save(&self, session: &AuthSession) -> Result<()>;
    /// Removes any stored session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStoreTrait for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>> {
        let guard = self
            .session
            .read()
            .map_err(|_| Error::Session("Session lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Session("Session lock poisoned".into()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Session("Session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    version: u32,
    session: AuthSession,
}

/// Session store backed by a JSON file, so a login survives between CLI runs.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Session("Session file lock poisoned".into()))
    }
}

impl SessionStoreTrait for FileSessionStore {
    fn load(&self) -> Result<Option<AuthSession>> {
        let _guard = self.guard()?;

        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &self.path, e)),
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_slice(&raw).map_err(|e| {
            Error::Session(format!(
                "Session file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })?;
        if stored.version != CURRENT_VERSION {
            log::warn!(
                "[SessionStore] Ignoring session file with unsupported version {}",
                stored.version
            );
            return Ok(None);
        }
        Ok(Some(stored.session))
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        let _guard = self.guard()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
            }
        }

        let stored = StoredSession {
            version: CURRENT_VERSION,
            session: session.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json).map_err(|e| io_error("write", &self.path, e))
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.guard()?;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &self.path, e)),
        }
    }
}

fn io_error(action: &str, path: &Path, err: io::Error) -> Error {
    Error::Session(format!("Failed to {} {}: {}", action, path.display(), err))
}
