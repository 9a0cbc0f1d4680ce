//! # Session Persistence
//!
//! Saves the navigation stack to `~/.navstack/session.json` on exit and
//! reads it back on the next start.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::screens::Screen;
use crate::core::state::App;
use crate::stack::SavedStack;

const SESSION_FILE: &str = "session.json";

/// What goes on disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub saved_at: DateTime<Utc>,
    pub stack: SavedStack<Screen>,
}

/// Returns `~/.navstack/`, creating it if needed.
pub fn session_dir() -> io::Result<PathBuf> {
    let dir = crate::core::config::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save_session(dir: &Path, stack: SavedStack<Screen>) -> io::Result<()> {
    let record = SessionRecord {
        saved_at: Utc::now(),
        stack,
    };
    atomic_write_json(&dir.join(SESSION_FILE), &record)
}

/// Loads the last session. `Ok(None)` when there is none yet.
pub fn load_session(dir: &Path) -> io::Result<Option<SessionRecord>> {
    let path = dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)?;
    let record: SessionRecord =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(record))
}

/// Builds the app, restoring the last session when asked to. A missing,
/// unreadable or unusable session falls back to a fresh stack.
pub fn open_app(dir: Option<&Path>, restore: bool, max_depth: usize) -> io::Result<App> {
    if restore && let Some(dir) = dir {
        match load_session(dir) {
            Ok(Some(record)) => {
                info!(
                    "Restoring session saved at {}: {:?}",
                    record.saved_at.to_rfc3339(),
                    record.stack.configurations().collect::<Vec<_>>()
                );
                match App::restore(record.stack, max_depth) {
                    Ok(app) => return Ok(app),
                    Err(e) => warn!("Saved session is unusable: {}", e),
                }
            }
            Ok(None) => debug!("No saved session"),
            Err(e) => warn!("Failed to load session: {}", e),
        }
    }
    App::new(max_depth).map_err(|e| io::Error::other(e.to_string()))
}

/// Saves the current stack. Failures are logged, never fatal.
pub fn save_current_session(app: &App, dir: Option<&Path>) {
    let Some(dir) = dir else {
        return;
    };
    match save_session(dir, app.router.save_state()) {
        Ok(()) => debug!("Session saved to {}", dir.display()),
        Err(e) => warn!("Failed to save session: {}", e),
    }
}
