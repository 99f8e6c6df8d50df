//! Application session state.
//!
//! The console tracks its own lightweight "is logged in" flag in a small
//! JSON file under the user's home directory. The backend client is never
//! consulted for session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub active: bool,
    pub opened_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A freshly opened session, stamped now.
    pub fn open() -> Self {
        Session {
            active: true,
            opened_at: Some(Utc::now()),
        }
    }

    /// Loads session state from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let session: Session = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(session)
    }

    /// Saves the session to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the session file. Clearing an absent file is not an error.
    pub fn clear(path: &Path) -> Result<(), io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Whether an active session is recorded at the given path.
    pub fn is_active(path: &Path) -> bool {
        Session::load_from_file(path)
            .map(|s| s.active)
            .unwrap_or(false)
    }
}

/// The session file path under the user's home directory. Respects a
/// `HOME` override, which tests use to sandbox themselves.
pub fn get_session_path() -> Result<PathBuf, io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
    })?;
    Ok(home.join(".welux-admin").join("session.json"))
}
