//! Session persistence
//!
//! The whole engine state is saved as one JSON document after every decision,
//! so a comparison run can be stopped and resumed later.

use crate::engine::Engine;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub engine: Engine,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            engine,
        }
    }

    /// Default session file: ~/.local/share/comparinator/session.json
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("comparinator")
            .join("session.json")
    }

    /// Load a session and check its engine state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Session(format!(
                "no session found at {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&content)?;
        session.engine.validate()?;

        log::info!(
            "Loaded session from {} ({} considering, {} current, {} cut)",
            path.display(),
            session.engine.considering_len(),
            session.engine.current_len(),
            session.engine.cut_len()
        );
        Ok(session)
    }

    /// Save the session, replacing the file atomically
    pub fn save(&mut self, path: &Path) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        self.updated_at = Utc::now();
        let content = serde_json::to_string_pretty(self)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, path)?;

        log::debug!("Saved session to {}", path.display());
        Ok(())
    }
}
