// src/state.rs

//! Persisted UI state.
//!
//! The browser frontend kept the language choice in local storage; here it
//! lives in a small JSON file next to the config. Writes are atomic
//! (write to temp, then rename).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::locale::Lang;

/// State that survives across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiState {
    /// Active UI language
    #[serde(default)]
    pub language: Lang,

    /// Current history page (1-based), so one-shot page navigation from
    /// the CLI resumes where it left off
    #[serde(default = "defaults::history_page")]
    pub history_page: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            history_page: defaults::history_page(),
        }
    }
}

mod defaults {
    pub fn history_page() -> usize {
        1
    }
}

/// File-backed store for [`UiState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, falling back to defaults when the file is
    /// missing or unreadable.
    pub async fn load_or_default(&self) -> UiState {
        match self.load().await {
            Ok(Some(state)) => state,
            Ok(None) => UiState::default(),
            Err(e) => {
                log::warn!("Failed to load UI state from {:?}: {}", self.path, e);
                UiState::default()
            }
        }
    }

    async fn load(&self) -> Result<Option<UiState>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Persist the state atomically.
    pub async fn save(&self, state: &UiState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
