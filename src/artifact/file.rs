//! Directory-backed session
//!
//! Layout:
//! ```text
//! <root>/state.json
//! <root>/artifacts/<name>/v<N>
//! ```
//! Lets the CLI run the writer and publisher as separate processes.

use crate::artifact::{Artifact, ToolContext};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

const STATE_FILE: &str = "state.json";
const ARTIFACTS_DIR: &str = "artifacts";

/// Session persisted under a directory
#[derive(Debug)]
pub struct FileSession {
    root: PathBuf,
    // Guards read-modify-write of state.json within this process
    state_lock: Mutex<()>,
}

impl FileSession {
    /// Open (creating if needed) a session rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(root.join(ARTIFACTS_DIR)).map_err(|e| {
            Error::Storage(format!("cannot create session at {}: {e}", root.display()))
        })?;
        Ok(Self {
            root,
            state_lock: Mutex::new(()),
        })
    }

    /// Session directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove all artifacts and state
    pub fn clear(&self) -> Result<()> {
        let _guard = self
            .state_lock
            .lock()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))?;
        let artifacts = self.root.join(ARTIFACTS_DIR);
        if artifacts.exists() {
            std::fs::remove_dir_all(&artifacts).map_err(storage)?;
        }
        let state = self.root.join(STATE_FILE);
        if state.exists() {
            std::fs::remove_file(&state).map_err(storage)?;
        }
        std::fs::create_dir_all(&artifacts).map_err(storage)?;
        Ok(())
    }

    fn artifact_dir(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(Error::Storage(format!("invalid artifact name: {name:?}")));
        }
        Ok(self.root.join(ARTIFACTS_DIR).join(name))
    }

    fn read_state(&self) -> Result<BTreeMap<String, String>> {
        let path = self.root.join(STATE_FILE);
        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::Storage(format!("corrupt {}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(err: std::io::Error) -> Error {
    Error::Storage(err.to_string())
}

/// Highest `v<N>` file in a directory
async fn latest_version(dir: &Path) -> Result<Option<u64>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage(e)),
    };

    let mut latest = None;
    while let Some(entry) = entries.next_entry().await.map_err(storage)? {
        let name = entry.file_name();
        let version = name
            .to_str()
            .and_then(|n| n.strip_prefix('v'))
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(v) = version {
            latest = latest.max(Some(v));
        }
    }
    Ok(latest)
}

#[async_trait]
impl ToolContext for FileSession {
    async fn save_artifact(&self, name: &str, content: &str) -> Result<u64> {
        let dir = self.artifact_dir(name)?;
        fs::create_dir_all(&dir).await.map_err(storage)?;

        let version = latest_version(&dir).await?.map_or(0, |v| v + 1);
        fs::write(dir.join(format!("v{version}")), content.as_bytes())
            .await
            .map_err(storage)?;

        tracing::debug!(name, version, "saved artifact to {}", dir.display());
        Ok(version)
    }

    async fn load_artifact(&self, name: &str) -> Result<Option<Artifact>> {
        let dir = self.artifact_dir(name)?;
        let Some(version) = latest_version(&dir).await? else {
            return Ok(None);
        };

        let path = dir.join(format!("v{version}"));
        let content = fs::read_to_string(&path).await.map_err(storage)?;
        let saved_at: DateTime<Utc> = fs::metadata(&path)
            .await
            .and_then(|m| m.modified())
            .map_or_else(|_| Utc::now(), DateTime::from);

        Ok(Some(Artifact {
            name: name.to_string(),
            version,
            content,
            saved_at,
        }))
    }

    fn get_state(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_state()?.remove(key))
    }

    fn set_state(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .state_lock
            .lock()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))?;
        let mut state = self.read_state()?;
        state.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&state)?;
        std::fs::write(self.root.join(STATE_FILE), raw).map_err(storage)?;
        Ok(())
    }
}
