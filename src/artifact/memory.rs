//! In-process session

use crate::artifact::{Artifact, ToolContext};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// Session kept entirely in memory
#[derive(Debug, Default)]
pub struct MemorySession {
    artifacts: Mutex<HashMap<String, Vec<Artifact>>>,
    state: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of versions saved under `name`
    pub fn version_count(&self, name: &str) -> usize {
        self.artifacts
            .lock()
            .map(|a| a.get(name).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("session lock poisoned".to_string())
}

#[async_trait]
impl ToolContext for MemorySession {
    async fn save_artifact(&self, name: &str, content: &str) -> Result<u64> {
        let mut artifacts = self.artifacts.lock().map_err(poisoned)?;
        let versions = artifacts.entry(name.to_string()).or_default();
        let version = versions.len() as u64;
        versions.push(Artifact {
            name: name.to_string(),
            version,
            content: content.to_string(),
            saved_at: Utc::now(),
        });
        Ok(version)
    }

    async fn load_artifact(&self, name: &str) -> Result<Option<Artifact>> {
        let artifacts = self.artifacts.lock().map_err(poisoned)?;
        Ok(artifacts.get(name).and_then(|v| v.last()).cloned())
    }

    fn get_state(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set_state(&self, key: &str, value: &str) -> Result<()> {
        self.state
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
