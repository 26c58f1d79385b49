//! Persistence for the most recent conversation.
//!
//! The data directory holds a single `latest.json` file. It is read when the
//! user passes `--continue` and overwritten after every successful exchange.
//! Nothing is locked: concurrent runs race and the last writer wins.

use crate::conversation::Conversation;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage for the latest conversation.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Prepare the backing storage. Must be idempotent.
    async fn init(&self) -> Result<()>;

    /// Load the cached conversation. `None` means nothing has been cached yet.
    async fn load(&self) -> Result<Option<Conversation>>;

    /// Replace the cached conversation.
    async fn save(&self, conversation: &Conversation) -> Result<()>;
}

/// Conversation store backed by a JSON file inside the data directory.
pub struct FileStore {
    data_dir: PathBuf,
    latest_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>, latest_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            latest_path: latest_path.into(),
        }
    }

    /// Path of the cache file.
    pub fn latest_path(&self) -> &Path {
        &self.latest_path
    }
}

#[async_trait]
impl ConversationStore for FileStore {
    /// Ensure the data directory and an (empty) cache file exist.
    ///
    /// Safe to call repeatedly; existing content is never truncated.
    async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| Error::io(&self.data_dir, e))?;

        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.latest_path)
            .await
            .map_err(|e| Error::io(&self.latest_path, e))?;

        debug!("Data directory ready at {}", self.data_dir.display());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Conversation>> {
        let contents = tokio::fs::read_to_string(&self.latest_path)
            .await
            .map_err(|e| Error::io(&self.latest_path, e))?;

        if contents.trim().is_empty() {
            debug!("No cached conversation in {}", self.latest_path.display());
            return Ok(None);
        }

        let conversation = serde_json::from_str(&contents).map_err(|source| Error::Parse {
            path: self.latest_path.clone(),
            source,
        })?;
        Ok(Some(conversation))
    }

    async fn save(&self, conversation: &Conversation) -> Result<()> {
        // Role and String fields only; serializing this cannot fail in practice.
        let contents = serde_json::to_string_pretty(conversation)
            .map_err(|e| Error::io(&self.latest_path, e.into()))?;
        tokio::fs::write(&self.latest_path, contents)
            .await
            .map_err(|e| Error::io(&self.latest_path, e))?;

        debug!(
            "Saved {} messages to {}",
            conversation.messages.len(),
            self.latest_path.display()
        );
        Ok(())
    }
}
