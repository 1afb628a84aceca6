use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::modules::webhooks::core::bucket::BucketDate;
use crate::modules::webhooks::core::events::{StoredWebhook, XenditWebhook};

pub mod file_system;
pub mod in_memory;

#[derive(Debug, Error)]
pub enum WebhookStoreError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupted bucket {}: {source}", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize bucket: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Outcome of a successful append.
#[derive(Debug, Clone)]
pub struct AppendReceipt {
    pub bucket: BucketDate,
    pub location: PathBuf,
    pub stored: StoredWebhook,
    /// Entries in the bucket after this append.
    pub bucket_len: usize,
}

#[async_trait]
pub trait WebhookStore: Send + Sync {
    /// Files `webhook` under its bucket. Concurrent appends never lose each other's entries.
    async fn append(&self, webhook: XenditWebhook) -> Result<AppendReceipt, WebhookStoreError>;
}
