// File system implementation of the WebhookStore port.
//
// Layout
// - One pretty-printed JSON document per calendar date: <root>/<YYYY-MM-DD>.json
//
// Concurrency
// - Every append is a read-merge-write of the whole bucket file. A per-bucket mutex, owned by
//   the store for its whole lifetime, is held across the entire sequence.
// - Writes land in a fsynced temporary sibling file and are renamed over the bucket file, so a
//   failed write leaves the previous document intact.
//
// Limits
// - Buckets are never compacted or deleted and every append rewrites the full day. Fine for
//   low volume manual review, not for sustained traffic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::modules::webhooks::core::bucket::BucketDate;
use crate::modules::webhooks::core::events::{StoredWebhook, WebhookBucket, XenditWebhook};
use crate::shared::infrastructure::webhook_store::{
    AppendReceipt, WebhookStore, WebhookStoreError,
};

pub struct FileSystemWebhookStore {
    root: PathBuf,
    locks: Mutex<HashMap<BucketDate, Arc<Mutex<()>>>>,
}

impl FileSystemWebhookStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bucket_path(&self, bucket: BucketDate) -> PathBuf {
        self.root.join(format!("{}.json", bucket.label()))
    }

    /// Reads a bucket document. A missing file is an empty bucket.
    pub async fn load(&self, bucket: BucketDate) -> Result<WebhookBucket, WebhookStoreError> {
        load_bucket(self.bucket_path(bucket)).await
    }

    /// Same as [`WebhookStore::append`] with an explicit receipt time.
    ///
    /// The locked section runs on its own task, so it completes even when the caller is
    /// dropped mid-append.
    pub async fn append_at(
        &self,
        webhook: XenditWebhook,
        received_at: DateTime<Utc>,
    ) -> Result<AppendReceipt, WebhookStoreError> {
        let bucket = BucketDate::resolve(&webhook.paid_at, received_at);
        let root = self.root.clone();
        let path = self.bucket_path(bucket);
        let lock = self.lock_for(bucket).await;

        tokio::spawn(async move {
            let _guard = lock.lock_owned().await;
            append_locked(&root, path, bucket, StoredWebhook::new(webhook, received_at)).await
        })
        .await
        .map_err(|e| WebhookStoreError::Backend(format!("append task failed: {e}")))?
    }

    async fn lock_for(&self, bucket: BucketDate) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(bucket).or_default().clone()
    }
}

// Caller holds the bucket lock.
async fn append_locked(
    root: &Path,
    path: PathBuf,
    bucket: BucketDate,
    stored: StoredWebhook,
) -> Result<AppendReceipt, WebhookStoreError> {
    fs::create_dir_all(root)
        .await
        .map_err(|source| WebhookStoreError::Io {
            path: root.to_path_buf(),
            source,
        })?;

    let mut document = load_bucket(path.clone()).await?;
    document.push(stored.clone());

    let bytes = document.to_pretty_json()?;
    write_replace(&path, &bytes).await?;

    tracing::info!(
        id = %stored.payload.id,
        bucket = %bucket,
        path = %path.display(),
        entries = document.len(),
        "webhook saved"
    );

    Ok(AppendReceipt {
        bucket,
        location: path,
        stored,
        bucket_len: document.len(),
    })
}

async fn load_bucket(path: PathBuf) -> Result<WebhookBucket, WebhookStoreError> {
    match fs::read(&path).await {
        Ok(bytes) => WebhookBucket::from_slice(&bytes)
            .map_err(|source| WebhookStoreError::Corrupted { path, source }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(WebhookBucket::default()),
        Err(source) => Err(WebhookStoreError::Io { path, source }),
    }
}

// The temporary file is flushed to disk before the rename, so the bucket path only ever
// points at a complete document.
async fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), WebhookStoreError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::now_v7()));

    if let Err(source) = write_synced(&tmp, bytes).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(WebhookStoreError::Io { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(WebhookStoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[async_trait]
impl WebhookStore for FileSystemWebhookStore {
    async fn append(&self, webhook: XenditWebhook) -> Result<AppendReceipt, WebhookStoreError> {
        self.append_at(webhook, Utc::now()).await
    }
}
