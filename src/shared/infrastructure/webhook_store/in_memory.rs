// In memory implementation of the WebhookStore port.
//
// Purpose
// - Support handler and HTTP tests without touching the file system.
// - `toggle_offline` makes every append fail, to exercise the storage error path.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::modules::webhooks::core::bucket::BucketDate;
use crate::modules::webhooks::core::events::{StoredWebhook, WebhookBucket, XenditWebhook};
use crate::shared::infrastructure::webhook_store::{
    AppendReceipt, WebhookStore, WebhookStoreError,
};

#[derive(Default)]
pub struct InMemoryWebhookStore {
    buckets: Mutex<BTreeMap<BucketDate, WebhookBucket>>,
    is_offline: bool,
}

impl InMemoryWebhookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn bucket(&self, bucket: BucketDate) -> WebhookBucket {
        self.buckets
            .lock()
            .await
            .get(&bucket)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn total(&self) -> usize {
        self.buckets.lock().await.values().map(WebhookBucket::len).sum()
    }
}

#[async_trait]
impl WebhookStore for InMemoryWebhookStore {
    async fn append(&self, webhook: XenditWebhook) -> Result<AppendReceipt, WebhookStoreError> {
        if self.is_offline {
            return Err(WebhookStoreError::Backend("Webhook store offline".into()));
        }
        let received_at = Utc::now();
        let bucket = BucketDate::resolve(&webhook.paid_at, received_at);
        let stored = StoredWebhook::new(webhook, received_at);

        let mut buckets = self.buckets.lock().await;
        let document = buckets.entry(bucket).or_default();
        document.push(stored.clone());

        Ok(AppendReceipt {
            bucket,
            location: PathBuf::from(bucket.label()),
            stored,
            bucket_len: document.len(),
        })
    }
}
