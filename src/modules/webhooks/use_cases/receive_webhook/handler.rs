use crate::modules::webhooks::core::events::XenditWebhook;
use crate::shared::infrastructure::webhook_store::{AppendReceipt, WebhookStore, WebhookStoreError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] WebhookStoreError),
}

pub struct ReceiveWebhookHandler {
    store: Arc<dyn WebhookStore>,
}

impl ReceiveWebhookHandler {
    pub fn new(store: Arc<dyn WebhookStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, webhook: XenditWebhook) -> Result<AppendReceipt, ApplicationError> {
        let id = webhook.id.clone();
        self.store.append(webhook).await.map_err(|e| {
            tracing::error!(id = %id, error = %e, "failed to store webhook");
            ApplicationError::Store(e)
        })
    }
}
