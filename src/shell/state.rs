use crate::modules::webhooks::use_cases::receive_webhook::handler::ReceiveWebhookHandler;
use crate::shared::infrastructure::webhook_store::WebhookStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub receive_handler: Arc<ReceiveWebhookHandler>,
}

impl AppState {
    pub fn new(store: Arc<dyn WebhookStore>) -> Self {
        Self {
            receive_handler: Arc::new(ReceiveWebhookHandler::new(store)),
        }
    }
}
