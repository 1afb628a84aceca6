// Shared test fixture for incoming Xendit webhooks.
// Starts from a realistic paid invoice callback and lets tests override the fields they care about.

use crate::modules::webhooks::core::events::XenditWebhook;

const INVOICE_PAID_JSON: &str = include_str!("json/invoice_paid.json");

pub fn invoice_paid_json() -> &'static str {
    INVOICE_PAID_JSON
}

pub struct XenditWebhookBuilder {
    inner: XenditWebhook,
}

impl Default for XenditWebhookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl XenditWebhookBuilder {
    pub fn new() -> Self {
        let inner = serde_json::from_str(INVOICE_PAID_JSON).unwrap();
        Self { inner }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn external_id(mut self, v: impl Into<String>) -> Self {
        self.inner.external_id = v.into();
        self
    }

    pub fn status(mut self, v: impl Into<String>) -> Self {
        self.inner.status = v.into();
        self
    }

    pub fn paid_at(mut self, v: impl Into<String>) -> Self {
        self.inner.paid_at = v.into();
        self
    }

    pub fn amount(mut self, v: i64) -> Self {
        self.inner.amount = v;
        self
    }

    pub fn build(self) -> XenditWebhook {
        self.inner
    }
}

#[cfg(test)]
mod xendit_webhook_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_parses_the_invoice_paid_json() {
        let built = XenditWebhookBuilder::default().build();
        assert_eq!(built.id, "579c8d61f23fa4ca35e52da4");
        assert_eq!(built.external_id, "invoice_123124123");
        assert!(built.is_high);
        assert_eq!(built.status, "PAID");
        assert_eq!(built.amount, 50000);
        assert_eq!(built.adjusted_received_amount, 47500);
        assert_eq!(built.paid_at, "2024-03-15T10:00:00.000Z");
        assert_eq!(built.currency, "IDR");
    }

    #[rstest]
    fn setters_override_fields() {
        let built = XenditWebhookBuilder::new()
            .id("abc123")
            .external_id("ext1")
            .status("EXPIRED")
            .paid_at("")
            .amount(1000)
            .build();
        assert_eq!(built.id, "abc123");
        assert_eq!(built.external_id, "ext1");
        assert_eq!(built.status, "EXPIRED");
        assert_eq!(built.paid_at, "");
        assert_eq!(built.amount, 1000);
    }
}
