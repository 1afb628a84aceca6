use chrono::{DateTime, Utc};
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Invoice callback as posted by Xendit.
///
/// Every field is optional on the wire: missing keys and explicit `null`s fall back to the
/// zero value, unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct XenditWebhook {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub external_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_high: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payer_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub adjusted_received_amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fees_paid_amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_destination: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl XenditWebhook {
    /// Only a JSON object is a webhook. Derived struct deserialization would also fill fields
    /// positionally from an array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(bytes)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde_json::Error::invalid_type(
                unexpected(&other),
                &"a webhook object",
            )),
        }
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// A webhook as it was received, stamped with the server-side receipt time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredWebhook {
    pub timestamp: DateTime<Utc>,
    pub payload: XenditWebhook,
}

impl StoredWebhook {
    pub fn new(payload: XenditWebhook, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, payload }
    }
}

/// Document persisted per bucket. Entries are kept in arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookBucket {
    pub webhooks: Vec<StoredWebhook>,
}

impl WebhookBucket {
    pub fn push(&mut self, stored: StoredWebhook) {
        self.webhooks.push(stored);
    }

    pub fn len(&self) -> usize {
        self.webhooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webhooks.is_empty()
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
