use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::Result;

/// Raw cooperative record exactly as it appears in the input document
pub type RawCooperative = Value;

/// Top-level shape of the directory file. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    pub cooperatives: Vec<RawCooperative>,
}

/// A cooperative from the directory. Only `id` and `name` are required;
/// everything else degrades to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cooperative {
    pub id: Value,
    /// Must be present; an explicit null reads as empty
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departement: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub registration_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secteur: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nature_activite: String,
    /// Slash-delimited phone numbers, e.g. "0102030405 / 0607080910"
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub president: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Prior traceability events, carried over untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub traceability: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,

    /// The untouched source record, used for the traceability hash
    #[serde(skip)]
    pub source: RawCooperative,
}

impl Cooperative {
    pub fn from_raw(raw: RawCooperative) -> Result<Self> {
        let mut cooperative: Cooperative = serde_json::from_value(raw.clone())?;
        cooperative.source = raw;
        Ok(cooperative)
    }

    pub fn is_verified(&self) -> bool {
        self.status.as_deref() == Some(crate::constants::STATUS_VERIFIED)
    }

    pub fn status_or_pending(&self) -> &str {
        self.status
            .as_deref()
            .unwrap_or(crate::constants::STATUS_PENDING)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
