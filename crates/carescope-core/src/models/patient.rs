use serde::{Deserialize, Deserializer, Serialize};

/// A caller-supplied patient record.
///
/// Only `id`, `name` and `phone` drive indexing; every other field is kept
/// verbatim in `extra` so search results echo the record as it was synced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default, deserialize_with = "text_field")]
    pub id: String,
    #[serde(default, deserialize_with = "text_field")]
    pub name: String,
    #[serde(default, deserialize_with = "text_field")]
    pub phone: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PatientRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub synced: usize,
    pub indexed_keys: usize,
    pub generation: u64,
}

// Upstream systems send ids and phone numbers as JSON numbers as often as strings.
fn text_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::Bool(flag)) => flag.to_string(),
        Some(other) => other.to_string(),
    })
}
