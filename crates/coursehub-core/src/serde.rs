use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// Accepts any JSON value and keeps it only if it is a UUID string.
///
/// Used where a malformed reference must be reported the same way as an
/// unknown one instead of failing body deserialization.
pub fn deserialize_lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Uuid::parse_str(s.trim()).ok(),
        _ => None,
    })
}
