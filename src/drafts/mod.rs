mod author;
mod blog;
mod comparison;
mod deal;
mod review;
mod settings;

pub(crate) use author::AuthorDraft;
pub(crate) use blog::BlogDraft;
pub(crate) use comparison::ComparisonDraft;
pub(crate) use deal::DealDraft;
pub(crate) use review::{PricingPlan, ReviewDraft, ReviewFeature};
pub(crate) use settings::{ComparisonPageSettings, PageStatus};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Backend id of a fetched document (`_id`, then `id`).
pub(crate) fn record_id(raw: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Author references come back either as an id or as the populated author document.
pub(crate) fn author_id(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

pub(crate) fn deserialize_author<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(author_id(&raw))
}
