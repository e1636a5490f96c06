use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Rating used when a stored rating is missing or unusable.
pub(crate) const DEFAULT_RATING: u8 = 3;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Word characters are ASCII-only here, same as the public site's router.
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("static regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn hyphen_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-+").expect("static regex"))
}

/// Derive a URL slug from a heading.
///
/// lowercase -> trim -> strip everything except word chars, whitespace and hyphens ->
/// whitespace runs become one hyphen -> hyphen runs collapse.
pub(crate) fn slugify(heading: &str) -> String {
    let lowered = heading.to_lowercase();
    let stripped = non_slug_chars().replace_all(lowered.trim(), "");
    let hyphenated = whitespace_runs().replace_all(&stripped, "-");
    hyphen_runs().replace_all(&hyphenated, "-").into_owned()
}

/// Coerce a stored 1..=5 star rating.
///
/// Missing, zero and non-finite values become [`DEFAULT_RATING`]; anything else is
/// rounded and then clamped into 1..=5.
pub(crate) fn clamp_rating(raw: Option<f64>) -> u8 {
    match raw {
        Some(v) if v.is_finite() && v != 0.0 => v.round().clamp(1.0, 5.0) as u8,
        _ => DEFAULT_RATING,
    }
}

/// Parse a counter (views, review counts, helpful votes) or fall back to zero.
pub(crate) fn parse_count_or_zero(raw: &serde_json::Value) -> u64 {
    match raw {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().map_or(0, |f| {
            if f.is_finite() && f > 0.0 {
                f as u64
            } else {
                0
            }
        }),
        _ => 0,
    }
}

/// Serde adapter for counters that arrive as numbers, numeric strings or garbage.
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(parse_count_or_zero(&raw))
}

/// Parse a free-text numeric form field. Empty or garbage input is `None`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn canonicalize(v: serde_json::Value) -> serde_json::Value {
    match v {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(String, serde_json::Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(canonicalize).collect())
        }
        other => other,
    }
}

/// Deterministic serialization: object keys are emitted in sorted order at every depth.
pub(crate) fn stable_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => canonicalize(v).to_string(),
        // Non-JSON-representable values never compare equal to anything real.
        Err(e) => format!("<unserializable:{e}>"),
    }
}

/// Source of local-only keys for list rows (cards, modules) that have no backend id yet.
///
/// Owned by the editor instance that needs it.
pub(crate) trait IdSource {
    fn next_id(&mut self) -> u64;
}

#[derive(Clone, Debug, Default)]
pub(crate) struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> u64 {
        self.last = self.last.saturating_add(1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("GPT-4 vs. Claude 3!"), "gpt-4-vs-claude-3");
    }

    #[test]
    fn test_slugify_collapses_whitespace_and_hyphens() {
        assert_eq!(slugify("  Notion  --  Linear "), "notion-linear");
        assert_eq!(slugify("a\t b"), "a-b");
    }

    #[test]
    fn test_slugify_empty_heading() {
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_clamp_rating_defaults() {
        assert_eq!(clamp_rating(None), 3);
        assert_eq!(clamp_rating(Some(0.0)), 3);
        assert_eq!(clamp_rating(Some(f64::NAN)), 3);
    }

    #[test]
    fn test_clamp_rating_rounds_then_clamps() {
        assert_eq!(clamp_rating(Some(4.4)), 4);
        assert_eq!(clamp_rating(Some(4.6)), 5);
        assert_eq!(clamp_rating(Some(9.0)), 5);
        assert_eq!(clamp_rating(Some(-2.0)), 1);
        assert_eq!(clamp_rating(Some(0.3)), 1);
    }

    #[test]
    fn test_parse_count_or_zero() {
        assert_eq!(parse_count_or_zero(&json!(12)), 12);
        assert_eq!(parse_count_or_zero(&json!("42")), 42);
        assert_eq!(parse_count_or_zero(&json!("n/a")), 0);
        assert_eq!(parse_count_or_zero(&json!(-5)), 0);
        assert_eq!(parse_count_or_zero(&json!(null)), 0);
    }

    #[test]
    fn test_stable_json_ignores_key_order() {
        let a = json!({"b": 1, "a": {"y": true, "x": [1, 2]}});
        let b = json!({"a": {"x": [1, 2], "y": true}, "b": 1});
        assert_eq!(stable_json(&a), stable_json(&b));
    }

    #[test]
    fn test_stable_json_keeps_array_order() {
        assert_ne!(stable_json(&json!([1, 2])), stable_json(&json!([2, 1])));
    }

    #[test]
    fn test_sequential_ids_are_per_instance() {
        let mut a = SequentialIds::default();
        let mut b = SequentialIds::starting_after(10);
        assert_eq!(a.next_id(), 1);
        assert_eq!(a.next_id(), 2);
        assert_eq!(b.next_id(), 11);
    }
}
