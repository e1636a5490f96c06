use super::record_id;
use serde_json::Value;

/// The deal form. Numeric inputs stay as text until save.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DealDraft {
    pub id: Option<String>,
    pub tool_name: String,
    pub tool_category: String,
    pub tool_description: String,
    pub deal_badge: String,
    pub rating: String,
    pub features: Vec<String>,
    pub save_upto_amount: String,
    pub discount_value: String,
    pub logo_uri: String,
    pub primary_cta_text: String,
    pub secondary_cta_text: String,
    pub primary_cta_link: String,
    pub secondary_cta_link: String,
}

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

impl DealDraft {
    /// Build from `GET /api/deals/:id`; fields the record lacks keep their defaults.
    pub fn hydrate(raw: &Value) -> Self {
        let mut draft = Self {
            id: record_id(raw),
            ..Self::default()
        };
        let fields: [(&mut String, Option<String>); 12] = [
            (&mut draft.tool_name, text(raw, "title").or_else(|| text(raw, "name"))),
            (&mut draft.tool_category, text(raw, "category")),
            (&mut draft.tool_description, text(raw, "description")),
            (&mut draft.deal_badge, text(raw, "tag")),
            (&mut draft.rating, number_text(raw, "rating")),
            (&mut draft.save_upto_amount, number_text(raw, "savingsAmount")),
            (&mut draft.discount_value, number_text(raw, "discountPercentage")),
            (&mut draft.logo_uri, text(raw, "logoUri")),
            (&mut draft.primary_cta_text, text(raw, "primary_cta_text")),
            (&mut draft.secondary_cta_text, text(raw, "secondary_cta_text")),
            (&mut draft.primary_cta_link, text(raw, "primary_cta_link")),
            (&mut draft.secondary_cta_link, text(raw, "secondary_cta_link")),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(Value::Array(items)) = raw.get("features") {
            draft.features = items
                .iter()
                .filter_map(|f| f.as_str().map(str::to_string))
                .collect();
        }
        draft
    }

    pub fn add_feature(&mut self) {
        self.features.push(String::new());
    }

    pub fn remove_feature(&mut self, idx: usize) {
        if idx < self.features.len() {
            self.features.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_reads_backend_names() {
        let draft = DealDraft::hydrate(&json!({
            "_id": "d1",
            "title": "Notion",
            "category": "Productivity",
            "tag": "50% off",
            "rating": 4.5,
            "savingsAmount": 120,
            "features": ["AI", 3, "Sync"],
            "primary_cta_text": "Claim"
        }));
        assert_eq!(draft.id.as_deref(), Some("d1"));
        assert_eq!(draft.tool_name, "Notion");
        assert_eq!(draft.deal_badge, "50% off");
        assert_eq!(draft.rating, "4.5");
        assert_eq!(draft.save_upto_amount, "120");
        assert_eq!(draft.features, vec!["AI", "Sync"]);
        assert_eq!(draft.primary_cta_text, "Claim");
        assert_eq!(draft.discount_value, "");
    }

    #[test]
    fn test_remove_feature_out_of_range_is_noop() {
        let mut draft = DealDraft::default();
        draft.add_feature();
        draft.remove_feature(4);
        assert_eq!(draft.features.len(), 1);
        draft.remove_feature(0);
        assert!(draft.features.is_empty());
    }
}
