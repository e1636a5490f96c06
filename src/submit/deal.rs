use super::{check_required, SaveMode, Submittable, ValidationError};
use crate::api::Collection;
use crate::drafts::DealDraft;
use crate::util::parse_number;
use serde_json::{json, Value};

fn text_or_null(s: &str) -> Value {
    if s.is_empty() {
        Value::Null
    } else {
        Value::String(s.to_string())
    }
}

impl Submittable for DealDraft {
    const COLLECTION: Collection = Collection::Deals;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError> {
        if mode.is_publish() {
            check_required(&[
                ("Tool Name", self.tool_name.as_str()),
                ("Category", self.tool_category.as_str()),
                ("Description", self.tool_description.as_str()),
            ])?;
        }

        let features: Vec<&str> = self
            .features
            .iter()
            .map(String::as_str)
            .filter(|f| !f.trim().is_empty())
            .collect();

        Ok(json!({
            "name": self.tool_name,
            "category": self.tool_category,
            "description": self.tool_description,
            "features": features,
            "discountPercentage": parse_number(&self.discount_value).unwrap_or(0.0),
            "savingsAmount": parse_number(&self.save_upto_amount).unwrap_or(0.0),
            "tag": text_or_null(&self.deal_badge),
            "rating": parse_number(&self.rating),
            "logoUri": text_or_null(&self.logo_uri),
            "verified": false,
            "primary_cta_text": text_or_null(&self.primary_cta_text),
            "secondary_cta_text": text_or_null(&self.secondary_cta_text),
            "primary_cta_link": text_or_null(&self.primary_cta_link),
            "secondary_cta_link": text_or_null(&self.secondary_cta_link),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_coerces_numbers_and_nulls() {
        let draft = DealDraft {
            tool_name: "Notion".to_string(),
            tool_category: "Productivity".to_string(),
            tool_description: "Docs".to_string(),
            features: vec!["AI".to_string(), "  ".to_string()],
            discount_value: "abc".to_string(),
            save_upto_amount: "250".to_string(),
            rating: String::new(),
            primary_cta_text: "Claim".to_string(),
            ..Default::default()
        };
        let body = draft.prepare(SaveMode::Publish).expect("valid");
        assert_eq!(body["features"], json!(["AI"]));
        assert_eq!(body["discountPercentage"], json!(0.0));
        assert_eq!(body["savingsAmount"], json!(250.0));
        assert_eq!(body["rating"], Value::Null);
        assert_eq!(body["tag"], Value::Null);
        assert_eq!(body["verified"], json!(false));
        assert_eq!(body["primary_cta_text"], "Claim");
    }

    #[test]
    fn test_publish_names_all_missing_fields() {
        let err = DealDraft::default()
            .prepare(SaveMode::Publish)
            .expect_err("empty form");
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["Tool Name", "Category", "Description"])
        );
    }
}
