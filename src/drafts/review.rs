use super::record_id;
use crate::models::{AlternativeReview, Faq, UseCase};
use crate::shape::strip_nulls;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct ReviewFeature {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct PricingPlan {
    pub plan: String,
    pub amount: String,
    pub note: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RatingCategory {
    pub category: String,
    pub value: f64,
    pub out_of: f64,
}

/// A product review page. Fields without an editor here round-trip through `extra`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReviewDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub product_name: String,
    pub product_type: String,
    pub avatar_url: String,
    pub description: String,
    pub overview: String,
    pub user_name: String,
    pub review_text: String,
    pub rating: f64,
    pub aggregate_rating: f64,
    #[serde(deserialize_with = "crate::util::deserialize_count")]
    pub rating_count: u64,
    #[serde(deserialize_with = "crate::util::deserialize_count")]
    pub views: u64,
    #[serde(deserialize_with = "crate::util::deserialize_count")]
    pub helpful: u64,
    #[serde(deserialize_with = "crate::util::deserialize_count")]
    pub not_helpful: u64,
    pub features: Vec<ReviewFeature>,
    pub pricing: Vec<PricingPlan>,
    pub alternatives: Vec<AlternativeReview>,
    pub rating_categories: Vec<RatingCategory>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub faqs: Vec<Faq>,
    pub use_cases: Vec<UseCase>,
    pub integrations: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ReviewDraft {
    pub fn hydrate(mut raw: Value) -> Result<Self, serde_json::Error> {
        let id = record_id(&raw);
        strip_nulls(&mut raw);
        if let Some(map) = raw.as_object_mut() {
            // Backend bookkeeping is never sent back.
            for key in ["_id", "id", "__v", "createdAt", "updatedAt"] {
                map.remove(key);
            }
        }
        let mut draft: Self = serde_json::from_value(raw)?;
        draft.id = id;
        Ok(draft)
    }
}
