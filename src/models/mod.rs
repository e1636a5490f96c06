use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logged-in admin, as returned by `/api/auth/login`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminUser {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

/// Backend shape of a tool mention (`toolsMentioned`, `dealsMentioned` on save).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ToolMention {
    pub tool_name: String,
    pub tool_logo: String,
    pub tool_category: String,
    pub is_verified: bool,
}

/// A deal as returned by `GET /api/deals` (and its `?q=` search).
///
/// The catalog is loosely typed; every field is optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct DealSummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub logo_uri: Option<String>,
    pub logo_component: Option<String>,
    pub verified: Option<bool>,
}

/// Chip in the "Tools Mentioned" sub-editor.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ToolChip {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ToolChip {
    /// Trimmed name doubling as id; empty logo or category become `None`.
    pub fn canonical(self) -> Self {
        let name = self.name.trim().to_string();
        Self {
            id: name.clone(),
            name,
            logo: self.logo.filter(|l| !l.is_empty()),
            category: self.category.filter(|c| !c.is_empty()),
        }
    }
}

/// One "tool blog card" section of a blog or comparison.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BlogSection {
    pub section_number: u32,
    pub blog_title: String,
    pub blog_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_image: Option<String>,
    /// Canonical mention shape; legacy `{title, logoUri}` entries are normalized on read.
    #[serde(deserialize_with = "crate::shape::deserialize_mentions")]
    pub deals_mentioned: Vec<ToolMention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_note: Option<String>,
}

/// Feature row as edited in the UI: tool index ("0", "1", ...) -> available.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Feature {
    pub feature_name: String,
    pub tool_availability: BTreeMap<String, bool>,
}

/// Feature row as persisted: three fixed tool slots.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PositionalFeature {
    pub feature_name: String,
    pub tool1_available: bool,
    pub tool2_available: bool,
    pub tool3_available: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct FeaturesData {
    pub section_title: String,
    pub features_headline: String,
    pub tools: Vec<String>,
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct FeatureComparison {
    pub section_title: String,
    pub features_headline: String,
    pub tools: Vec<String>,
    pub features: Vec<PositionalFeature>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct ProsConsPair {
    pub pro: String,
    pub con: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProsConsCard {
    pub card_number: u32,
    pub title_pros: String,
    pub title_cons: String,
    pub pros_cons_pairs: Vec<ProsConsPair>,
}

/// Comparison "blog modules" entry.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BlogModuleEntry {
    pub module_number: u32,
    pub module_name: String,
}

/// Blog "modules" entry (a titled list of benefits).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct BenefitModule {
    pub title: String,
    pub benefits: Vec<String>,
}

/// A comparison as listed by `GET /api/comparisons`, used as a "more comparisons" candidate.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ComparisonSummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComparisonSummary {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.hero_heading.as_deref())
            .unwrap_or("Untitled Comparison")
    }

    /// Persisted reference: `_id`, then `id`. Empty when neither is known.
    pub fn backend_id(&self) -> &str {
        self.mongo_id
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AlternativeReview {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "crate::util::deserialize_count")]
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct UseCase {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Faq {
    pub question: String,
    pub answer: String,
}

/// Minimal view of a create/update response.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct SavedRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(alias = "blogSlug")]
    pub slug: Option<String>,
}
