use super::{author_id, deserialize_author, record_id};
use crate::models::{
    BlogModuleEntry, BlogSection, ComparisonSummary, FeatureComparison, FeaturesData,
    ProsConsCard, ToolChip, ToolMention,
};
use crate::shape::{features_from_positional, mentions_to_tools, strip_nulls, tools_to_mentions};
use crate::util::slugify;
use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const DEFAULT_PAGE_TYPE: &str = "Tool Comparison Blog";
pub(crate) const PLACEHOLDER_HERO_IMAGE: &str =
    "https://via.placeholder.com/800x400?text=Comparison+Hero";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ComparisonDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub page_type: String,
    pub hero_heading: String,
    pub hero_body: String,
    pub comparison_hero_image: String,
    pub section_headline: String,
    pub tip_bulb_text: String,
    #[serde(deserialize_with = "crate::shape::deserialize_mentions")]
    pub tools_mentioned: Vec<ToolMention>,
    #[serde(deserialize_with = "deserialize_author")]
    pub author_id: String,
    pub blog_category: String,
    pub reading_time: String,
    pub tool_blog_cards: Vec<BlogSection>,
    /// UI shape; converted to three positional slots on save.
    #[serde(skip)]
    pub features_comparison: FeaturesData,
    pub pros_cons_cards: Vec<ProsConsCard>,
    pub blog_modules: Vec<BlogModuleEntry>,
    pub more_comparisons_section_title: String,
    /// Populated candidates; only their ids are saved.
    #[serde(skip)]
    pub more_comparisons: Vec<ComparisonSummary>,
    pub slug: String,
    pub is_published: bool,
}

impl Default for ComparisonDraft {
    fn default() -> Self {
        Self {
            id: None,
            page_type: DEFAULT_PAGE_TYPE.to_string(),
            hero_heading: String::new(),
            hero_body: String::new(),
            comparison_hero_image: String::new(),
            section_headline: String::new(),
            tip_bulb_text: String::new(),
            tools_mentioned: vec![],
            author_id: String::new(),
            blog_category: String::new(),
            reading_time: String::new(),
            tool_blog_cards: vec![],
            features_comparison: FeaturesData::default(),
            pros_cons_cards: vec![],
            blog_modules: vec![],
            more_comparisons_section_title: String::new(),
            more_comparisons: vec![],
            slug: String::new(),
            is_published: false,
        }
    }
}

/// `moreComparisons` is either populated documents or bare ids.
pub(super) fn more_comparisons_from(raw: Option<Value>) -> Vec<ComparisonSummary> {
    let Some(Value::Array(items)) = raw else {
        return vec![];
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(id) if !id.trim().is_empty() => Some(ComparisonSummary {
                mongo_id: Some(id),
                ..Default::default()
            }),
            Value::Object(_) => serde_json::from_value(item)
                .map_err(|e| warn!("skipping malformed comparison reference: {e}"))
                .ok(),
            _ => None,
        })
        .collect()
}

impl ComparisonDraft {
    pub fn hydrate(mut raw: Value) -> Result<Self, serde_json::Error> {
        let id = record_id(&raw);
        strip_nulls(&mut raw);

        let (features, more, fallback_author, has_published) = match raw.as_object_mut() {
            Some(map) => (
                map.remove("featuresComparison"),
                map.remove("moreComparisons"),
                map.get("author").map(author_id).unwrap_or_default(),
                map.contains_key("isPublished"),
            ),
            None => (None, None, String::new(), false),
        };

        let mut draft: Self = serde_json::from_value(raw)?;
        draft.id = id;
        if draft.page_type.trim().is_empty() {
            draft.page_type = DEFAULT_PAGE_TYPE.to_string();
        }
        if draft.comparison_hero_image.trim().is_empty() {
            draft.comparison_hero_image = PLACEHOLDER_HERO_IMAGE.to_string();
        }
        if draft.author_id.is_empty() {
            draft.author_id = fallback_author;
        }
        // Older documents predate the flag and are live.
        if !has_published {
            draft.is_published = true;
        }
        if let Some(features) = features {
            let positional: FeatureComparison = serde_json::from_value(features)?;
            draft.features_comparison = features_from_positional(&positional);
        }
        draft.more_comparisons = more_comparisons_from(more);
        for (idx, card) in draft.tool_blog_cards.iter_mut().enumerate() {
            if card.section_number == 0 {
                card.section_number = idx as u32 + 1;
            }
        }
        Ok(draft)
    }

    pub fn set_heading(&mut self, heading: &str) {
        self.hero_heading = heading.to_string();
        self.slug = slugify(heading);
    }

    pub fn tool_chips(&self) -> Vec<ToolChip> {
        mentions_to_tools(&self.tools_mentioned)
    }

    pub fn set_tools(&mut self, tools: &[ToolChip]) {
        self.tools_mentioned = tools_to_mentions(tools);
    }

    /// Ids persisted for the "more comparisons" section.
    pub fn more_comparison_ids(&self) -> Vec<String> {
        self.more_comparisons
            .iter()
            .map(|c| c.backend_id().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_converts_features_and_references() {
        let raw = json!({
            "_id": "c1",
            "heroHeading": "Notion vs Obsidian",
            "author": "a1",
            "featuresComparison": {
                "sectionTitle": "Features",
                "tools": ["Notion", "Obsidian"],
                "features": [{"featureName": "Sync", "tool1Available": true, "tool2Available": false}]
            },
            "moreComparisons": ["x1", {"_id": "x2", "heroHeading": "B"}, "", 4]
        });
        let draft = ComparisonDraft::hydrate(raw).expect("hydrates");
        assert_eq!(draft.id.as_deref(), Some("c1"));
        assert_eq!(draft.author_id, "a1");
        assert!(draft.is_published);
        assert_eq!(draft.page_type, DEFAULT_PAGE_TYPE);
        assert_eq!(draft.comparison_hero_image, PLACEHOLDER_HERO_IMAGE);

        let sync = &draft.features_comparison.features[0];
        assert_eq!(sync.tool_availability.get("0"), Some(&true));
        assert_eq!(sync.tool_availability.get("2"), Some(&false));

        assert_eq!(draft.more_comparison_ids(), vec!["x1", "x2"]);
    }

    #[test]
    fn test_hydrate_keeps_explicit_unpublished_flag() {
        let draft =
            ComparisonDraft::hydrate(json!({"authorId": {"_id": "a2"}, "isPublished": false}))
                .expect("hydrates");
        assert!(!draft.is_published);
        assert_eq!(draft.author_id, "a2");
    }

    #[test]
    fn test_set_tools_stores_chips_as_entered() {
        let chips = vec![ToolChip {
            id: "Linear".into(),
            name: "Linear".into(),
            logo: None,
            category: Some("PM".into()),
        }];
        let mut draft = ComparisonDraft::default();
        draft.set_tools(&chips);
        assert_eq!(draft.tools_mentioned[0].tool_logo, "");
        assert_eq!(draft.tool_chips(), chips);
    }
}
