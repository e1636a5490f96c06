use super::comparison::more_comparisons_from;
use super::record_id;
use crate::models::ComparisonSummary;
use crate::shape::strip_nulls;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PageStatus {
    #[default]
    Live,
    Maintenance,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Live => "live",
            PageStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "maintenance" => PageStatus::Maintenance,
            _ => PageStatus::Live,
        }
    }
}

impl<'de> Deserialize<'de> for PageStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PageStatus::parse(&raw))
    }
}

/// Copy and featured list for the public comparisons landing page.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ComparisonPageSettings {
    #[serde(skip)]
    pub id: Option<String>,
    pub comparison_page_status: PageStatus,
    pub comparison_page_top_tagline: String,
    pub comparison_page_heading: String,
    pub comparison_page_subheading: String,
    pub comparison_page_tags: Vec<String>,
    #[serde(skip)]
    pub featured_comparisons: Vec<ComparisonSummary>,
}

impl ComparisonPageSettings {
    /// `featuredComparisons` arrives as ids or populated documents, like `moreComparisons`.
    /// An empty body means nothing has been saved yet.
    pub fn hydrate(mut raw: Value) -> Result<Self, serde_json::Error> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        let id = record_id(&raw);
        strip_nulls(&mut raw);
        let featured = raw
            .as_object_mut()
            .and_then(|map| map.remove("featuredComparisons"));
        let mut settings: Self = serde_json::from_value(raw)?;
        settings.id = id;
        settings.featured_comparisons = more_comparisons_from(featured);
        Ok(settings)
    }

    /// Tags are edited as one comma separated line; pieces keep their spacing until save.
    pub fn tags_text(&self) -> String {
        self.comparison_page_tags.join(",")
    }

    pub fn set_tags_text(&mut self, text: &str) {
        self.comparison_page_tags = text.split(',').map(str::to_string).collect();
    }

    pub fn featured_ids(&self) -> Vec<String> {
        self.featured_comparisons
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
    fn test_hydrate_accepts_ids_and_documents() {
        let settings = ComparisonPageSettings::hydrate(json!({
            "_id": "s1",
            "comparisonPageStatus": "maintenance",
            "comparisonPageHeading": "Compare tools",
            "comparisonPageTags": ["AI", "Docs"],
            "comparisonPageSubheading": null,
            "featuredComparisons": ["c1", {"_id": "c2", "heroHeading": "Notion vs Obsidian"}]
        }))
        .expect("settings decode");
        assert_eq!(settings.id.as_deref(), Some("s1"));
        assert_eq!(settings.comparison_page_status, PageStatus::Maintenance);
        assert_eq!(settings.comparison_page_subheading, "");
        assert_eq!(settings.featured_ids(), vec!["c1", "c2"]);
        assert_eq!(settings.featured_comparisons[1].display_title(), "Notion vs Obsidian");
        assert_eq!(settings.tags_text(), "AI,Docs");
    }

    #[test]
    fn test_tags_text_round_trips_while_typing() {
        let mut settings = ComparisonPageSettings::default();
        settings.set_tags_text("AI, Docs, ");
        assert_eq!(settings.tags_text(), "AI, Docs, ");
        assert_eq!(ComparisonPageSettings::hydrate(Value::Null).ok(), Some(Default::default()));
    }

    #[test]
    fn test_unknown_status_reads_as_live() {
        assert_eq!(PageStatus::parse("paused"), PageStatus::Live);
        assert_eq!(PageStatus::parse(" maintenance "), PageStatus::Maintenance);
        let settings = ComparisonPageSettings::hydrate(json!({"comparisonPageStatus": "paused"}))
            .expect("status is lenient");
        assert_eq!(settings.comparison_page_status, PageStatus::Live);
    }
}
