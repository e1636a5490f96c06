use super::{deserialize_author, record_id};
use crate::models::{BenefitModule, BlogSection, ToolChip, ToolMention};
use crate::shape::{mentions_to_tools, strip_nulls, tools_to_mentions};
use crate::util::slugify;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const DEFAULT_READING_TIME: &str = "5 Minute";

/// The blog being edited. Field names follow the backend document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BlogDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub blog_heading: String,
    pub blog_body: String,
    pub blog_hero_image: String,
    pub section_headline: String,
    pub tip_bulb_text: String,
    #[serde(deserialize_with = "crate::shape::deserialize_mentions")]
    pub blog_tools_mentioned: Vec<ToolMention>,
    #[serde(deserialize_with = "deserialize_author")]
    pub blog_author: String,
    pub blog_category: String,
    pub blog_reading_time: String,
    pub modules: Vec<BenefitModule>,
    pub blog_tool_blog_cards: Vec<BlogSection>,
    pub more_blogs_section_title: String,
    pub more_blogs: Vec<Value>,
    pub blog_slug: String,
    pub blog_is_published: bool,
}

impl Default for BlogDraft {
    fn default() -> Self {
        Self {
            id: None,
            blog_heading: String::new(),
            blog_body: String::new(),
            blog_hero_image: String::new(),
            section_headline: String::new(),
            tip_bulb_text: String::new(),
            blog_tools_mentioned: vec![],
            blog_author: String::new(),
            blog_category: String::new(),
            blog_reading_time: DEFAULT_READING_TIME.to_string(),
            modules: vec![],
            blog_tool_blog_cards: vec![],
            more_blogs_section_title: String::new(),
            more_blogs: vec![],
            blog_slug: String::new(),
            blog_is_published: false,
        }
    }
}

impl BlogDraft {
    /// Build the working copy from `GET /api/blogs/:id`.
    pub fn hydrate(mut raw: Value) -> Result<Self, serde_json::Error> {
        let id = record_id(&raw);
        strip_nulls(&mut raw);
        let mut draft: Self = serde_json::from_value(raw)?;
        draft.id = id;
        if draft.blog_reading_time.trim().is_empty() {
            draft.blog_reading_time = DEFAULT_READING_TIME.to_string();
        }
        for (idx, card) in draft.blog_tool_blog_cards.iter_mut().enumerate() {
            if card.section_number == 0 {
                card.section_number = idx as u32 + 1;
            }
        }
        Ok(draft)
    }

    pub fn set_heading(&mut self, heading: &str) {
        self.blog_heading = heading.to_string();
        self.blog_slug = slugify(heading);
    }

    pub fn tool_chips(&self) -> Vec<ToolChip> {
        mentions_to_tools(&self.blog_tools_mentioned)
    }

    pub fn set_tools(&mut self, tools: &[ToolChip]) {
        self.blog_tools_mentioned = tools_to_mentions(tools);
    }

    pub fn clear_more_blogs(&mut self) {
        self.more_blogs_section_title.clear();
        self.more_blogs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_populated_author_and_legacy_mentions() {
        let raw = json!({
            "_id": "b1",
            "blogHeading": "Best tools",
            "blogAuthor": {"_id": "a9", "authorName": "Sam"},
            "blogCategory": null,
            "blogToolBlogCards": [
                {"blogTitle": "One", "blogBody": "x", "dealsMentioned": [
                    {"title": "Notion", "logoUri": "n.png", "tag": "Docs"}
                ]},
                {"sectionNumber": 7, "blogTitle": "Two", "blogBody": "y"}
            ]
        });
        let draft = BlogDraft::hydrate(raw).expect("hydrates");
        assert_eq!(draft.id.as_deref(), Some("b1"));
        assert_eq!(draft.blog_author, "a9");
        assert_eq!(draft.blog_category, "");
        assert_eq!(draft.blog_reading_time, DEFAULT_READING_TIME);
        assert_eq!(draft.blog_tool_blog_cards[0].section_number, 1);
        assert_eq!(draft.blog_tool_blog_cards[1].section_number, 7);
        let mention = &draft.blog_tool_blog_cards[0].deals_mentioned[0];
        assert_eq!(mention.tool_name, "Notion");
        assert_eq!(mention.tool_category, "Docs");
    }

    #[test]
    fn test_set_heading_derives_slug() {
        let mut draft = BlogDraft::default();
        draft.set_heading("GPT-4 vs. Claude 3!");
        assert_eq!(draft.blog_slug, "gpt-4-vs-claude-3");
    }

    #[test]
    fn test_set_tools_leaves_missing_category_empty() {
        let chips = vec![ToolChip {
            id: "Notion".into(),
            name: "Notion".into(),
            logo: None,
            category: None,
        }];
        let mut draft = BlogDraft::default();
        draft.set_tools(&chips);
        assert_eq!(draft.blog_tools_mentioned[0].tool_category, "");
        assert_eq!(draft.tool_chips(), chips);
    }
}
