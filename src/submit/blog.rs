use super::{check_required, encode_payload, SaveMode, Submittable, ValidationError};
use crate::api::Collection;
use crate::drafts::BlogDraft;
use crate::models::{BenefitModule, BlogSection};
use crate::shape::{backend_mention, with_mention_defaults, LogoFallback};
use crate::util::slugify;
use serde_json::Value;

pub(crate) const DEFAULT_MODULE_TITLE: &str = "Module Benefits";

/// Cards need a title and a body; their mentions must be complete to be kept.
pub(crate) fn clean_blog_cards(cards: &[BlogSection]) -> Vec<BlogSection> {
    cards
        .iter()
        .filter(|c| !c.blog_title.trim().is_empty() && !c.blog_body.trim().is_empty())
        .map(|c| BlogSection {
            blog_body: c.blog_body.trim().to_string(),
            deals_mentioned: c.deals_mentioned.iter().filter_map(backend_mention).collect(),
            ..c.clone()
        })
        .collect()
}

/// Modules need a title or at least one non-blank benefit.
pub(crate) fn clean_benefit_modules(modules: &[BenefitModule]) -> Vec<BenefitModule> {
    modules
        .iter()
        .filter(|m| !m.title.trim().is_empty() || m.benefits.iter().any(|b| !b.trim().is_empty()))
        .map(|m| BenefitModule {
            title: match m.title.trim() {
                "" => DEFAULT_MODULE_TITLE.to_string(),
                t => t.to_string(),
            },
            benefits: m
                .benefits
                .iter()
                .filter(|b| !b.trim().is_empty())
                .cloned()
                .collect(),
        })
        .collect()
}

impl Submittable for BlogDraft {
    const COLLECTION: Collection = Collection::Blogs;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError> {
        let mut clean = self.clone();
        clean.blog_tool_blog_cards = clean_blog_cards(&self.blog_tool_blog_cards);
        clean.modules = clean_benefit_modules(&self.modules);
        clean.blog_tools_mentioned =
            with_mention_defaults(&self.blog_tools_mentioned, LogoFallback::Empty);
        for field in [
            &mut clean.blog_hero_image,
            &mut clean.blog_heading,
            &mut clean.blog_body,
            &mut clean.section_headline,
            &mut clean.tip_bulb_text,
            &mut clean.blog_category,
            &mut clean.blog_reading_time,
        ] {
            *field = field.trim().to_string();
        }
        clean.blog_slug = slugify(&clean.blog_heading);

        if mode.is_publish() {
            check_required(&[
                ("Hero Image", clean.blog_hero_image.as_str()),
                ("Blog Heading", clean.blog_heading.as_str()),
                ("Blog Body", clean.blog_body.as_str()),
                ("Section Headline", clean.section_headline.as_str()),
                ("Tip Bulb Text", clean.tip_bulb_text.as_str()),
                ("Author", clean.blog_author.as_str()),
                ("Category", clean.blog_category.as_str()),
                ("Reading Time", clean.blog_reading_time.as_str()),
            ])?;
        }
        clean.blog_is_published = mode.is_publish();

        encode_payload(&clean)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingApi;
    use super::super::{submit, SubmitError};
    use super::*;
    use crate::models::ToolMention;
    use futures::executor::block_on;

    fn mention(name: &str, logo: &str, category: &str) -> ToolMention {
        ToolMention {
            tool_name: name.to_string(),
            tool_logo: logo.to_string(),
            tool_category: category.to_string(),
            is_verified: false,
        }
    }

    fn publishable() -> BlogDraft {
        let mut d = BlogDraft {
            blog_hero_image: "https://img/hero.png".to_string(),
            blog_body: "<p>Body</p>".to_string(),
            section_headline: "Tools".to_string(),
            tip_bulb_text: "Tip".to_string(),
            blog_author: "a1".to_string(),
            blog_category: "Productivity".to_string(),
            ..Default::default()
        };
        d.set_heading("Best Notes Apps");
        d
    }

    #[test]
    fn test_cards_without_title_or_body_are_dropped() {
        let cards = vec![
            BlogSection {
                section_number: 1,
                blog_title: "Keep".into(),
                blog_body: "  body  ".into(),
                deals_mentioned: vec![
                    mention(" Notion ", "n.png", "Docs"),
                    mention("NoLogo", "", "Docs"),
                ],
                ..Default::default()
            },
            BlogSection {
                section_number: 2,
                blog_title: "   ".into(),
                blog_body: "orphan".into(),
                ..Default::default()
            },
        ];
        let clean = clean_blog_cards(&cards);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].blog_body, "body");
        assert_eq!(clean[0].deals_mentioned, vec![mention("Notion", "n.png", "Docs")]);
    }

    #[test]
    fn test_benefit_modules_cleanup() {
        let modules = vec![
            BenefitModule {
                title: "".into(),
                benefits: vec!["Fast".into(), " ".into()],
            },
            BenefitModule {
                title: " ".into(),
                benefits: vec!["".into()],
            },
            BenefitModule {
                title: " Pricing ".into(),
                benefits: vec![],
            },
        ];
        let clean = clean_benefit_modules(&modules);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].title, DEFAULT_MODULE_TITLE);
        assert_eq!(clean[0].benefits, vec!["Fast"]);
        assert_eq!(clean[1].title, "Pricing");
    }

    #[test]
    fn test_publish_payload() {
        let body = publishable().prepare(SaveMode::Publish).expect("valid");
        assert_eq!(body["blogSlug"], "best-notes-apps");
        assert_eq!(body["blogIsPublished"], true);
        assert_eq!(body["blogReadingTime"], "5 Minute");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_tools_get_default_category_on_save() {
        let mut d = publishable();
        d.blog_tools_mentioned = vec![mention("Notion", "", ""), mention("  ", "x.png", "Docs")];
        let body = d.prepare(SaveMode::Draft).expect("draft");
        assert_eq!(
            body["blogToolsMentioned"],
            serde_json::json!([
                {"toolName": "Notion", "toolLogo": "", "toolCategory": "Tool", "isVerified": false}
            ])
        );
    }

    #[test]
    fn test_cleared_heading_clears_slug() {
        let mut d = publishable();
        d.blog_heading = "  ".to_string();
        assert_eq!(d.blog_slug, "best-notes-apps");
        let body = d.prepare(SaveMode::Draft).expect("draft");
        assert_eq!(body["blogSlug"], "");
    }

    #[test]
    fn test_draft_skips_required_fields() {
        let mut d = BlogDraft::default();
        d.set_heading("  Half done ");
        let body = d.prepare(SaveMode::Draft).expect("drafts are not gated");
        assert_eq!(body["blogHeading"], "Half done");
        assert_eq!(body["blogSlug"], "half-done");
        assert_eq!(body["blogIsPublished"], false);
    }

    #[test]
    fn test_publish_lists_missing_fields_without_network() {
        let api = RecordingApi::default();
        let draft = BlogDraft {
            blog_author: String::new(),
            tip_bulb_text: " ".into(),
            ..publishable()
        };
        let err = block_on(submit(&api, &draft, SaveMode::Publish)).expect_err("invalid");
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Tip Bulb Text, Author"
        );
        assert_eq!(api.count(), 0);
    }

    #[test]
    fn test_edit_mode_updates_by_id() {
        let api = RecordingApi::default();
        let draft = BlogDraft {
            id: Some("b1".into()),
            ..publishable()
        };
        block_on(submit(&api, &draft, SaveMode::Draft)).expect("saved");
        let call = api.last().expect("one call");
        assert_eq!((call.method, call.collection), ("PUT", Collection::Blogs));
        assert_eq!(call.body["blogIsPublished"], false);
    }
}
