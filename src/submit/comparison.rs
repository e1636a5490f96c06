use super::{
    check_min_cards, check_required, encode_payload, SaveMode, Submittable, ValidationError,
};
use crate::api::Collection;
use crate::drafts::ComparisonDraft;
use crate::models::{BlogModuleEntry, BlogSection, ProsConsCard, ToolMention};
use crate::shape::{features_to_positional, with_mention_defaults, LogoFallback};
use crate::util::slugify;
use serde_json::{json, Value};

pub(crate) const MIN_PROS_CONS_CARDS: usize = 2;
pub(crate) const MIN_TOOL_BLOG_CARDS: usize = 1;

fn named(mentions: &[ToolMention]) -> Vec<ToolMention> {
    mentions
        .iter()
        .filter(|m| !m.tool_name.trim().is_empty())
        .cloned()
        .collect()
}

fn clean_sections(cards: &[BlogSection]) -> Vec<BlogSection> {
    cards
        .iter()
        .filter(|c| !c.blog_title.trim().is_empty() && !c.blog_body.trim().is_empty())
        .map(|c| BlogSection {
            deals_mentioned: named(&c.deals_mentioned),
            ..c.clone()
        })
        .collect()
}

/// Pairs with neither a pro nor a con are dropped; cards themselves are kept.
fn clean_pros_cons(cards: &[ProsConsCard]) -> Vec<ProsConsCard> {
    cards
        .iter()
        .map(|c| ProsConsCard {
            pros_cons_pairs: c
                .pros_cons_pairs
                .iter()
                .filter(|p| !p.pro.trim().is_empty() || !p.con.trim().is_empty())
                .cloned()
                .collect(),
            ..c.clone()
        })
        .collect()
}

/// Trimmed, non-empty module names numbered `1..N`.
pub(crate) fn sanitize_blog_modules(modules: &[BlogModuleEntry]) -> Vec<BlogModuleEntry> {
    modules
        .iter()
        .map(|m| m.module_name.trim())
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(idx, name)| BlogModuleEntry {
            module_number: idx as u32 + 1,
            module_name: name.to_string(),
        })
        .collect()
}

impl Submittable for ComparisonDraft {
    const COLLECTION: Collection = Collection::Comparisons;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError> {
        let mut clean = self.clone();
        clean.tool_blog_cards = clean_sections(&self.tool_blog_cards);
        clean.tools_mentioned =
            with_mention_defaults(&self.tools_mentioned, LogoFallback::Placeholder);
        clean.pros_cons_cards = clean_pros_cons(&self.pros_cons_cards);
        clean.blog_modules = sanitize_blog_modules(&self.blog_modules);
        clean.slug = slugify(&clean.hero_heading);

        if mode.is_publish() {
            check_required(&[
                ("Hero Heading", clean.hero_heading.as_str()),
                ("Hero Body", clean.hero_body.as_str()),
                ("Section Headline", clean.section_headline.as_str()),
                ("Tip Bulb Text", clean.tip_bulb_text.as_str()),
                ("Author", clean.author_id.as_str()),
                ("Blog Category", clean.blog_category.as_str()),
                ("Reading Time", clean.reading_time.as_str()),
                ("Slug", clean.slug.as_str()),
            ])?;
            check_min_cards(clean.pros_cons_cards.len(), MIN_PROS_CONS_CARDS, "pros/cons cards")?;
            check_min_cards(clean.tool_blog_cards.len(), MIN_TOOL_BLOG_CARDS, "tool blog card")?;
        }
        clean.is_published = mode.is_publish();

        let mut body = encode_payload(&clean)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "featuresComparison".into(),
                json!(features_to_positional(&clean.features_comparison)),
            );
            map.insert("moreComparisons".into(), json!(clean.more_comparison_ids()));
            map.insert("author".into(), json!(clean.author_id));
        }
        Ok(body)
    }
}
