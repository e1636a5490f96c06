use crate::models::{ComparisonSummary, ToolChip, ToolMention};
use leptos::logging::warn;

/// Selection cap of the "more comparisons" picker.
pub(crate) const MAX_SELECTED: usize = 8;

/// Candidates shown at once under a picker's search box.
pub(crate) const CANDIDATE_PAGE_SIZE: usize = 6;

/// Identity-bearing fields of a candidate, highest priority first.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct IdentityFields<'a> {
    pub mongo_id: Option<&'a str>,
    pub id: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

/// An entity that can be picked from a candidate pool.
pub(crate) trait Candidate: Clone {
    fn identity_fields(&self) -> IdentityFields<'_>;

    /// Fields matched by the picker's free-text filter.
    fn searchable_fields(&self) -> Vec<&str>;
}

impl Candidate for ComparisonSummary {
    fn identity_fields(&self) -> IdentityFields<'_> {
        IdentityFields {
            mongo_id: self.mongo_id.as_deref(),
            id: self.id.as_deref(),
            slug: self.slug.as_deref(),
            display_name: self.hero_heading.as_deref(),
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        [
            self.title.as_deref().or(self.hero_heading.as_deref()),
            self.subtitle.as_deref().or(self.section_headline.as_deref()),
            self.description.as_deref().or(self.hero_body.as_deref()),
            self.slug.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Stable key for a candidate: `_id`, `id`, `slug`, then display name.
///
/// Entities carrying none of them get a random key; that is a data-quality problem on
/// the backend side and is logged.
pub(crate) fn resolve_identity(fields: &IdentityFields<'_>) -> String {
    let found = [fields.mongo_id, fields.id, fields.slug, fields.display_name]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty());

    match found {
        Some(key) => key.to_string(),
        None => {
            let key = uuid::Uuid::new_v4().to_string();
            warn!("candidate without _id/id/slug/displayName, assigned random key {key}");
            key
        }
    }
}

/// A candidate together with the identity resolved when it entered the editor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Keyed<E> {
    pub key: String,
    pub item: E,
}

impl<E: Candidate> Keyed<E> {
    pub fn new(item: E) -> Self {
        Self {
            key: resolve_identity(&item.identity_fields()),
            item,
        }
    }
}

/// Full list of pickable entities, keyed once at load time.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CandidatePool<E> {
    entries: Vec<Keyed<E>>,
}

impl<E> Default for CandidatePool<E> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<E: Candidate> CandidatePool<E> {
    pub fn new(items: Vec<E>) -> Self {
        Self {
            entries: items.into_iter().map(Keyed::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unselected entries, optionally filtered by a case-insensitive substring match,
    /// capped at [`CANDIDATE_PAGE_SIZE`].
    pub fn available<'a>(
        &'a self,
        selection: &SelectionSet<E>,
        query: &str,
    ) -> Vec<&'a Keyed<E>> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| !selection.contains(&e.key))
            .filter(|e| {
                needle.is_empty()
                    || e.item
                        .searchable_fields()
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
            })
            .take(CANDIDATE_PAGE_SIZE)
            .collect()
    }
}

/// Ordered, bounded, duplicate-free subset of a candidate pool.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SelectionSet<E> {
    items: Vec<Keyed<E>>,
    max: usize,
}

impl<E: Candidate> SelectionSet<E> {
    pub fn new(max: usize) -> Self {
        Self { items: vec![], max }
    }

    /// Build from an externally supplied list; duplicates and overflow are dropped.
    pub fn from_items(items: Vec<E>, max: usize) -> Self {
        let mut set = Self::new(max);
        set.reset(items);
        set
    }

    /// Replace the whole selection (parent reloaded its canonical list).
    pub fn reset(&mut self, items: Vec<E>) {
        self.items.clear();
        for item in items {
            self.add(item);
        }
    }

    /// Append unless already present or full. Returns whether the set changed.
    pub fn add(&mut self, item: E) -> bool {
        self.add_keyed(Keyed::new(item))
    }

    pub fn add_keyed(&mut self, entry: Keyed<E>) -> bool {
        if self.is_full() || self.contains(&entry.key) {
            return false;
        }
        self.items.push(entry);
        true
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.key != key);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|e| e.key == key)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn entries(&self) -> &[Keyed<E>] {
        &self.items
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn items(&self) -> Vec<E> {
        self.items.iter().map(|e| e.item.clone()).collect()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// The "Tools Mentioned" chips: unbounded, deduplicated by case-insensitive name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ToolSelection {
    tools: Vec<ToolChip>,
}

impl ToolSelection {
    pub fn new(tools: Vec<ToolChip>) -> Self {
        let mut s = Self::default();
        for t in tools {
            s.add(t);
        }
        s
    }

    pub fn tools(&self) -> &[ToolChip] {
        &self.tools
    }

    pub fn into_tools(self) -> Vec<ToolChip> {
        self.tools
    }

    pub fn add(&mut self, chip: ToolChip) -> bool {
        let chip = chip.canonical();
        if chip.name.is_empty() || self.tools.iter().any(|t| same_name(&t.name, &chip.name)) {
            return false;
        }
        self.tools.push(chip);
        true
    }

    /// Free-text entry (Enter in the search box).
    pub fn add_named(&mut self, name: &str) -> bool {
        self.add(ToolChip {
            id: name.trim().to_string(),
            name: name.to_string(),
            logo: None,
            category: None,
        })
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tools.len();
        self.tools.retain(|t| t.id != id);
        self.tools.len() != before
    }

    pub fn update_logo(&mut self, id: &str, logo: &str) {
        if let Some(t) = self.tools.iter_mut().find(|t| t.id == id) {
            t.logo = Some(logo.to_string()).filter(|l| !l.is_empty());
        }
    }

    pub fn update_category(&mut self, id: &str, category: &str) {
        if let Some(t) = self.tools.iter_mut().find(|t| t.id == id) {
            t.category = Some(category.to_string()).filter(|c| !c.is_empty());
        }
    }
}

/// Add a mention to a section's "deals mentioned" list. Same-name mentions are ignored.
pub(crate) fn add_mention(list: &mut Vec<ToolMention>, mention: ToolMention) -> bool {
    if mention.tool_name.trim().is_empty()
        || list.iter().any(|m| same_name(&m.tool_name, &mention.tool_name))
    {
        return false;
    }
    list.push(mention);
    true
}

pub(crate) fn remove_mention(list: &mut Vec<ToolMention>, name: &str) -> bool {
    let before = list.len();
    list.retain(|m| !same_name(&m.tool_name, name));
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(id: &str, heading: &str) -> ComparisonSummary {
        ComparisonSummary {
            mongo_id: Some(id.to_string()),
            hero_heading: Some(heading.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_respects_cap() {
        let mut set = SelectionSet::new(MAX_SELECTED);
        for i in 0..10 {
            set.add(comparison(&format!("c{i}"), &format!("Heading {i}")));
            assert!(set.len() <= MAX_SELECTED);
        }
        assert_eq!(set.len(), 8);
        assert!(set.is_full());
        assert_eq!(set.ids().last().copied(), Some("c7"));
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut set = SelectionSet::new(MAX_SELECTED);
        assert!(set.add(comparison("a", "A")));
        assert!(!set.add(comparison("a", "A again")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.items()[0].hero_heading.as_deref(), Some("A"));
    }

    #[test]
    fn test_remove_and_order() {
        let mut set = SelectionSet::new(MAX_SELECTED);
        set.add(comparison("a", "A"));
        set.add(comparison("b", "B"));
        set.add(comparison("c", "C"));
        assert!(set.remove("b"));
        assert!(!set.remove("zzz"));
        assert_eq!(set.ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_reset_dedups_and_truncates() {
        let items: Vec<_> = (0..12)
            .map(|i| comparison(&format!("c{}", i % 10), "x"))
            .collect();
        let set = SelectionSet::from_items(items, MAX_SELECTED);
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_identity_priority() {
        let all = IdentityFields {
            mongo_id: Some("m"),
            id: Some("i"),
            slug: Some("s"),
            display_name: Some("d"),
        };
        assert_eq!(resolve_identity(&all), "m");
        let no_mongo = IdentityFields {
            mongo_id: None,
            ..all
        };
        assert_eq!(resolve_identity(&no_mongo), "i");
        let only_name = IdentityFields {
            display_name: Some("d"),
            ..Default::default()
        };
        assert_eq!(resolve_identity(&only_name), "d");
    }

    #[test]
    fn test_identity_random_fallback_is_unique() {
        let a = resolve_identity(&IdentityFields::default());
        let b = resolve_identity(&IdentityFields::default());
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_pool_keeps_generated_identity() {
        let pool = CandidatePool::new(vec![ComparisonSummary::default()]);
        let mut set = SelectionSet::new(MAX_SELECTED);
        let entry = pool.available(&set, "")[0].clone();
        assert!(set.add_keyed(entry));
        assert!(pool.available(&set, "").is_empty());
    }

    #[test]
    fn test_available_excludes_selected_and_caps() {
        let pool = CandidatePool::new(
            (0..10)
                .map(|i| comparison(&format!("c{i}"), &format!("Tool {i}")))
                .collect(),
        );
        let mut set = SelectionSet::new(MAX_SELECTED);
        set.add(comparison("c0", "Tool 0"));
        let shown = pool.available(&set, "");
        assert_eq!(shown.len(), CANDIDATE_PAGE_SIZE);
        assert!(shown.iter().all(|e| e.key != "c0"));
    }

    #[test]
    fn test_available_filters_case_insensitively() {
        let pool = CandidatePool::new(vec![
            ComparisonSummary {
                mongo_id: Some("1".to_string()),
                hero_heading: Some("Notion vs Obsidian".to_string()),
                ..Default::default()
            },
            ComparisonSummary {
                mongo_id: Some("2".to_string()),
                hero_heading: Some("Slack vs Teams".to_string()),
                slug: Some("slack-vs-teams".to_string()),
                ..Default::default()
            },
            ComparisonSummary {
                mongo_id: Some("3".to_string()),
                hero_heading: Some("Zoom vs Meet".to_string()),
                hero_body: Some("Video calls for TEAMS".to_string()),
                ..Default::default()
            },
        ]);
        let set = SelectionSet::new(MAX_SELECTED);
        let keys: Vec<_> = pool
            .available(&set, "  teams ")
            .iter()
            .map(|e| e.key.clone())
            .collect();
        assert_eq!(keys, vec!["2", "3"]);
    }

    #[test]
    fn test_tool_selection_dedups_by_name() {
        let mut tools = ToolSelection::default();
        assert!(tools.add_named("Notion"));
        assert!(!tools.add_named("  notion "));
        assert!(!tools.add_named("   "));
        assert!(tools.add_named("Linear"));
        assert_eq!(tools.tools().len(), 2);

        tools.update_logo("Notion", "n.png");
        tools.update_category("Notion", "Docs");
        assert_eq!(tools.tools()[0].logo.as_deref(), Some("n.png"));
        assert_eq!(tools.tools()[0].category.as_deref(), Some("Docs"));

        assert!(tools.remove("Notion"));
        assert_eq!(tools.tools()[0].name, "Linear");
    }

    #[test]
    fn test_add_mention_dedups() {
        let mut list = vec![];
        let m = ToolMention {
            tool_name: "Notion".to_string(),
            ..Default::default()
        };
        assert!(add_mention(&mut list, m.clone()));
        assert!(!add_mention(&mut list, m));
        assert!(!add_mention(&mut list, ToolMention::default()));
        assert!(remove_mention(&mut list, "NOTION"));
        assert!(list.is_empty());
    }
}
