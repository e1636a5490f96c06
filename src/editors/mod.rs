//! Sub-editors. Each owns a local copy of one slice of the page's document, seeded and
//! reconciled through the sync guard, and reports edits upward through `on_change`.

mod author_select;
mod deal_search;
mod features;
mod image_upload;
mod modules;
mod more_comparisons;
mod pros_cons;
mod tool_blog_cards;
mod tools_mentioned;

pub(crate) use author_select::AuthorSelect;
pub(crate) use deal_search::DealSearchBox;
pub(crate) use features::FeaturesEditor;
pub(crate) use image_upload::ImageUploadField;
pub(crate) use modules::{BenefitModulesEditor, BlogModulesEditor};
pub(crate) use more_comparisons::MoreComparisonsEditor;
pub(crate) use pros_cons::ProsConsEditor;
pub(crate) use tool_blog_cards::ToolBlogCardsEditor;
pub(crate) use tools_mentioned::ToolsMentionedEditor;

use crate::cards::{Numbered, NumberedCards};
use leptos::prelude::*;

/// Getter/setter pair for one text field of a document held in a signal.
pub(crate) fn bind_text<D>(
    doc: RwSignal<D>,
    get: fn(&D) -> String,
    set: fn(&mut D, String),
) -> (Signal<String>, Callback<String>)
where
    D: Send + Sync + 'static,
{
    (
        Signal::derive(move || doc.with(get)),
        Callback::new(move |v: String| doc.update(|d| set(d, v))),
    )
}

/// Getter/setter pair for one text field of the card under `key`.
pub(crate) fn bind_card_text<T>(
    cards: RwSignal<NumberedCards<T>>,
    key: u64,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> (Signal<String>, Callback<String>)
where
    T: Numbered + Clone + Send + Sync + 'static,
{
    (
        Signal::derive(move || cards.with(|c| c.get(key).map(get).unwrap_or_default())),
        Callback::new(move |v: String| {
            cards.update(|c| {
                c.update(key, move |card| set(card, v));
            });
        }),
    )
}

/// Row indices `0..len` for index-keyed lists.
pub(crate) fn slots(len: usize) -> Vec<usize> {
    (0..len).collect()
}

pub(crate) fn card_keys<T>(cards: RwSignal<NumberedCards<T>>) -> Vec<u64>
where
    T: Numbered + Clone + Send + Sync + 'static,
{
    cards.with(|c| c.rows().iter().map(|r| r.key).collect())
}

pub(crate) fn card_number<T>(cards: RwSignal<NumberedCards<T>>, key: u64) -> u32
where
    T: Numbered + Clone + Send + Sync + 'static,
{
    cards.with(|c| c.get(key).map(Numbered::number).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_index_every_row() {
        assert_eq!(slots(3), vec![0, 1, 2]);
        assert!(slots(0).is_empty());
    }
}
