use super::{bind_card_text, card_keys, card_number, DealSearchBox};
use crate::cards::NumberedCards;
use crate::components::hooks::use_synced_cards;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label, TextArea};
use crate::models::{BlogSection, DealSummary, ToolMention};
use crate::selection::{add_mention, remove_mention};
use crate::shape::mention_from_deal;
use icons::X;
use leptos::prelude::*;

fn optional_text(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn some_text(v: String) -> Option<String> {
    (!v.is_empty()).then_some(v)
}

#[component]
fn ToolBlogCard(cards: RwSignal<NumberedCards<BlogSection>>, card_key: u64) -> impl IntoView {
    let (title, set_title) =
        bind_card_text(cards, card_key, |c| c.blog_title.clone(), |c, v| c.blog_title = v);
    let (body, set_body) =
        bind_card_text(cards, card_key, |c| c.blog_body.clone(), |c, v| c.blog_body = v);
    let (image, set_image) = bind_card_text(
        cards,
        card_key,
        |c| optional_text(&c.blog_image),
        |c, v| c.blog_image = some_text(v),
    );
    let (note, set_note) = bind_card_text(
        cards,
        card_key,
        |c| optional_text(&c.additional_note),
        |c, v| c.additional_note = some_text(v),
    );

    let mentions = move || {
        cards.with(|c| {
            c.get(card_key)
                .map(|s| s.deals_mentioned.clone())
                .unwrap_or_default()
        })
    };
    let on_pick = move |deal: DealSummary| {
        cards.update(|c| {
            c.update(card_key, |s| {
                add_mention(&mut s.deals_mentioned, mention_from_deal(&deal));
            });
        });
    };
    let remove = move |name: String| {
        cards.update(|c| {
            c.update(card_key, |s| {
                remove_mention(&mut s.deals_mentioned, &name);
            });
        });
    };

    view! {
        <div class="flex flex-col gap-2 rounded-lg border p-3">
            <div class="flex items-center justify-between">
                <span class="text-xs font-semibold">
                    {move || format!("Card {}", card_number(cards, card_key))}
                </span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    on:click=move |_| {
                        cards.update(|c| {
                            c.delete(card_key);
                        })
                    }
                >
                    "Delete"
                </Button>
            </div>
            <Label required=true>"Title"</Label>
            <Input value=title on_value=set_title placeholder="Card title" />
            <Label required=true>"Body"</Label>
            <TextArea value=body on_value=set_body rows=5 placeholder="Card body (HTML allowed)" />
            <Label>"Image URL"</Label>
            <Input value=image on_value=set_image placeholder="https://..." />
            <Label>"Additional Note"</Label>
            <Input value=note on_value=set_note />
            <Label>"Deals Mentioned"</Label>
            <DealSearchBox placeholder="Search deals to mention" on_pick=on_pick />
            <div class="flex flex-wrap gap-1.5">
                <For
                    each=mentions
                    key=|m| m.tool_name.clone()
                    children=move |m: ToolMention| {
                        let name = m.tool_name.clone();
                        view! {
                            <span class="inline-flex items-center gap-1 rounded-full border px-2 py-0.5 text-xs">
                                {m.tool_name}
                                <button
                                    type="button"
                                    aria-label="Remove mention"
                                    on:click=move |_| remove(name.clone())
                                >
                                    <X class="size-3" />
                                </button>
                            </span>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// Numbered "tool blog cards" of a blog or comparison.
#[component]
pub fn ToolBlogCardsEditor(
    #[prop(into)] initial: Signal<Option<Vec<BlogSection>>>,
    #[prop(into)] on_change: Callback<Vec<BlogSection>>,
) -> impl IntoView {
    let cards = use_synced_cards(initial, on_change);

    view! {
        <div class="flex flex-col gap-3">
            <For
                each=move || card_keys(cards)
                key=|k| *k
                children=move |card_key| view! { <ToolBlogCard cards=cards card_key=card_key /> }
            />
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| {
                    cards.update(|c| {
                        c.add(BlogSection::default());
                    })
                }
            >
                "Add Tool Blog Card"
            </Button>
        </div>
    }
}
