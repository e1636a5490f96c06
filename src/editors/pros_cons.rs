use super::{bind_card_text, card_keys, card_number, slots};
use crate::cards::NumberedCards;
use crate::components::hooks::use_synced_cards;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::models::{ProsConsCard, ProsConsPair};
use icons::X;
use leptos::prelude::*;

type Cards = RwSignal<NumberedCards<ProsConsCard>>;

fn edit_pair(cards: Cards, key: u64, idx: usize, edit: impl FnOnce(&mut ProsConsPair)) {
    cards.update(|c| {
        c.update(key, |card| {
            if let Some(pair) = card.pros_cons_pairs.get_mut(idx) {
                edit(pair);
            }
        });
    });
}

fn pair_text(
    cards: Cards,
    key: u64,
    idx: usize,
    get: fn(&ProsConsPair) -> String,
) -> Signal<String> {
    Signal::derive(move || {
        cards.with(|c| {
            c.get(key)
                .and_then(|card| card.pros_cons_pairs.get(idx))
                .map(get)
                .unwrap_or_default()
        })
    })
}

#[component]
fn ProsConsCardEditor(cards: Cards, card_key: u64) -> impl IntoView {
    let (pros_title, set_pros_title) =
        bind_card_text(cards, card_key, |c| c.title_pros.clone(), |c, v| c.title_pros = v);
    let (cons_title, set_cons_title) =
        bind_card_text(cards, card_key, |c| c.title_cons.clone(), |c, v| c.title_cons = v);
    let pair_count = move || {
        cards.with(|c| c.get(card_key).map_or(0, |card| card.pros_cons_pairs.len()))
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
            <div class="grid grid-cols-2 gap-2">
                <Input value=pros_title on_value=set_pros_title placeholder="Pros title" />
                <Input value=cons_title on_value=set_cons_title placeholder="Cons title" />
            </div>
            <For
                each=move || slots(pair_count())
                key=|i| *i
                children=move |idx| {
                    view! {
                        <div class="grid grid-cols-[1fr_1fr_auto] items-center gap-2">
                            <Input
                                value=pair_text(cards, card_key, idx, |p| p.pro.clone())
                                on_value=move |v: String| edit_pair(cards, card_key, idx, |p| p.pro = v)
                                placeholder="Pro"
                                class="h-8"
                            />
                            <Input
                                value=pair_text(cards, card_key, idx, |p| p.con.clone())
                                on_value=move |v: String| edit_pair(cards, card_key, idx, |p| p.con = v)
                                placeholder="Con"
                                class="h-8"
                            />
                            <button
                                type="button"
                                class="rounded p-1 text-muted-foreground hover:text-destructive"
                                aria-label="Remove pair"
                                on:click=move |_| {
                                    cards.update(|c| {
                                        c.update(card_key, |card| {
                                            if idx < card.pros_cons_pairs.len() {
                                                card.pros_cons_pairs.remove(idx);
                                            }
                                        });
                                    })
                                }
                            >
                                <X class="size-4" />
                            </button>
                        </div>
                    }
                }
            />
            <Button
                variant=ButtonVariant::Link
                size=ButtonSize::Sm
                on:click=move |_| {
                    cards.update(|c| {
                        c.update(card_key, |card| card.pros_cons_pairs.push(ProsConsPair::default()));
                    })
                }
            >
                "Add Pro/Con"
            </Button>
        </div>
    }
}

#[component]
pub fn ProsConsEditor(
    #[prop(into)] initial: Signal<Option<Vec<ProsConsCard>>>,
    #[prop(into)] on_change: Callback<Vec<ProsConsCard>>,
) -> impl IntoView {
    let cards = use_synced_cards(initial, on_change);

    view! {
        <div class="flex flex-col gap-3">
            <Label>"Pros & Cons Cards"</Label>
            <For
                each=move || card_keys(cards)
                key=|k| *k
                children=move |card_key| view! { <ProsConsCardEditor cards=cards card_key=card_key /> }
            />
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| {
                    cards.update(|c| {
                        c.add(ProsConsCard {
                            pros_cons_pairs: vec![ProsConsPair::default()],
                            ..Default::default()
                        });
                    })
                }
            >
                "Add Pros/Cons Card"
            </Button>
        </div>
    }
}
