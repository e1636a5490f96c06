use crate::components::hooks::use_debounced_search;
use crate::components::ui::{Input, Spinner};
use crate::models::DealSummary;
use leptos::prelude::*;

fn deal_label(deal: &DealSummary) -> String {
    deal.title.clone().unwrap_or_else(|| "Untitled deal".to_string())
}

/// Type-ahead over `GET /api/deals?q=`. Picking a hit closes the dropdown.
#[component]
pub fn DealSearchBox(
    #[prop(into, optional)] placeholder: String,
    #[prop(into)] on_pick: Callback<DealSummary>,
    /// Enter with free text instead of a pick.
    #[prop(optional)] on_enter_text: Option<Callback<String>>,
) -> impl IntoView {
    let search = use_debounced_search();

    let on_enter = Callback::new(move |_: ()| {
        let Some(cb) = on_enter_text else {
            return;
        };
        let text = search.query.get_untracked();
        if !text.trim().is_empty() {
            cb.run(text);
            search.clear();
        }
    });

    let hits = move || search.results().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <div class="relative">
            <Input
                value=search.query
                on_value=move |v: String| search.input(v)
                on_enter=on_enter
                placeholder=placeholder
                class="pr-8"
            />
            <Show when=move || search.is_loading()>
                <Spinner class="absolute top-2.5 right-2 text-muted-foreground" />
            </Show>
            <Show when=move || search.shows_results()>
                <ul class="absolute z-10 mt-1 w-full rounded-md border bg-popover py-1 text-sm shadow-md">
                    <Show when=move || search.results().is_empty()>
                        <li class="px-3 py-1.5 text-xs text-muted-foreground">"No deals found"</li>
                    </Show>
                    <For
                        each=hits
                        key=|(idx, deal)| (*idx, deal_label(deal))
                        children=move |(_, deal): (usize, DealSummary)| {
                            let label = deal_label(&deal);
                            let category = deal.category.clone().or(deal.tag.clone()).unwrap_or_default();
                            view! {
                                <li>
                                    <button
                                        type="button"
                                        class="flex w-full items-center justify-between px-3 py-1.5 text-left hover:bg-accent"
                                        on:click=move |_| {
                                            on_pick.run(deal.clone());
                                            search.clear();
                                        }
                                    >
                                        <span>{label}</span>
                                        <span class="text-xs text-muted-foreground">{category}</span>
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
