use crate::api::Collection;
use crate::components::hooks::use_synced;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label, Spinner};
use crate::models::ComparisonSummary;
use crate::selection::{CandidatePool, Keyed, SelectionSet, MAX_SELECTED};
use crate::state::AppContext;
use icons::X;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

type KeyedComparison = Keyed<ComparisonSummary>;

/// Picker for related comparisons, capped at [`MAX_SELECTED`].
#[component]
pub fn MoreComparisonsEditor(
    #[prop(into)] initial: Signal<Option<Vec<ComparisonSummary>>>,
    #[prop(into)] on_change: Callback<Vec<ComparisonSummary>>,
    /// The comparison being edited; never offered as its own candidate.
    #[prop(into)] exclude_id: Signal<Option<String>>,
    #[prop(into, default = "More Comparisons".to_string())] label: String,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let selection = RwSignal::new(SelectionSet::<ComparisonSummary>::new(MAX_SELECTED));
    use_synced(initial, on_change, selection, SelectionSet::items, SelectionSet::reset);

    let pool = RwSignal::new(CandidatePool::<ComparisonSummary>::default());
    let loading = RwSignal::new(true);
    let query = RwSignal::new(String::new());

    let client = app_state.api_client.get_untracked();
    spawn_local(async move {
        match client.fetch_list::<ComparisonSummary>(Collection::Comparisons).await {
            Ok(items) => {
                pool.try_set(CandidatePool::new(items));
            }
            Err(e) => warn!("loading comparisons failed: {}", e),
        }
        loading.try_set(false);
    });

    let available = move || {
        let own = exclude_id.get().unwrap_or_default();
        let q = query.get();
        pool.with(|p| {
            selection.with(|s| {
                p.available(s, &q)
                    .into_iter()
                    .filter(|e| own.is_empty() || e.item.backend_id() != own)
                    .cloned()
                    .collect::<Vec<KeyedComparison>>()
            })
        })
    };
    let is_full = move || selection.with(|s| s.is_full());

    view! {
        <div class="flex flex-col gap-2">
            <Label>
                {move || format!("{} ({}/{})", label, selection.with(|s| s.len()), MAX_SELECTED)}
            </Label>
            <ul class="flex flex-col gap-1">
                <For
                    each=move || selection.with(|s| s.entries().to_vec())
                    key=|e| e.key.clone()
                    children=move |entry: KeyedComparison| {
                        let key = entry.key.clone();
                        view! {
                            <li class="flex items-center justify-between rounded-md border px-2 py-1 text-sm">
                                <span class="truncate">{entry.item.display_title().to_string()}</span>
                                <button
                                    type="button"
                                    class="rounded p-1 text-muted-foreground hover:text-destructive"
                                    aria-label="Remove comparison"
                                    on:click=move |_| {
                                        selection.update(|s| {
                                            s.remove(&key);
                                        })
                                    }
                                >
                                    <X class="size-4" />
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <Input
                value=query
                on_value=move |v: String| query.set(v)
                placeholder="Filter comparisons"
                class="h-8"
            />
            <Show when=move || !loading.get() fallback=|| view! { <Spinner class="text-muted-foreground" /> }>
                <Show
                    when=move || pool.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="text-xs text-muted-foreground">"No comparisons available"</p> }
                >
                    <ul class="flex flex-col gap-1">
                        <For
                            each=available
                            key=|e| e.key.clone()
                            children=move |entry: KeyedComparison| {
                                let title = entry.item.display_title().to_string();
                                view! {
                                    <li class="flex items-center justify-between gap-2 text-sm">
                                        <span class="truncate">{title}</span>
                                        <Button
                                            variant=ButtonVariant::Outline
                                            size=ButtonSize::Sm
                                            attr:disabled=is_full
                                            on:click=move |_| {
                                                selection.update(|s| {
                                                    s.add_keyed(entry.clone());
                                                })
                                            }
                                        >
                                            "Add"
                                        </Button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}
