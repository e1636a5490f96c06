use super::{bind_text, slots};
use crate::components::hooks::use_sync_guard;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Checkbox, Input, Label};
use crate::models::{Feature, FeaturesData};
use icons::X;
use leptos::prelude::*;

/// Tool columns available in the saved feature table.
pub(crate) const MAX_COMPARED_TOOLS: usize = 3;

fn edit_feature(data: RwSignal<FeaturesData>, idx: usize, edit: impl FnOnce(&mut Feature)) {
    data.update(|d| {
        if let Some(f) = d.features.get_mut(idx) {
            edit(f);
        }
    });
}

#[component]
fn FeatureRow(data: RwSignal<FeaturesData>, idx: usize) -> impl IntoView {
    let name = Signal::derive(move || {
        data.with(|d| d.features.get(idx).map(|f| f.feature_name.clone()).unwrap_or_default())
    });

    view! {
        <div class="flex flex-wrap items-center gap-3">
            <Input
                value=name
                on_value=move |v: String| edit_feature(data, idx, |f| f.feature_name = v)
                placeholder="Feature"
                class="h-8 max-w-60"
            />
            {move || {
                data.with(|d| d.tools.clone())
                    .into_iter()
                    .enumerate()
                    .map(|(slot, tool)| {
                        let key = slot.to_string();
                        let checked = {
                            let key = key.clone();
                            Signal::derive(move || {
                                data.with(|d| {
                                    d.features
                                        .get(idx)
                                        .and_then(|f| f.tool_availability.get(&key).copied())
                                        .unwrap_or(false)
                                })
                            })
                        };
                        let label = if tool.trim().is_empty() { format!("Tool {}", slot + 1) } else { tool };
                        view! {
                            <Checkbox
                                label=label
                                checked=checked
                                on_toggle=move |on: bool| {
                                    let key = key.clone();
                                    edit_feature(data, idx, |f| {
                                        f.tool_availability.insert(key, on);
                                    })
                                }
                            />
                        }
                    })
                    .collect_view()
            }}
            <button
                type="button"
                class="rounded p-1 text-muted-foreground hover:text-destructive"
                aria-label="Remove feature"
                on:click=move |_| {
                    data.update(|d| {
                        if idx < d.features.len() {
                            d.features.remove(idx);
                        }
                    })
                }
            >
                <X class="size-4" />
            </button>
        </div>
    }
}

/// Feature availability table of a comparison.
#[component]
pub fn FeaturesEditor(
    #[prop(into)] initial: Signal<Option<FeaturesData>>,
    #[prop(into)] on_change: Callback<FeaturesData>,
) -> impl IntoView {
    let data = use_sync_guard(initial, on_change);
    let (section_title, set_section_title) =
        bind_text(data, |d| d.section_title.clone(), |d, v| d.section_title = v);
    let (headline, set_headline) =
        bind_text(data, |d| d.features_headline.clone(), |d, v| d.features_headline = v);
    let tool_count = move || data.with(|d| d.tools.len());

    view! {
        <div class="flex flex-col gap-3">
            <Label>"Features Comparison"</Label>
            <div class="grid grid-cols-2 gap-2">
                <Input value=section_title on_value=set_section_title placeholder="Section title" />
                <Input value=headline on_value=set_headline placeholder="Features headline" />
            </div>
            <div class="flex flex-wrap items-center gap-2">
                <For
                    each=move || slots(tool_count())
                    key=|i| *i
                    children=move |slot| {
                        let value = Signal::derive(move || {
                            data.with(|d| d.tools.get(slot).cloned().unwrap_or_default())
                        });
                        view! {
                            <Input
                                value=value
                                on_value=move |v: String| {
                                    data.update(|d| {
                                        if let Some(t) = d.tools.get_mut(slot) {
                                            *t = v;
                                        }
                                    })
                                }
                                placeholder=format!("Tool {}", slot + 1)
                                class="h-8 max-w-48"
                            />
                        }
                    }
                />
                <Show when=move || tool_count() < MAX_COMPARED_TOOLS>
                    <Button
                        variant=ButtonVariant::Link
                        size=ButtonSize::Sm
                        on:click=move |_| {
                            data.update(|d| {
                                if d.tools.len() < MAX_COMPARED_TOOLS {
                                    d.tools.push(String::new());
                                }
                            })
                        }
                    >
                        "Add Tool"
                    </Button>
                </Show>
            </div>
            <For
                each=move || slots(data.with(|d| d.features.len()))
                key=|i| *i
                children=move |idx| view! { <FeatureRow data=data idx=idx /> }
            />
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| data.update(|d| d.features.push(Feature::default()))
            >
                "Add Feature"
            </Button>
        </div>
    }
}
