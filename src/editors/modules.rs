use super::{bind_card_text, card_keys, card_number, slots};
use crate::components::hooks::{use_sync_guard, use_synced_cards};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::models::{BenefitModule, BlogModuleEntry};
use icons::X;
use leptos::prelude::*;

/// Comparison "blog modules": a numbered list of module names.
#[component]
pub fn BlogModulesEditor(
    #[prop(into)] initial: Signal<Option<Vec<BlogModuleEntry>>>,
    #[prop(into)] on_change: Callback<Vec<BlogModuleEntry>>,
) -> impl IntoView {
    let cards = use_synced_cards(initial, on_change);

    view! {
        <div class="flex flex-col gap-2">
            <Label>"Blog Modules"</Label>
            <For
                each=move || card_keys(cards)
                key=|k| *k
                children=move |key| {
                    let (name, set_name) = bind_card_text(
                        cards,
                        key,
                        |m| m.module_name.clone(),
                        |m, v| m.module_name = v,
                    );
                    view! {
                        <div class="flex items-center gap-2">
                            <span class="w-6 text-right text-xs text-muted-foreground">
                                {move || card_number(cards, key)}
                            </span>
                            <Input value=name on_value=set_name placeholder="Module name" class="h-8" />
                            <button
                                type="button"
                                class="rounded p-1 text-muted-foreground hover:text-destructive"
                                aria-label="Remove module"
                                on:click=move |_| {
                                    cards.update(|c| {
                                        c.delete(key);
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
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| {
                    cards.update(|c| {
                        c.add(BlogModuleEntry::default());
                    })
                }
            >
                "Add Module"
            </Button>
        </div>
    }
}

fn module_text(
    modules: RwSignal<Vec<BenefitModule>>,
    idx: usize,
    get: fn(&BenefitModule) -> String,
) -> Signal<String> {
    Signal::derive(move || modules.with(|m| m.get(idx).map(get).unwrap_or_default()))
}

fn edit_module(
    modules: RwSignal<Vec<BenefitModule>>,
    idx: usize,
    edit: impl FnOnce(&mut BenefitModule),
) {
    modules.update(|m| {
        if let Some(module) = m.get_mut(idx) {
            edit(module);
        }
    });
}

#[component]
fn BenefitModuleCard(modules: RwSignal<Vec<BenefitModule>>, idx: usize) -> impl IntoView {
    let title = module_text(modules, idx, |m| m.title.clone());
    let benefit_count = move || modules.with(|m| m.get(idx).map_or(0, |m| m.benefits.len()));

    view! {
        <div class="flex flex-col gap-2 rounded-lg border p-3">
            <div class="flex items-center gap-2">
                <Input
                    value=title
                    on_value=move |v: String| edit_module(modules, idx, |m| m.title = v)
                    placeholder="Module Benefits"
                />
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    on:click=move |_| {
                        modules.update(|m| {
                            if idx < m.len() {
                                m.remove(idx);
                            }
                        })
                    }
                >
                    "Delete"
                </Button>
            </div>
            <For
                each=move || slots(benefit_count())
                key=|i| *i
                children=move |b| {
                    let value = Signal::derive(move || {
                        modules.with(|m| {
                            m.get(idx)
                                .and_then(|m| m.benefits.get(b).cloned())
                                .unwrap_or_default()
                        })
                    });
                    view! {
                        <div class="flex items-center gap-2 pl-4">
                            <Input
                                value=value
                                on_value=move |v: String| {
                                    edit_module(modules, idx, |m| {
                                        if let Some(slot) = m.benefits.get_mut(b) {
                                            *slot = v;
                                        }
                                    })
                                }
                                placeholder="Benefit"
                                class="h-8"
                            />
                            <button
                                type="button"
                                class="rounded p-1 text-muted-foreground hover:text-destructive"
                                aria-label="Remove benefit"
                                on:click=move |_| {
                                    edit_module(modules, idx, |m| {
                                        if b < m.benefits.len() {
                                            m.benefits.remove(b);
                                        }
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
                on:click=move |_| edit_module(modules, idx, |m| m.benefits.push(String::new()))
            >
                "Add Benefit"
            </Button>
        </div>
    }
}

/// Blog "modules": titled benefit lists.
#[component]
pub fn BenefitModulesEditor(
    #[prop(into)] initial: Signal<Option<Vec<BenefitModule>>>,
    #[prop(into)] on_change: Callback<Vec<BenefitModule>>,
) -> impl IntoView {
    let modules = use_sync_guard(initial, on_change);

    view! {
        <div class="flex flex-col gap-3">
            <Label>"Modules"</Label>
            <For
                each=move || slots(modules.with(Vec::len))
                key=|i| *i
                children=move |idx| view! { <BenefitModuleCard modules=modules idx=idx /> }
            />
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| modules.update(|m| m.push(BenefitModule::default()))
            >
                "Add Module"
            </Button>
        </div>
    }
}
