use super::DealSearchBox;
use crate::components::hooks::use_sync_guard;
use crate::components::ui::{Input, Label};
use crate::models::{DealSummary, ToolChip};
use crate::selection::ToolSelection;
use crate::shape::chip_from_deal;
use icons::X;
use leptos::prelude::*;

fn edit_tools(tools: RwSignal<Vec<ToolChip>>, op: impl FnOnce(&mut ToolSelection)) {
    tools.update(|t| {
        let mut selection = ToolSelection::new(std::mem::take(t));
        op(&mut selection);
        *t = selection.into_tools();
    });
}

fn chip_field(
    tools: RwSignal<Vec<ToolChip>>,
    id: String,
    get: fn(&ToolChip) -> Option<String>,
) -> Signal<String> {
    Signal::derive(move || {
        tools.with(|ts| {
            ts.iter()
                .find(|t| t.id == id)
                .and_then(get)
                .unwrap_or_default()
        })
    })
}

#[component]
pub fn ToolsMentionedEditor(
    #[prop(into)] initial: Signal<Option<Vec<ToolChip>>>,
    #[prop(into)] on_change: Callback<Vec<ToolChip>>,
) -> impl IntoView {
    let tools = use_sync_guard(initial, on_change);

    let on_pick = move |deal: DealSummary| {
        if let Some(chip) = chip_from_deal(&deal) {
            edit_tools(tools, |s| {
                s.add(chip);
            });
        }
    };
    let on_enter_text = Callback::new(move |name: String| {
        edit_tools(tools, |s| {
            s.add_named(&name);
        });
    });

    view! {
        <div class="flex flex-col gap-2">
            <Label>"Tools Mentioned"</Label>
            <DealSearchBox
                placeholder="Search deals or type a tool name and press Enter"
                on_pick=on_pick
                on_enter_text=on_enter_text
            />
            <ul class="flex flex-col gap-2">
                <For
                    each=move || tools.get()
                    key=|t| t.id.clone()
                    children=move |tool: ToolChip| {
                        let id = tool.id.clone();
                        let logo = chip_field(tools, id.clone(), |t| t.logo.clone());
                        let category = chip_field(tools, id.clone(), |t| t.category.clone());
                        let set_logo = {
                            let id = id.clone();
                            move |v: String| edit_tools(tools, |s| s.update_logo(&id, &v))
                        };
                        let set_category = {
                            let id = id.clone();
                            move |v: String| edit_tools(tools, |s| s.update_category(&id, &v))
                        };
                        view! {
                            <li class="grid grid-cols-[1fr_1fr_1fr_auto] items-center gap-2 rounded-md border px-2 py-1.5">
                                <span class="truncate text-sm font-medium">{tool.name}</span>
                                <Input value=logo on_value=set_logo placeholder="Logo URL" class="h-8" />
                                <Input value=category on_value=set_category placeholder="Category" class="h-8" />
                                <button
                                    type="button"
                                    class="rounded p-1 text-muted-foreground hover:text-destructive"
                                    aria-label="Remove tool"
                                    on:click=move |_| {
                                        edit_tools(tools, |s| {
                                            s.remove(&id);
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
        </div>
    }
}
