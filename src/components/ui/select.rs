use leptos::prelude::*;
use tw_merge::tw_merge;

/// One `<option>`: submitted value and visible label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Native `<select>`. An empty first option stands for "nothing chosen".
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, default = "Select...".to_string())] placeholder: String,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input h-9 w-full rounded-md border bg-transparent px-3 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    view! {
        <select
            class=merged_class
            id=id
            prop:value=move || value.get()
            on:change=move |ev| on_value.run(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            <For
                each=move || options.get()
                key=|o| o.value.clone()
                children=move |o: SelectOption| {
                    let selected = {
                        let v = o.value.clone();
                        move || value.get() == v
                    };
                    view! { <option value=o.value selected=selected>{o.label}</option> }
                }
            />
        </select>
    }
}
