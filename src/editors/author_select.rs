use crate::api::Collection;
use crate::components::ui::{Label, NativeSelect, SelectOption};
use crate::drafts::record_id;
use crate::state::AppContext;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

fn author_option(raw: &Value) -> Option<SelectOption> {
    let value = record_id(raw)?;
    let label = ["name", "authorName", "email"]
        .iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(value.as_str())
        .to_string();
    Some(SelectOption { value, label })
}

/// Author picker over `GET /api/authors`; the value is the author id.
#[component]
pub fn AuthorSelect(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let options = RwSignal::new(Vec::<SelectOption>::new());

    let client = app_state.api_client.get_untracked();
    spawn_local(async move {
        match client.list(Collection::Authors).await {
            Ok(rows) => {
                options.try_set(rows.iter().filter_map(author_option).collect());
            }
            Err(e) => warn!("loading authors failed: {}", e),
        }
    });

    view! {
        <div class="flex flex-col gap-1.5">
            <Label required=true>"Author"</Label>
            <NativeSelect
                options=options
                value=value
                on_value=on_value
                placeholder="Select an author"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_author_option_label_fallbacks() {
        let named = author_option(&json!({"_id": "a1", "name": "Ada"})).expect("has id");
        assert_eq!((named.value.as_str(), named.label.as_str()), ("a1", "Ada"));
        let bare = author_option(&json!({"id": "a2", "name": " "})).expect("has id");
        assert_eq!(bare.label, "a2");
        assert!(author_option(&json!({"name": "No id"})).is_none());
    }
}
