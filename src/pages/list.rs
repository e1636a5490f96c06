use crate::api::Collection;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardDescription, CardHeader, CardTitle, Spinner,
};
use crate::drafts::record_id;
use crate::state::{AppContext, ToastKind};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

const TITLE_KEYS: [&str; 6] = [
    "blogHeading",
    "heroHeading",
    "productName",
    "authorName",
    "name",
    "title",
];
const PUBLISHED_KEYS: [&str; 2] = ["isPublished", "blogIsPublished"];

/// One row of a content list.
#[derive(Clone, Debug, PartialEq)]
struct ListEntry {
    id: String,
    title: String,
    /// `None` for collections without a publish flag (deals).
    published: Option<bool>,
}

impl ListEntry {
    fn from_record(raw: &Value) -> Option<Self> {
        let Some(id) = record_id(raw) else {
            warn!("list record without an id skipped");
            return None;
        };
        let title = TITLE_KEYS
            .iter()
            .filter_map(|key| raw.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|t| !t.is_empty())
            .unwrap_or("(untitled)")
            .to_string();
        let published = PUBLISHED_KEYS
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_bool));
        Some(Self {
            id,
            title,
            published,
        })
    }
}

#[component]
fn RecordList(
    collection: Collection,
    noun: &'static str,
    base_path: &'static str,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());
    let entries: RwSignal<Vec<ListEntry>> = RwSignal::new(vec![]);
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        loading.set(true);
        let client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match client.list(collection).await {
                Ok(records) => {
                    entries.try_set(records.iter().filter_map(ListEntry::from_record).collect());
                }
                Err(e) if e.is_unauthorized() => {
                    app_state.sign_out();
                    navigate.try_with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => app_state.notify(ToastKind::Error, e.to_string()),
            }
            loading.try_set(false);
        });
    });

    let delete = move |entry: ListEntry| {
        let prompt = format!("Delete \"{}\"? This cannot be undone.", entry.title);
        if !window().confirm_with_message(&prompt).unwrap_or(false) {
            return;
        }
        let client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match client.delete(collection, &entry.id).await {
                Ok(()) => {
                    app_state.notify(ToastKind::Success, format!("{} deleted", noun));
                    reload.try_update(|n| *n += 1);
                }
                Err(e) if e.is_unauthorized() => {
                    app_state.sign_out();
                    navigate.try_with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => app_state.notify(ToastKind::Error, e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-xl font-semibold">{format!("{}s", noun)}</h1>
                <Button
                    size=ButtonSize::Sm
                    on:click=move |_| {
                        navigate.with_value(|nav| nav(&format!("{}/new", base_path), Default::default()));
                    }
                >
                    {format!("New {}", noun)}
                </Button>
            </div>

            <Show when=move || loading.get()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Loading..."
                </div>
            </Show>
            <Show when=move || !loading.get() && entries.with(Vec::is_empty)>
                <div class="text-sm text-muted-foreground">{format!("No {}s yet.", noun.to_lowercase())}</div>
            </Show>

            <div class="flex flex-col gap-2">
                <For
                    each=move || entries.get()
                    key=|entry| entry.id.clone()
                    children=move |entry| {
                        let href = format!("{}/{}", base_path, entry.id);
                        let status = entry.published.map(|p| if p { "Published" } else { "Draft" });
                        let title = entry.title.clone();
                        view! {
                            <Card class="py-3">
                                <CardHeader class="flex-row items-center justify-between">
                                    <div class="flex flex-col gap-1">
                                        <CardTitle class="text-sm">
                                            <a href=href class="hover:underline">{title}</a>
                                        </CardTitle>
                                        <CardDescription>{status}</CardDescription>
                                    </div>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Sm
                                        class="text-destructive"
                                        on:click=move |_| delete(entry.clone())
                                    >
                                        "Delete"
                                    </Button>
                                </CardHeader>
                            </Card>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub fn BlogListPage() -> impl IntoView {
    view! { <RecordList collection=Collection::Blogs noun="Blog" base_path="/blogs" /> }
}

#[component]
pub fn ComparisonListPage() -> impl IntoView {
    view! { <RecordList collection=Collection::Comparisons noun="Comparison" base_path="/comparisons" /> }
}

#[component]
pub fn ReviewListPage() -> impl IntoView {
    view! { <RecordList collection=Collection::Reviews noun="Review" base_path="/reviews" /> }
}

#[component]
pub fn DealListPage() -> impl IntoView {
    view! { <RecordList collection=Collection::Deals noun="Deal" base_path="/deals" /> }
}

#[component]
pub fn AuthorListPage() -> impl IntoView {
    view! { <RecordList collection=Collection::Authors noun="Author" base_path="/authors" /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_title_falls_through_known_keys() {
        let blog = ListEntry::from_record(&json!({
            "_id": "b1",
            "blogHeading": "Best Notes",
            "blogIsPublished": false
        }))
        .expect("entry");
        assert_eq!(blog.title, "Best Notes");
        assert_eq!(blog.published, Some(false));

        let review =
            ListEntry::from_record(&json!({"id": "r1", "title": " ", "productName": "Notion"}))
                .expect("entry");
        assert_eq!(review.title, "Notion");
        assert_eq!(review.published, None);
    }

    #[test]
    fn test_author_rows_show_the_author_name() {
        let author = ListEntry::from_record(&json!({
            "_id": "a1",
            "authorTitle": "Editor",
            "authorName": "Ann Lee"
        }))
        .expect("entry");
        assert_eq!(author.title, "Ann Lee");
    }

    #[test]
    fn test_entry_without_id_is_skipped() {
        assert_eq!(ListEntry::from_record(&json!({"name": "Orphan"})), None);
    }

    #[test]
    fn test_untitled_record() {
        let entry = ListEntry::from_record(&json!({"_id": "x"})).expect("entry");
        assert_eq!(entry.title, "(untitled)");
    }
}
