mod author;
mod blog;
mod comparison;
mod deal;
mod list;
mod login;
mod review;
mod settings;

pub use author::AuthorEditorPage;
pub use blog::BlogEditorPage;
pub use comparison::ComparisonEditorPage;
pub use deal::DealEditorPage;
pub use list::{AuthorListPage, BlogListPage, ComparisonListPage, DealListPage, ReviewListPage};
pub use login::LoginPage;
pub use review::ReviewEditorPage;
pub use settings::ComparisonSettingsPage;

use crate::api::Collection;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label, Spinner, TextArea};
use crate::state::{AppContext, ToastKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use serde_json::{json, Value};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
            <AdminLayout>
                {move || children.with_value(|c| c())}
            </AdminLayout>
        </Show>
    }
}

#[component]
fn AdminLayout(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let navigate = use_navigate();
    let user_email = move || {
        app_state
            .current_user
            .get()
            .map(|u| u.email)
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        app_state.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="border-b">
                <nav class="mx-auto flex max-w-5xl items-center gap-4 px-4 py-3 text-sm">
                    <a href="/blogs" class="font-semibold">"PerkPilot Admin"</a>
                    <a href="/blogs" class="text-muted-foreground hover:text-foreground">"Blogs"</a>
                    <a href="/comparisons" class="text-muted-foreground hover:text-foreground">"Comparisons"</a>
                    <a href="/reviews" class="text-muted-foreground hover:text-foreground">"Reviews"</a>
                    <a href="/deals" class="text-muted-foreground hover:text-foreground">"Deals"</a>
                    <a href="/authors" class="text-muted-foreground hover:text-foreground">"Authors"</a>
                    <a href="/settings/comparisons" class="text-muted-foreground hover:text-foreground">"Page Settings"</a>
                    <span class="ml-auto text-xs text-muted-foreground">{user_email}</span>
                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_logout>
                        "Log out"
                    </Button>
                </nav>
            </header>
            <main class="mx-auto max-w-5xl px-4 py-6">{children()}</main>
        </div>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct EditorRouteParams {
    pub id: Option<String>,
}

/// The document an editor page works on, plus whether it is ready to be edited.
pub(crate) struct EditorDocument<D: Send + Sync + 'static> {
    pub doc: RwSignal<D>,
    pub loaded: RwSignal<bool>,
    pub record_id: Memo<Option<String>>,
}

impl<D: Send + Sync + 'static> Clone for EditorDocument<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Send + Sync + 'static> Copy for EditorDocument<D> {}

impl<D: Clone + Send + Sync + 'static> EditorDocument<D> {
    /// A slice of the document for a sub-editor; `None` until the record is loaded.
    pub fn slice<T>(&self, get: fn(&D) -> T) -> Signal<Option<T>>
    where
        T: Send + Sync + 'static,
    {
        let (doc, loaded) = (self.doc, self.loaded);
        Signal::derive(move || loaded.get().then(|| doc.with(get)))
    }

    pub fn setter<T>(&self, set: fn(&mut D, T)) -> Callback<T>
    where
        T: 'static,
    {
        let doc = self.doc;
        Callback::new(move |v: T| doc.update(|d| set(d, v)))
    }

    pub fn is_edit(&self) -> bool {
        self.record_id.get().is_some()
    }
}

/// Hydrate the record named by the `:id` route param, or start from an empty draft.
pub(crate) fn use_editor_document<D>(
    collection: Collection,
    noun: &'static str,
    hydrate: fn(Value) -> Result<D, String>,
) -> EditorDocument<D>
where
    D: Default + Clone + Send + Sync + 'static,
{
    let app_state = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<EditorRouteParams>();
    let record_id = Memo::new(move |_| {
        params
            .get()
            .ok()
            .and_then(|p| p.id)
            .filter(|id| !id.trim().is_empty())
    });
    let doc = RwSignal::new(D::default());
    let loaded = RwSignal::new(false);

    Effect::new(move |_| {
        let Some(id) = record_id.get() else {
            doc.set(D::default());
            loaded.set(true);
            return;
        };

        loaded.set(false);
        let client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match client.fetch_one(collection, &id).await {
                Ok(mut raw) => {
                    if let Some(map) = raw.as_object_mut() {
                        if !map.contains_key("_id") && !map.contains_key("id") {
                            map.insert("_id".into(), json!(id));
                        }
                    }
                    match hydrate(raw) {
                        Ok(draft) => {
                            doc.try_set(draft);
                            loaded.try_set(true);
                        }
                        Err(e) => {
                            let message =
                                format!("Failed to load {}: {}", noun.to_lowercase(), e);
                            app_state.notify(ToastKind::Error, message);
                        }
                    }
                }
                Err(e) if e.is_unauthorized() => {
                    app_state.sign_out();
                    navigate.try_with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) if e.is_not_found() => {
                    app_state.notify(ToastKind::Error, format!("{} not found", noun));
                }
                Err(e) => app_state.notify(ToastKind::Error, e.to_string()),
            }
        });
    });

    EditorDocument {
        doc,
        loaded,
        record_id,
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] multiline: bool,
    #[prop(into, optional)] placeholder: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5">
            <Label required=required>{label}</Label>
            {if multiline {
                view! { <TextArea value=value on_value=on_value placeholder=placeholder rows=6 /> }.into_any()
            } else {
                view! { <Input value=value on_value=on_value placeholder=placeholder /> }.into_any()
            }}
        </div>
    }
}

/// "Save Draft" / "Publish" buttons. Both are disabled while a save is running.
#[component]
pub fn SaveBar(
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_draft: Callback<()>,
    #[prop(into)] on_publish: Callback<()>,
    #[prop(into)] publish_label: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="sticky bottom-0 flex justify-end gap-2 border-t bg-background py-3">
            <Button
                variant=ButtonVariant::Outline
                attr:disabled=move || busy.get()
                on:click=move |_| on_draft.run(())
            >
                "Save Draft"
            </Button>
            <Button attr:disabled=move || busy.get() on:click=move |_| on_publish.run(())>
                <Show when=move || busy.get()>
                    <Spinner />
                </Show>
                {move || publish_label.get()}
            </Button>
        </div>
    }
}

/// Shown while an existing record is being fetched.
#[component]
pub fn LoadingGate(#[prop(into)] loaded: Signal<bool>, children: ChildrenFn) -> impl IntoView {
    let children = StoredValue::new(children);
    view! {
        <Show
            when=move || loaded.get()
            fallback=|| view! {
                <div class="flex items-center gap-2 py-10 text-sm text-muted-foreground">
                    <Spinner />
                    "Loading..."
                </div>
            }
        >
            {move || children.with_value(|c| c())}
        </Show>
    }
}
