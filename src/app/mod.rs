use crate::components::ui::ToastViewport;
use crate::pages::{
    AuthorEditorPage, AuthorListPage, BlogEditorPage, BlogListPage, ComparisonEditorPage,
    ComparisonListPage, ComparisonSettingsPage, DealEditorPage, DealListPage, LoginPage,
    RequireAuth, ReviewEditorPage, ReviewListPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Editor routes share one component for "new" and ":id"; the page reads the param.
    view! {
        <Router>
            <ToastViewport />
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("") view=|| view! { <Redirect path="/blogs" /> } />

                <Route path=path!("blogs") view=|| view! { <RequireAuth><BlogListPage /></RequireAuth> } />
                <Route path=path!("blogs/new") view=|| view! { <RequireAuth><BlogEditorPage /></RequireAuth> } />
                <Route path=path!("blogs/:id") view=|| view! { <RequireAuth><BlogEditorPage /></RequireAuth> } />

                <Route path=path!("comparisons") view=|| view! { <RequireAuth><ComparisonListPage /></RequireAuth> } />
                <Route path=path!("comparisons/new") view=|| view! { <RequireAuth><ComparisonEditorPage /></RequireAuth> } />
                <Route path=path!("comparisons/:id") view=|| view! { <RequireAuth><ComparisonEditorPage /></RequireAuth> } />

                <Route path=path!("reviews") view=|| view! { <RequireAuth><ReviewListPage /></RequireAuth> } />
                <Route path=path!("reviews/new") view=|| view! { <RequireAuth><ReviewEditorPage /></RequireAuth> } />
                <Route path=path!("reviews/:id") view=|| view! { <RequireAuth><ReviewEditorPage /></RequireAuth> } />

                <Route path=path!("deals") view=|| view! { <RequireAuth><DealListPage /></RequireAuth> } />
                <Route path=path!("deals/new") view=|| view! { <RequireAuth><DealEditorPage /></RequireAuth> } />
                <Route path=path!("deals/:id") view=|| view! { <RequireAuth><DealEditorPage /></RequireAuth> } />

                <Route path=path!("authors") view=|| view! { <RequireAuth><AuthorListPage /></RequireAuth> } />
                <Route path=path!("authors/new") view=|| view! { <RequireAuth><AuthorEditorPage /></RequireAuth> } />
                <Route path=path!("authors/:id") view=|| view! { <RequireAuth><AuthorEditorPage /></RequireAuth> } />

                <Route path=path!("settings/comparisons") view=|| view! { <RequireAuth><ComparisonSettingsPage /></RequireAuth> } />
            </Routes>
        </Router>
    }
}
