use super::{LoadingGate, TextField};
use crate::api::{Collection, ContentApi};
use crate::components::ui::{Button, Label, NativeSelect, SelectOption, Spinner};
use crate::drafts::{ComparisonPageSettings, PageStatus};
use crate::editors::{bind_text, MoreComparisonsEditor};
use crate::models::ComparisonSummary;
use crate::state::{AppContext, ToastKind};
use crate::submit::save_page_settings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

fn status_options() -> Vec<SelectOption> {
    [PageStatus::Live, PageStatus::Maintenance]
        .into_iter()
        .map(|s| SelectOption {
            value: s.as_str().to_string(),
            label: match s {
                PageStatus::Live => "Live",
                PageStatus::Maintenance => "Maintenance",
            }
            .to_string(),
        })
        .collect()
}

/// Landing page copy and featured comparisons. There is exactly one settings document.
#[component]
pub fn ComparisonSettingsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());
    let doc = RwSignal::new(ComparisonPageSettings::default());
    let loaded = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let client = app_state.api_client.get_untracked();
    spawn_local(async move {
        match client.fetch_page_settings(Collection::Comparisons).await {
            Ok(raw) => match ComparisonPageSettings::hydrate(raw) {
                Ok(settings) => {
                    doc.try_set(settings);
                }
                Err(e) => app_state.notify(
                    ToastKind::Error,
                    format!("Failed to load comparison page settings: {}", e),
                ),
            },
            // Nothing saved yet.
            Err(e) if e.is_not_found() => {}
            Err(e) => app_state.notify(ToastKind::Error, e.to_string()),
        }
        loaded.try_set(true);
    });

    let status =
        Signal::derive(move || doc.with(|d| d.comparison_page_status.as_str().to_string()));
    let set_status = Callback::new(move |v: String| {
        doc.update(|d| d.comparison_page_status = PageStatus::parse(&v))
    });
    let (tagline, set_tagline) = bind_text(
        doc,
        |d| d.comparison_page_top_tagline.clone(),
        |d, v| d.comparison_page_top_tagline = v,
    );
    let (heading, set_heading) = bind_text(
        doc,
        |d| d.comparison_page_heading.clone(),
        |d, v| d.comparison_page_heading = v,
    );
    let (subheading, set_subheading) = bind_text(
        doc,
        |d| d.comparison_page_subheading.clone(),
        |d, v| d.comparison_page_subheading = v,
    );
    let (tags, set_tags) = bind_text(doc, |d| d.tags_text(), |d, v| d.set_tags_text(&v));

    let featured = Signal::derive(move || {
        loaded
            .get()
            .then(|| doc.with(|d| d.featured_comparisons.clone()))
    });
    let set_featured = Callback::new(move |items: Vec<ComparisonSummary>| {
        doc.update(|d| d.featured_comparisons = items)
    });
    let no_exclusion = Signal::derive(|| None::<String>);

    let save = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let settings = doc.get_untracked();
        let client = app_state.api_client.get_untracked();
        spawn_local(async move {
            let outcome = save_page_settings(&client, &settings).await;
            busy.try_set(false);
            match outcome {
                Ok(()) => {
                    app_state.notify(ToastKind::Success, "Comparison page settings updated")
                }
                Err(e) if e.is_unauthorized() => {
                    app_state.sign_out();
                    app_state.notify(ToastKind::Error, e.to_string());
                    navigate.try_with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => app_state.notify(ToastKind::Error, e.to_string()),
            }
        });
    };

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">"Comparison Page Settings"</h1>
            <LoadingGate loaded=loaded>
                <div class="flex flex-col gap-4">
                    <div class="flex flex-col gap-1.5">
                        <Label>"Page Status"</Label>
                        <NativeSelect options=Signal::derive(status_options) value=status on_value=set_status />
                    </div>
                    <TextField label="Top Tagline" value=tagline on_value=set_tagline />
                    <TextField label="Heading" value=heading on_value=set_heading />
                    <TextField label="Subheading" multiline=true value=subheading on_value=set_subheading />
                    <TextField label="Tags" placeholder="AI, Productivity" value=tags on_value=set_tags />
                    <MoreComparisonsEditor
                        initial=featured
                        on_change=set_featured
                        exclude_id=no_exclusion
                        label="Featured Comparisons"
                    />
                    <div class="sticky bottom-0 flex justify-end gap-2 border-t bg-background py-3">
                        <Button attr:disabled=move || busy.get() on:click=save>
                            <Show when=move || busy.get()>
                                <Spinner />
                            </Show>
                            "Save Settings"
                        </Button>
                    </div>
                </div>
            </LoadingGate>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_options_use_backend_values() {
        let values: Vec<String> = status_options().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["live", "maintenance"]);
    }
}
