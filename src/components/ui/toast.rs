use super::{alert_tone, Alert, AlertDescription};
use crate::state::{AppContext, Toast, ToastLink};
use icons::X;
use leptos::prelude::*;

fn toast_link(link: ToastLink) -> impl IntoView {
    let target = link.external.then_some("_blank");
    let rel = link.external.then_some("noopener noreferrer");
    view! {
        <a class="font-medium underline underline-offset-4" href=link.url target=target rel=rel>
            {link.text}
        </a>
    }
}

/// Renders the current toast in the corner; dismissed by its timer or the close button.
#[component]
pub fn ToastViewport() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let current = move || app_state.toast.with(|t| t.current().cloned());

    view! {
        <div class="pointer-events-none fixed top-4 right-4 z-50 w-full max-w-sm">
            {move || {
                current().map(|toast: Toast| {
                    let id = toast.id;
                    let class = format!("pointer-events-auto pr-10 {}", alert_tone(toast.kind));
                    view! {
                        <Alert class=class attr:role="status">
                            <AlertDescription>{toast.message}</AlertDescription>
                            <div class="mt-1 flex gap-3 text-xs">
                                {toast.links.into_iter().map(toast_link).collect_view()}
                            </div>
                            <button
                                class="absolute top-2 right-2 rounded p-1 opacity-70 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| app_state.dismiss_toast(id)
                            >
                                <X class="size-4" />
                            </button>
                        </Alert>
                    }
                })
            }}
        </div>
    }
}
