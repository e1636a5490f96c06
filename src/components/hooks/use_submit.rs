use super::is_mounted;
use crate::state::{AppContext, AppState, ToastKind, ToastLink};
use crate::submit::{submit, SaveMode, SubmitLatch, Submittable};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::time::Duration;

const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// What to show after a successful save and where to go next.
#[derive(Clone, Debug)]
pub(crate) struct SaveNotice {
    pub message: String,
    pub links: Vec<ToastLink>,
    pub redirect_to: &'static str,
}

/// Save driver for one editor page: one save at a time, toast on completion,
/// delayed redirect on success, back to login on 401.
#[derive(Clone, Copy)]
pub(crate) struct Submitter {
    pub busy: RwSignal<bool>,
    latch: StoredValue<SubmitLatch>,
    redirect: StoredValue<Option<TimeoutHandle>>,
    app_state: AppState,
    navigate: Callback<String>,
}

impl Submitter {
    pub fn save<D>(&self, draft: D, mode: SaveMode, notice: SaveNotice)
    where
        D: Submittable + 'static,
    {
        if !self.latch.try_update_value(SubmitLatch::try_begin).unwrap_or(false) {
            warn!("save ignored: another save is still running");
            return;
        }
        self.busy.set(true);

        let this = *self;
        let client = self.app_state.api_client.get_untracked();
        spawn_local(async move {
            let outcome = submit(&client, &draft, mode).await;
            this.latch.try_update_value(SubmitLatch::finish);
            this.busy.try_set(false);
            // Navigation belongs to the page; skip it once the page has unmounted.
            let mounted = is_mounted(this.redirect);

            match outcome {
                Ok(_) => {
                    this.app_state
                        .notify_with_links(ToastKind::Success, notice.message, notice.links);
                    if mounted {
                        this.schedule_redirect(notice.redirect_to);
                    }
                }
                Err(e) if e.is_unauthorized() => {
                    this.app_state.sign_out();
                    this.app_state.notify(ToastKind::Error, e.to_string());
                    if mounted {
                        this.navigate.run("/login".to_string());
                    }
                }
                Err(e) => this.app_state.notify(ToastKind::Error, e.to_string()),
            }
        });
    }

    fn schedule_redirect(&self, to: &'static str) {
        let navigate = self.navigate;
        let handle = set_timeout_with_handle(move || navigate.run(to.to_string()), REDIRECT_DELAY);
        if let Ok(handle) = handle {
            self.redirect.try_set_value(Some(handle));
        }
    }
}

pub(crate) fn use_submit() -> Submitter {
    let app_state = expect_context::<AppContext>().0;
    let navigate = use_navigate();
    let submitter = Submitter {
        busy: RwSignal::new(false),
        latch: StoredValue::new(SubmitLatch::default()),
        redirect: StoredValue::new(None),
        app_state,
        navigate: Callback::new(move |path: String| navigate(&path, Default::default())),
    };

    let redirect = submitter.redirect;
    on_cleanup(move || {
        if let Some(handle) = redirect.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    });
    submitter
}
