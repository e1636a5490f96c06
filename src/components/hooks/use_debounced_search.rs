use crate::api::{ApiClient, ApiError};
use crate::models::DealSummary;
use crate::search::{SearchCommand, SearchMachine, SearchRequest};
use crate::state::AppContext;
use futures::future::{abortable, AbortHandle};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Debounced deal search bound to one search box.
#[derive(Clone, Copy)]
pub(crate) struct DealSearch {
    pub query: RwSignal<String>,
    pub machine: RwSignal<SearchMachine<DealSummary>>,
    api_client: RwSignal<ApiClient>,
    timer: StoredValue<Option<TimeoutHandle>>,
    request: StoredValue<Option<AbortHandle>>,
}

impl DealSearch {
    fn cancel_pending(&self) {
        if let Some(handle) = self.timer.try_update_value(Option::take).flatten() {
            handle.clear();
        }
        if let Some(handle) = self.request.try_update_value(Option::take).flatten() {
            handle.abort();
        }
    }

    fn fetch(&self, req: SearchRequest) {
        let client = self.api_client.get_untracked();
        let SearchRequest { generation, query } = req;
        let (task, handle) = abortable(async move { client.search_deals(&query).await });
        self.request.set_value(Some(handle));

        let machine = self.machine;
        spawn_local(async move {
            let outcome = task.await.unwrap_or_else(|_| Err(ApiError::aborted()));
            machine.try_update(|m| m.resolve(generation, outcome));
        });
    }

    /// Every keystroke restarts the debounce and drops any request in flight.
    pub fn input(&self, text: String) {
        self.query.set(text.clone());
        let command = self.machine.try_update(|m| m.input(&text));
        self.cancel_pending();

        if let Some(SearchCommand::Schedule { generation, delay }) = command {
            let this = *self;
            let handle = set_timeout_with_handle(
                move || {
                    let pending = this.machine.try_update(|m| m.debounce_elapsed(generation));
                    if let Some(Some(req)) = pending {
                        this.fetch(req);
                    }
                },
                delay,
            );
            if let Ok(handle) = handle {
                self.timer.set_value(Some(handle));
            }
        }
    }

    /// Close the dropdown and reset the box (after a pick).
    pub fn clear(&self) {
        self.cancel_pending();
        self.machine.update(|m| m.clear());
        self.query.set(String::new());
    }

    pub fn results(&self) -> Vec<DealSummary> {
        self.machine.with(|m| m.results().to_vec())
    }

    pub fn shows_results(&self) -> bool {
        self.machine.with(|m| m.shows_results())
    }

    pub fn is_loading(&self) -> bool {
        self.machine.with(|m| m.is_loading())
    }
}

pub(crate) fn use_debounced_search() -> DealSearch {
    let app_state = expect_context::<AppContext>().0;
    let search = DealSearch {
        query: RwSignal::new(String::new()),
        machine: RwSignal::new(SearchMachine::new()),
        api_client: app_state.api_client,
        timer: StoredValue::new(None),
        request: StoredValue::new(None),
    };

    on_cleanup(move || search.cancel_pending());
    search
}
