use crate::api::ApiClient;
use crate::models::AdminUser;
use crate::storage::SessionStore;
use leptos::prelude::*;
use std::time::Duration;

pub(crate) const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ToastLink {
    pub text: String,
    pub url: String,
    /// Opens in a new tab.
    pub external: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub links: Vec<ToastLink>,
}

/// One visible toast at a time; a newer toast replaces the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ToastState {
    next_id: u64,
    current: Option<Toast>,
}

impl ToastState {
    pub fn show(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        links: Vec<ToastLink>,
    ) -> u64 {
        self.next_id += 1;
        self.current = Some(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            links,
        });
        self.next_id
    }

    /// Dismiss toast `id`. A timer armed for an older toast does not close a newer one.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|t| t.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<AdminUser>>,
    pub toast: RwSignal<ToastState>,
}

impl AppState {
    pub fn new() -> Self {
        let api_client = ApiClient::from_session();
        // A user without a live token is a leftover from an expired session.
        let current_user = if api_client.is_authenticated() {
            SessionStore::user()
        } else {
            None
        };

        Self {
            api_client: RwSignal::new(api_client),
            current_user: RwSignal::new(current_user),
            toast: RwSignal::new(ToastState::default()),
        }
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        self.notify_with_links(kind, message, vec![]);
    }

    pub fn notify_with_links(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        links: Vec<ToastLink>,
    ) {
        let message = message.into();
        let mut id = 0;
        self.toast.update(|t| id = t.show(kind, message, links));

        let toast = self.toast;
        set_timeout(
            move || {
                toast.try_update(|t| t.dismiss(id));
            },
            TOAST_DURATION,
        );
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toast.update(|t| {
            t.dismiss(id);
        });
    }

    pub fn sign_in(&self, token: String, user: AdminUser) {
        SessionStore::store(&token, &user);
        self.api_client.update(|c| c.set_token(Some(token)));
        self.current_user.set(Some(user));
    }

    pub fn sign_out(&self) {
        SessionStore::clear();
        self.api_client.update(|c| c.set_token(None));
        self.current_user.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
