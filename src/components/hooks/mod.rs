mod use_debounced_search;
mod use_submit;
mod use_sync_guard;

pub(crate) use use_debounced_search::use_debounced_search;
pub(crate) use use_submit::{use_submit, SaveNotice};
pub(crate) use use_sync_guard::{use_sync_guard, use_synced, use_synced_cards};

use leptos::prelude::*;

/// Whether the owner that created `marker` is still alive. Async work checks this
/// before touching callbacks handed down by a component that may have unmounted.
pub(crate) fn is_mounted<T: Send + Sync + 'static>(marker: StoredValue<T>) -> bool {
    marker.try_with_value(|_| ()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_outlived_by_its_owner_reports_unmounted() {
        let owner = Owner::new();
        let marker = owner.with(|| StoredValue::new(()));
        assert!(is_mounted(marker));

        owner.cleanup();
        assert!(!is_mounted(marker));
    }
}
