use crate::cards::{Numbered, NumberedCards};
use crate::sync::{SyncDecision, SyncGuard};
use leptos::prelude::*;
use serde::Serialize;

/// Wire a sub-editor's local state to a slice owned by its parent.
///
/// `initial` is the parent's value (`None` until the parent has loaded it); `on_change`
/// receives local edits. `read` projects the local state onto the slice and `write`
/// replaces the local state from it.
pub(crate) fn use_synced<L, T>(
    initial: Signal<Option<T>>,
    on_change: Callback<T>,
    local: RwSignal<L>,
    read: fn(&L) -> T,
    write: fn(&mut L, T),
) where
    L: Send + Sync + 'static,
    T: Serialize + Clone + Default + Send + Sync + 'static,
{
    let guard = StoredValue::new(SyncGuard::new());

    Effect::new(move |_| {
        let external = initial.get();
        let current = local.with_untracked(read);
        let decision = guard
            .try_update_value(|g| g.observe_external(external.as_ref(), &current))
            .unwrap_or(SyncDecision::Ignore);

        match (decision, external) {
            (SyncDecision::Adopt | SyncDecision::Reseed, Some(value)) => {
                local.update(|l| write(l, value));
            }
            (SyncDecision::Reset, _) => local.update(|l| write(l, T::default())),
            _ => {}
        }
    });

    Effect::new(move |_| {
        let current = local.with(read);
        let notify = guard
            .try_update_value(|g| g.record_local_change(&current))
            .unwrap_or(false);
        if notify {
            on_change.run(current);
        }
    });
}

/// Local copy of a plain slice (tools, features, modules).
pub(crate) fn use_sync_guard<T>(initial: Signal<Option<T>>, on_change: Callback<T>) -> RwSignal<T>
where
    T: Serialize + Clone + Default + Send + Sync + 'static,
{
    let local = RwSignal::new(T::default());
    use_synced(initial, on_change, local, T::clone, |l, v| *l = v);
    local
}

/// Local copy of a numbered card list, keyed for rendering.
pub(crate) fn use_synced_cards<T>(
    initial: Signal<Option<Vec<T>>>,
    on_change: Callback<Vec<T>>,
) -> RwSignal<NumberedCards<T>>
where
    T: Numbered + Serialize + Clone + Send + Sync + 'static,
{
    let local = RwSignal::new(NumberedCards::new());
    use_synced(
        initial,
        on_change,
        local,
        NumberedCards::values,
        NumberedCards::reseed,
    );
    local
}
