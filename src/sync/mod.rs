use crate::util::stable_json;
use serde::Serialize;
use std::collections::VecDeque;

/// Notifications kept while waiting for the parent to echo them back.
const MAX_IN_FLIGHT: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SyncState {
    Uninitialized,
    Synced { baseline: String },
    LocallyDiverged { baseline: String },
}

impl SyncState {
    fn baseline(&self) -> Option<&str> {
        match self {
            SyncState::Uninitialized => None,
            SyncState::Synced { baseline } | SyncState::LocallyDiverged { baseline } => {
                Some(baseline)
            }
        }
    }
}

/// What a sub-editor must do with its local copy after the parent's value was observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncDecision {
    /// Nothing changed upstream.
    Ignore,
    /// First value from the parent: seed the local copy.
    Adopt,
    /// The parent caught up with a change this editor reported; keep local state.
    AcceptEcho,
    /// The parent replaced the value (load, reset): overwrite the local copy.
    Reseed,
    /// The parent dropped the value: clear the local copy.
    Reset,
}

/// Reconciles a sub-editor's local copy with the parent-supplied value.
///
/// Comparisons are made on canonical JSON so a structurally equal value with a new
/// identity is not mistaken for an upstream change.
#[derive(Clone, Debug)]
pub(crate) struct SyncGuard {
    state: SyncState,
    suppress_notify: bool,
    in_flight: VecDeque<String>,
}

impl Default for SyncGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncGuard {
    pub fn new() -> Self {
        Self {
            state: SyncState::Uninitialized,
            suppress_notify: false,
            in_flight: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_diverged(&self) -> bool {
        matches!(self.state, SyncState::LocallyDiverged { .. })
    }

    fn seed(&mut self, baseline: String) {
        self.state = SyncState::Synced { baseline };
        self.suppress_notify = true;
        self.in_flight.clear();
    }

    fn accept(&mut self, baseline: String, local: &str) {
        // Everything reported up to and including this value has been applied upstream.
        if let Some(pos) = self.in_flight.iter().position(|s| *s == baseline) {
            self.in_flight.drain(..=pos);
        }
        self.state = if baseline == local {
            SyncState::Synced { baseline }
        } else {
            SyncState::LocallyDiverged { baseline }
        };
    }

    pub fn observe_external<T: Serialize>(
        &mut self,
        external: Option<&T>,
        local: &T,
    ) -> SyncDecision {
        let Some(external) = external else {
            if matches!(self.state, SyncState::Uninitialized) {
                return SyncDecision::Ignore;
            }
            self.state = SyncState::Uninitialized;
            self.suppress_notify = false;
            self.in_flight.clear();
            return SyncDecision::Reset;
        };

        let incoming = stable_json(external);
        let Some(baseline) = self.state.baseline() else {
            self.seed(incoming);
            return SyncDecision::Adopt;
        };
        if baseline == incoming {
            return SyncDecision::Ignore;
        }

        let current = stable_json(local);
        if incoming == current || self.in_flight.contains(&incoming) {
            self.accept(incoming, &current);
            return SyncDecision::AcceptEcho;
        }

        self.seed(incoming);
        SyncDecision::Reseed
    }

    /// Apply [`Self::observe_external`] to `local` directly.
    pub fn reconcile<T: Serialize + Clone + Default>(
        &mut self,
        external: Option<&T>,
        local: &mut T,
    ) -> SyncDecision {
        let decision = self.observe_external(external, local);
        match (decision, external) {
            (SyncDecision::Adopt | SyncDecision::Reseed, Some(value)) => *local = value.clone(),
            (SyncDecision::Reset, _) => *local = T::default(),
            _ => {}
        }
        decision
    }

    /// Called after every local edit. Returns whether the parent should be notified.
    pub fn record_local_change<T: Serialize>(&mut self, local: &T) -> bool {
        let Some(baseline) = self.state.baseline().map(str::to_owned) else {
            return false;
        };
        let current = stable_json(local);

        if std::mem::take(&mut self.suppress_notify) && current == baseline {
            return false;
        }

        let parent_has = self.in_flight.back().unwrap_or(&baseline);
        let changed = *parent_has != current;

        self.state = if current == baseline {
            SyncState::Synced { baseline }
        } else {
            SyncState::LocallyDiverged { baseline }
        };

        if changed {
            if self.in_flight.len() == MAX_IN_FLIGHT {
                self.in_flight.pop_front();
            }
            self.in_flight.push_back(current);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::{BlogDraft, ComparisonDraft};
    use crate::models::ToolChip;
    use crate::selection::ToolSelection;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize, Clone, Debug, Default, PartialEq)]
    struct Chips(Vec<String>);

    fn chips(items: &[&str]) -> Chips {
        Chips(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_uninitialized_ignores_none_and_local_edits() {
        let mut guard = SyncGuard::new();
        let mut local = chips(&["x"]);
        assert_eq!(guard.reconcile(None, &mut local), SyncDecision::Ignore);
        assert!(!guard.record_local_change(&local));
        assert_eq!(local, chips(&["x"]));
    }

    #[test]
    fn test_adopt_suppresses_mount_echo() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        let parent = chips(&["Notion"]);
        assert_eq!(guard.reconcile(Some(&parent), &mut local), SyncDecision::Adopt);
        assert_eq!(local, parent);
        assert!(!guard.record_local_change(&local));
        assert_eq!(guard.reconcile(Some(&parent), &mut local), SyncDecision::Ignore);
    }

    #[test]
    fn test_empty_value_is_not_none() {
        let mut guard = SyncGuard::new();
        let mut local = chips(&["stale"]);
        assert_eq!(guard.reconcile(Some(&Chips::default()), &mut local), SyncDecision::Adopt);
        assert!(local.0.is_empty());
        assert_eq!(guard.reconcile(None, &mut local), SyncDecision::Reset);
        assert_eq!(guard.state(), &SyncState::Uninitialized);
    }

    #[test]
    fn test_local_edit_then_echo_is_accepted() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&["A"])), &mut local);
        guard.record_local_change(&local);

        local.0.push("B".to_string());
        assert!(guard.record_local_change(&local));
        assert!(guard.is_diverged());

        let echoed = local.clone();
        assert_eq!(guard.reconcile(Some(&echoed), &mut local), SyncDecision::AcceptEcho);
        assert_eq!(local, chips(&["A", "B"]));
        assert!(!guard.is_diverged());
    }

    #[test]
    fn test_prop_trailing_by_one_tick_does_not_clobber() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&[])), &mut local);
        guard.record_local_change(&local);

        local = chips(&["A"]);
        assert!(guard.record_local_change(&local));
        local = chips(&["A", "B"]);
        assert!(guard.record_local_change(&local));

        // The parent re-renders with the first notification while the second is pending.
        assert_eq!(
            guard.reconcile(Some(&chips(&["A"])), &mut local),
            SyncDecision::AcceptEcho
        );
        assert_eq!(local, chips(&["A", "B"]));
        assert!(!guard.record_local_change(&local));

        assert_eq!(
            guard.reconcile(Some(&chips(&["A", "B"])), &mut local),
            SyncDecision::AcceptEcho
        );
        assert!(!guard.record_local_change(&local));
        assert_eq!(guard.reconcile(Some(&chips(&["A", "B"])), &mut local), SyncDecision::Ignore);
    }

    #[test]
    fn test_reverting_edit_still_notifies_parent() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&["A"])), &mut local);
        guard.record_local_change(&local);

        local = chips(&["A", "B"]);
        assert!(guard.record_local_change(&local));
        local = chips(&["A"]);
        assert!(guard.record_local_change(&local));
        assert!(!guard.is_diverged());
    }

    #[test]
    fn test_external_reset_reseeds_and_suppresses() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&["A"])), &mut local);
        guard.record_local_change(&local);
        local = chips(&["A", "mine"]);
        guard.record_local_change(&local);

        let loaded = chips(&["Server"]);
        assert_eq!(guard.reconcile(Some(&loaded), &mut local), SyncDecision::Reseed);
        assert_eq!(local, loaded);
        assert!(!guard.record_local_change(&local));
    }

    #[test]
    fn test_first_edit_after_seed_is_not_swallowed() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&["A"])), &mut local);
        // No mount echo happened; the user's edit arrives first.
        local = chips(&["A", "B"]);
        assert!(guard.record_local_change(&local));
    }

    #[test]
    fn test_stale_parent_value_is_ignored() {
        let mut guard = SyncGuard::new();
        let mut local = Chips::default();
        guard.reconcile(Some(&chips(&["A", "B"])), &mut local);
        guard.record_local_change(&local);

        local = chips(&["A", "B", "C"]);
        assert!(guard.record_local_change(&local));
        assert_eq!(
            guard.reconcile(Some(&chips(&["A", "B"])), &mut local),
            SyncDecision::Ignore
        );
        assert_eq!(local, chips(&["A", "B", "C"]));
        assert!(guard.is_diverged());
    }

    fn edit(local: &mut Vec<ToolChip>, op: impl FnOnce(&mut ToolSelection)) {
        let mut selection = ToolSelection::new(std::mem::take(local));
        op(&mut selection);
        *local = selection.into_tools();
    }

    /// Drives the tools editor against a parent document that stores mentions.
    fn assert_tools_echo_round_trip<D>(
        mut parent: D,
        read: fn(&D) -> Vec<ToolChip>,
        write: fn(&mut D, &[ToolChip]),
    ) {
        let mut guard = SyncGuard::new();
        let mut local = Vec::new();
        assert_eq!(guard.reconcile(Some(&read(&parent)), &mut local), SyncDecision::Adopt);
        assert!(!guard.record_local_change(&local));

        let mut step = |local: &mut Vec<ToolChip>, op: &dyn Fn(&mut ToolSelection)| {
            edit(local, |s| op(s));
            assert!(guard.record_local_change(local));
            let before = local.clone();
            write(&mut parent, local);
            assert_eq!(
                guard.reconcile(Some(&read(&parent)), local),
                SyncDecision::AcceptEcho
            );
            assert_eq!(*local, before);
        };

        step(&mut local, &|s| {
            s.add_named("Notion");
        });
        assert_eq!(local[0].logo, None);
        assert_eq!(local[0].category, None);

        step(&mut local, &|s| s.update_category("Notion", "Docs"));
        assert_eq!(local[0].category.as_deref(), Some("Docs"));

        step(&mut local, &|s| s.update_category("Notion", ""));
        assert_eq!(local[0].category, None);

        step(&mut local, &|s| s.update_logo("Notion", "n.png"));
        step(&mut local, &|s| {
            s.remove("Notion");
        });
        assert!(local.is_empty());
    }

    #[test]
    fn test_comparison_tools_echo_is_accepted() {
        assert_tools_echo_round_trip(
            ComparisonDraft::default(),
            ComparisonDraft::tool_chips,
            ComparisonDraft::set_tools,
        );
    }

    #[test]
    fn test_blog_tools_echo_is_accepted() {
        assert_tools_echo_round_trip(
            BlogDraft::default(),
            BlogDraft::tool_chips,
            BlogDraft::set_tools,
        );
    }

    #[test]
    fn test_map_key_order_is_irrelevant() {
        let mut guard = SyncGuard::new();
        let a: serde_json::Value = serde_json::json!({"x": 1, "y": 2});
        let b: serde_json::Value = serde_json::json!({"y": 2, "x": 1});
        let mut local = serde_json::Value::Null;
        guard.reconcile(Some(&a), &mut local);
        assert_eq!(guard.reconcile(Some(&b), &mut local), SyncDecision::Ignore);

        let mut map_guard = SyncGuard::new();
        let mut m: BTreeMap<String, bool> = BTreeMap::new();
        m.insert("0".into(), true);
        let mut local_map = BTreeMap::new();
        assert_eq!(map_guard.reconcile(Some(&m), &mut local_map), SyncDecision::Adopt);
        assert_eq!(local_map, m);
    }
}
