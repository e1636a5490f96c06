use crate::state::ToastKind;
use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm shadow-sm"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;

/// Border and text colors for an alert of the given tone.
pub fn alert_tone(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "border-emerald-300 bg-emerald-50 text-emerald-900",
        ToastKind::Error => "border-destructive/40 bg-red-50 text-destructive",
        ToastKind::Info => "border-sky-300 bg-sky-50 text-sky-900",
        ToastKind::Warning => "border-amber-300 bg-amber-50 text-amber-900",
    }
}
