mod api;
mod app;
mod cards;
mod components;
mod drafts;
mod editors;
mod models;
mod pages;
mod search;
mod selection;
mod shape;
mod state;
mod storage;
mod submit;
mod sync;
mod util;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::AdminUser;
    use crate::storage::{SessionStore, TOKEN_EXP_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn admin() -> AdminUser {
        AdminUser {
            id: "u1".to_string(),
            email: "admin@example.com".to_string(),
            is_admin: true,
        }
    }

    #[wasm_bindgen_test]
    fn test_session_store_roundtrip() {
        SessionStore::clear();
        assert!(SessionStore::token().is_none());

        SessionStore::store("t1", &admin());
        assert_eq!(SessionStore::token().as_deref(), Some("t1"));
        assert_eq!(SessionStore::user().map(|u| u.email), Some("admin@example.com".to_string()));

        SessionStore::clear();
        assert!(SessionStore::token().is_none());
        assert!(SessionStore::user().is_none());
    }

    #[wasm_bindgen_test]
    fn test_expired_session_is_cleared() {
        SessionStore::store("t2", &admin());
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok().flatten())
            .expect("session storage");
        storage.set_item(TOKEN_EXP_KEY, "0").expect("set expiry");

        assert!(SessionStore::token().is_none());
        assert!(SessionStore::user().is_none());
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
