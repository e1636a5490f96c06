use crate::models::AdminUser;
use crate::util::now_ms;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) const TOKEN_KEY: &str = "admin_auth_token";
pub(crate) const USER_KEY: &str = "admin_user";
pub(crate) const TOKEN_EXP_KEY: &str = "admin_auth_token_exp";

/// Sessions last a week from login.
pub(crate) const SESSION_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = session_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

/// A stored expiry is valid only if it parses and lies in the future.
pub(crate) fn session_is_live(expiry: Option<&str>, now: i64) -> bool {
    expiry
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .is_some_and(|exp| exp > now)
}

/// Token/user/expiry triple kept in `sessionStorage`.
pub(crate) struct SessionStore;

impl SessionStore {
    /// Current token, or `None` after clearing an expired session.
    pub fn token() -> Option<String> {
        let storage = session_storage()?;
        let token = storage.get_item(TOKEN_KEY).ok().flatten()?;
        let expiry = storage.get_item(TOKEN_EXP_KEY).ok().flatten();
        if session_is_live(expiry.as_deref(), now_ms()) {
            Some(token)
        } else {
            Self::clear();
            None
        }
    }

    pub fn user() -> Option<AdminUser> {
        Self::token()?;
        load_json_from_storage(USER_KEY)
    }

    pub fn store(token: &str, user: &AdminUser) {
        let Some(storage) = session_storage() else {
            return;
        };
        let expires_at = now_ms().saturating_add(SESSION_TTL_MS);
        let _ = storage.set_item(TOKEN_KEY, token);
        let _ = storage.set_item(TOKEN_EXP_KEY, &expires_at.to_string());
        save_json_to_storage(USER_KEY, user);
    }

    pub fn clear() {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
            let _ = storage.remove_item(TOKEN_EXP_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let now = 1_700_000_000_000;
        assert!(session_is_live(Some(&(now + 1).to_string()), now));
        assert!(!session_is_live(Some(&now.to_string()), now));
        assert!(!session_is_live(Some("tomorrow"), now));
        assert!(!session_is_live(None, now));
    }

    #[test]
    fn test_ttl_is_seven_days() {
        assert_eq!(SESSION_TTL_MS, 604_800_000);
    }
}
