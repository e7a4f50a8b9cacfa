//! Browser session adapter: localStorage-backed accounts with a cookie mirror.
//!
//! The real product authenticates against a third-party identity backend; this
//! adapter is the browser-local stand-in behind the same [`AuthService`]
//! contract. The session credential is mirrored into a cookie so the route
//! guard can gate `/` vs `/login` exactly the way the backend-issued cookie
//! would.

use platform_host::{
    AuthError, AuthFuture, AuthService, AuthUser, SESSION_COOKIE_NAME,
};
use serde::{Deserialize, Serialize};

use crate::storage::local_prefs::WebPrefsStore;

const ACCOUNTS_KEY: &str = "studydesk.auth.accounts.v1";
const SESSION_KEY: &str = "studydesk.auth.session.v1";
const SESSION_COOKIE_MAX_AGE_SECS: u32 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AccountTable {
    accounts: Vec<AccountRecord>,
    next_uid: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    uid: String,
    email: String,
    password: String,
}

/// Returns whether the session cookie is currently present.
pub fn session_cookie_present() -> bool {
    read_cookies()
        .map(|cookies| cookie_list_contains_session(&cookies))
        .unwrap_or(false)
}

fn cookie_list_contains_session(cookies: &str) -> bool {
    cookies
        .split(';')
        .any(|pair| pair.trim_start().starts_with(&format!("{SESSION_COOKIE_NAME}=")))
}

/// Writes the session cookie for the given uid.
pub fn set_session_cookie(uid: &str) {
    write_cookie(&format!(
        "{SESSION_COOKIE_NAME}={uid}; path=/; max-age={SESSION_COOKIE_MAX_AGE_SECS}"
    ));
}

/// Removes the session cookie.
pub fn clear_session_cookie() {
    write_cookie(&format!("{SESSION_COOKIE_NAME}=; path=/; max-age=0"));
}

fn read_cookies() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let document = web_sys::window()?.document()?;
        let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        html_document.cookie().ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

fn write_cookie(cookie: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let Some(html_document) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        else {
            return;
        };
        if let Err(err) = html_document.set_cookie(cookie) {
            web_sys::console::warn_1(&format!("session cookie write failed: {err:?}").into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = cookie;
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser auth adapter persisting accounts and the active session locally.
pub struct WebAuthService;

impl WebAuthService {
    fn load_accounts() -> AccountTable {
        WebPrefsStore
            .load_json(ACCOUNTS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save_accounts(table: &AccountTable) -> Result<(), AuthError> {
        let raw = serde_json::to_string(table).map_err(|_| AuthError::Backend)?;
        WebPrefsStore.save_json(ACCOUNTS_KEY, &raw).map_err(|err| {
            log_cause("account table write", &err);
            AuthError::Backend
        })
    }

    fn establish_session(user: &AuthUser) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user).map_err(|_| AuthError::Backend)?;
        WebPrefsStore.save_json(SESSION_KEY, &raw).map_err(|err| {
            log_cause("session write", &err);
            AuthError::Backend
        })?;
        set_session_cookie(&user.uid);
        Ok(())
    }
}

fn log_cause(operation: &str, cause: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("auth {operation} failed: {cause}").into());

    #[cfg(not(target_arch = "wasm32"))]
    let _ = (operation, cause);
}

impl AuthService for WebAuthService {
    fn current_user(&self) -> AuthFuture<'_, Option<AuthUser>> {
        Box::pin(async {
            WebPrefsStore
                .load_json(SESSION_KEY)
                .and_then(|raw| serde_json::from_str(&raw).ok())
        })
    }

    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let table = Self::load_accounts();
            let account = table
                .accounts
                .iter()
                .find(|account| account.email == email && account.password == password)
                .ok_or(AuthError::InvalidCredentials)?;
            let user = AuthUser {
                uid: account.uid.clone(),
                email: account.email.clone(),
            };
            Self::establish_session(&user)?;
            Ok(user)
        })
    }

    fn sign_in_with_popup(&self) -> AuthFuture<'_, Result<AuthUser, AuthError>> {
        // No provider popup exists for the local stand-in.
        Box::pin(async { Err(AuthError::Backend) })
    }

    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let mut table = Self::load_accounts();
            if table.accounts.iter().any(|account| account.email == email) {
                return Err(AuthError::EmailTaken);
            }
            table.next_uid += 1;
            let record = AccountRecord {
                uid: format!("local-{}", table.next_uid),
                email: email.to_string(),
                password: password.to_string(),
            };
            let user = AuthUser {
                uid: record.uid.clone(),
                email: record.email.clone(),
            };
            table.accounts.push(record);
            Self::save_accounts(&table)?;
            Self::establish_session(&user)?;
            Ok(user)
        })
    }

    fn sign_out(&self) -> AuthFuture<'_, Result<(), AuthError>> {
        Box::pin(async {
            if let Err(err) = WebPrefsStore.delete_json(SESSION_KEY) {
                log_cause("session delete", &err);
            }
            clear_session_cookie();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_detected_among_other_cookies() {
        assert!(cookie_list_contains_session("auth=local-9"));
        assert!(cookie_list_contains_session("theme=dark; auth=local-1"));
        assert!(!cookie_list_contains_session("theme=dark; author=me"));
        assert!(!cookie_list_contains_session(""));
    }
}
