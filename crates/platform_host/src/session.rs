//! Identity/session boundary contracts.
//!
//! The desktop shell only ever sees an opaque user (id + email) and a loading
//! flag. Authentication outcomes carry a single human-readable failure message;
//! the original cause is logged at the adapter, never surfaced to the UI.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie holding the session credential, read by the route guard.
pub const SESSION_COOKIE_NAME: &str = "auth";

/// Object-safe boxed future used by [`AuthService`] async methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Opaque authenticated user identity.
pub struct AuthUser {
    /// Backend-assigned opaque identifier.
    pub uid: String,
    /// Account email address.
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Current session state as observed by the identity gate.
pub enum AuthStatus {
    /// Session resolution still in flight; the desktop stays gated.
    #[default]
    Loading,
    /// No valid session.
    SignedOut,
    /// Valid session for the given user.
    SignedIn(AuthUser),
}

impl AuthStatus {
    /// Returns the signed-in user, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Authentication boundary failures.
///
/// Every variant renders to a user-presentable message; callers surface the
/// message verbatim and log the original cause separately.
pub enum AuthError {
    /// Credentials were rejected by the backend.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The email is already registered.
    #[error("an account with this email already exists")]
    EmailTaken,
    /// Any other backend failure, already reduced to a generic message.
    #[error("something went wrong, please try again")]
    Backend,
}

/// Host service for the third-party authentication boundary.
pub trait AuthService {
    /// Resolves the current session, if any.
    fn current_user(&self) -> AuthFuture<'_, Option<AuthUser>>;

    /// Signs in with email/password.
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>>;

    /// Signs in through the provider's OAuth popup flow.
    fn sign_in_with_popup(&self) -> AuthFuture<'_, Result<AuthUser, AuthError>>;

    /// Creates an account and signs it in.
    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>>;

    /// Ends the current session.
    fn sign_out(&self) -> AuthFuture<'_, Result<(), AuthError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Auth service that reports no session and rejects all sign-ins.
pub struct NoopAuthService;

impl AuthService for NoopAuthService {
    fn current_user(&self) -> AuthFuture<'_, Option<AuthUser>> {
        Box::pin(async { None })
    }

    fn sign_in<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async { Err(AuthError::Backend) })
    }

    fn sign_in_with_popup(&self) -> AuthFuture<'_, Result<AuthUser, AuthError>> {
        Box::pin(async { Err(AuthError::Backend) })
    }

    fn sign_up<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async { Err(AuthError::Backend) })
    }

    fn sign_out(&self) -> AuthFuture<'_, Result<(), AuthError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory auth service for tests and off-wasm development.
pub struct MemoryAuthService {
    inner: Rc<RefCell<MemoryAuthState>>,
}

#[derive(Debug, Default)]
struct MemoryAuthState {
    accounts: HashMap<String, String>,
    signed_in: Option<AuthUser>,
    next_uid: u64,
}

impl MemoryAuthService {
    /// Pre-registers an account without signing it in.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.inner
            .borrow_mut()
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    fn mint_user(state: &mut MemoryAuthState, email: &str) -> AuthUser {
        state.next_uid += 1;
        let user = AuthUser {
            uid: format!("user-{}", state.next_uid),
            email: email.to_string(),
        };
        state.signed_in = Some(user.clone());
        user
    }
}

impl AuthService for MemoryAuthService {
    fn current_user(&self) -> AuthFuture<'_, Option<AuthUser>> {
        Box::pin(async move { self.inner.borrow().signed_in.clone() })
    }

    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            match state.accounts.get(email) {
                Some(stored) if stored == password => Ok(Self::mint_user(&mut state, email)),
                _ => Err(AuthError::InvalidCredentials),
            }
        })
    }

    fn sign_in_with_popup(&self) -> AuthFuture<'_, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            Ok(Self::mint_user(&mut state, "popup@example.com"))
        })
    }

    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if state.accounts.contains_key(email) {
                return Err(AuthError::EmailTaken);
            }
            state
                .accounts
                .insert(email.to_string(), password.to_string());
            Ok(Self::mint_user(&mut state, email))
        })
    }

    fn sign_out(&self) -> AuthFuture<'_, Result<(), AuthError>> {
        Box::pin(async move {
            self.inner.borrow_mut().signed_in = None;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sign_up_then_sign_out_round_trip() {
        let auth = MemoryAuthService::default();
        let user = futures::executor::block_on(auth.sign_up("me@example.com", "hunter2"))
            .expect("sign up");
        assert_eq!(user.email, "me@example.com");
        assert_eq!(
            futures::executor::block_on(auth.current_user()),
            Some(user)
        );

        futures::executor::block_on(auth.sign_out()).expect("sign out");
        assert_eq!(futures::executor::block_on(auth.current_user()), None);
    }

    #[test]
    fn sign_in_rejects_wrong_password_with_generic_message() {
        let auth = MemoryAuthService::default().with_account("me@example.com", "hunter2");
        let err = futures::executor::block_on(auth.sign_in("me@example.com", "wrong"))
            .expect_err("should reject");
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "invalid email or password");
    }

    #[test]
    fn duplicate_sign_up_is_rejected() {
        let auth = MemoryAuthService::default().with_account("me@example.com", "hunter2");
        let err = futures::executor::block_on(auth.sign_up("me@example.com", "other"))
            .expect_err("should reject");
        assert_eq!(err, AuthError::EmailTaken);
    }
}
