//! Admin session gate.
//!
//! The gate has two states, [`SessionState::LoggedOut`] and
//! [`SessionState::LoggedIn`]. Which one a session starts in is decided by the
//! store: the [`AUTH_KEY`] entry holds the `"authenticated"` sentinel while an
//! operator is logged in. There is no expiry and no token.
//!
//! Credentials are checked by a [`CredentialVerifier`]. The stock verifier,
//! [`FixedCredentials`], compares against one configured username/password
//! pair (by default `admin` / `password`). Tests and alternative identity
//! backends plug in their own implementation.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::store::{AUTH_KEY, Store, StoreError};

/// Value stored under [`AUTH_KEY`] while logged in.
pub const AUTH_SENTINEL: &str = "authenticated";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials. Try admin/password")]
    InvalidCredentials,
    #[error("admin login required (run `login` first)")]
    LoginRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decides whether a username/password pair may open the admin panel.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single known credential pair.
///
/// Only SHA-256 digests are kept, and they are compared in constant time.
#[derive(Clone)]
pub struct FixedCredentials {
    username: [u8; 32],
    password: [u8; 32],
}

impl FixedCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = digest(username)[..].ct_eq(&self.username[..]);
        let pass_ok = digest(password)[..].ct_eq(&self.password[..]);
        (user_ok & pass_ok).into()
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

pub struct SessionGate {
    store: Arc<dyn Store>,
    state: SessionState,
}

impl SessionGate {
    /// Resume whatever session the store remembers.
    pub fn load(store: Arc<dyn Store>) -> Result<Self, StoreError> {
        let state = match store.get(AUTH_KEY)?.as_deref() {
            Some(AUTH_SENTINEL) => SessionState::LoggedIn,
            _ => SessionState::LoggedOut,
        };
        Ok(Self { store, state })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    /// Check the pair and, on success, remember the session in the store.
    ///
    /// A failed attempt leaves the state untouched.
    pub fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if !verifier.verify(username, password) {
            tracing::warn!(username, "rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }
        self.store.set(AUTH_KEY, AUTH_SENTINEL)?;
        self.state = SessionState::LoggedIn;
        tracing::info!(username, "admin logged in");
        Ok(())
    }

    /// Forget the session.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.store.remove(AUTH_KEY)?;
        self.state = SessionState::LoggedOut;
        tracing::info!("admin logged out");
        Ok(())
    }

    pub fn require_login(&self) -> Result<(), AuthError> {
        match self.state {
            SessionState::LoggedIn => Ok(()),
            SessionState::LoggedOut => Err(AuthError::LoginRequired),
        }
    }
}
