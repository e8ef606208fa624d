//! Authenticated session lifecycle.
//!
//! Owned state with an explicit `init`/`clear` lifecycle. The session is
//! passed into the composition form and feed as a capability; nothing in
//! the core reads auth state from ambient globals.

use smol_str::SmolStr;

use crate::models::Author;

/// Identity and credentials returned by a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub user: Author,
    pub token: SmolStr,
}

/// Live session state for the current author.
#[derive(Clone, Debug, Default)]
pub struct Session {
    auth: Option<AuthSession>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install credentials after a successful login.
    pub fn init(&mut self, auth: AuthSession) {
        tracing::debug!(user = %auth.user.name, "session initialized");
        self.auth = Some(auth);
    }

    /// Drop credentials on logout or auth failure.
    pub fn clear(&mut self) {
        if self.auth.take().is_some() {
            tracing::debug!("session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn current_user(&self) -> Option<&Author> {
        self.auth.as_ref().map(|a| &a.user)
    }

    pub fn token(&self) -> Option<&SmolStr> {
        self.auth.as_ref().map(|a| &a.token)
    }
}
