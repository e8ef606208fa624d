//! Login form state machine.
//!
//! Drives the auth collaborator and owns the inline error display. On
//! success the session capability is initialized; on failure the
//! collaborator's message is kept for the form to show.

use quill_common::{AuthApi, Session, TransportError};

#[derive(Debug, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    error: Option<String>,
    in_flight: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Attempt to log in. Returns whether the session was initialized.
    pub async fn submit<A: AuthApi>(&mut self, auth: &A, session: &mut Session) -> bool {
        self.error = None;
        self.in_flight = true;
        let result = auth.login(&self.email, &self.password).await;
        self.in_flight = false;
        match result {
            Ok(credentials) => {
                session.init(credentials);
                self.password.clear();
                true
            }
            Err(err) => {
                tracing::debug!(%err, "login rejected");
                self.error = Some(err.to_string());
                false
            }
        }
    }
}

/// Log out: the session is cleared first so local state never outlives
/// the credentials, then the collaborator is notified.
pub async fn logout<A: AuthApi>(auth: &A, session: &mut Session) -> Result<(), TransportError> {
    session.clear();
    auth.logout().await
}
