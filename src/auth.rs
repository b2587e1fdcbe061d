//! Login session kept in a slot.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::storage::SlotStorage;

/// Authentication collaborator used by the navigation bar and protected panels.
pub trait AuthProvider {
    fn is_authenticated(&self) -> bool;

    /// Identity of the logged in user, if any.
    fn user_email(&self) -> Option<String>;

    fn logout(&self);
}

/// Persisted session content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user_email: String,
}

/// Session stored in a named slot, shared by every running instance.
#[derive(Debug, Clone)]
pub struct SlotSession<S> {
    slots: S,
    key: String,
}

impl<S: SlotStorage> SlotSession<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self { slots, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark `email` as logged in. No credential check is performed.
    pub fn login(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Enter a valid email address"));
        }
        let session = Session {
            is_authenticated: true,
            user_email: email.to_string(),
        };
        self.slots.write(&self.key, &serde_json::to_string(&session)?)?;
        info!("Logged in as {}", email);
        Ok(())
    }

    /// Current session; unreadable content counts as logged out.
    pub fn session(&self) -> Session {
        match self.slots.read(&self.key) {
            Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable session slot '{}': {}", self.key, e);
                Session::default()
            }),
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("Failed to read session slot '{}': {}", self.key, e);
                Session::default()
            }
        }
    }
}

impl<S: SlotStorage> AuthProvider for SlotSession<S> {
    fn is_authenticated(&self) -> bool {
        self.session().is_authenticated
    }

    fn user_email(&self) -> Option<String> {
        let session = self.session();
        (session.is_authenticated && !session.user_email.is_empty()).then_some(session.user_email)
    }

    fn logout(&self) {
        if let Err(e) = self.slots.remove(&self.key) {
            warn!("Failed to clear session slot '{}': {}", self.key, e);
        }
        info!("Logged out");
    }
}
