//! # Identity & Session
//!
//! Users, the login check, the current-session holder, and the one
//! authorization policy every gated operation consults.
//!
//! ## Authorization Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              authorize(action, required_role)                           │
//! │                                                                         │
//! │  no session ────────────────────────────► Err(NoSession)               │
//! │  session, no role required ─────────────► Ok(&user)                    │
//! │  session, role required, manager ───────► Ok(&user)                    │
//! │  session, Manager required, cashier ────► Err(PermissionDenied)        │
//! │                                                                         │
//! │  One policy function, consulted by every mutating entry point.         │
//! │  No operation re-implements the role check inline.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use tracing::{debug, info};

use fastbills_core::{Role, StoreError, StoreResult, User};

use crate::store::Store;

// =============================================================================
// Credential Verification
// =============================================================================

/// Compares a login attempt against a user's stored credential.
///
/// The inherited data stores passwords as plain text and the login contract
/// is exact string match. That contract lives behind this trait so a salted
/// hashing scheme can replace [`PlaintextCredentials`] without changing the
/// session component at all.
pub trait CredentialVerifier: Send + Sync + fmt::Debug {
    /// Returns true when `candidate` matches the `stored` credential.
    fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Exact plain-text comparison, matching the stored user data as-is.
#[derive(Debug, Default)]
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        candidate == stored
    }
}

// =============================================================================
// Session Operations
// =============================================================================

impl Store {
    /// Attempts a login by display name and password.
    ///
    /// Returns the matched user and installs it as the current session.
    /// `None` means invalid credentials, a normal outcome the caller
    /// presents as such; it is never an error.
    pub fn login(&mut self, name: &str, password: &str) -> Option<User> {
        let matched = self
            .users
            .iter()
            .find(|user| user.name == name && self.credentials.verify(password, &user.password))
            .cloned();

        match matched {
            Some(user) => {
                info!(user = %user.name, role = ?user.role, "login");
                self.current_user = Some(user.clone());
                self.persist_session();
                Some(user)
            }
            None => {
                debug!(user = %name, "login rejected");
                None
            }
        }
    }

    /// Clears the current session unconditionally.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user = %user.name, "logout");
        }
        self.persist_session();
    }

    /// The single authorization policy.
    ///
    /// `required = None` demands only a live session. A manager satisfies
    /// any requirement. `action` names the operation for the error message
    /// ("void bills", "override prices", ...).
    pub(crate) fn authorize(
        &self,
        action: &'static str,
        required: Option<Role>,
    ) -> StoreResult<&User> {
        let user = self.current_user.as_ref().ok_or(StoreError::NoSession)?;
        match required {
            Some(role) if user.role != role && user.role != Role::Manager => {
                Err(StoreError::PermissionDenied { action })
            }
            _ => Ok(user),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
