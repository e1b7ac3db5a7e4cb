//! # The Store Aggregate
//!
//! One explicit struct owns every collection. Nothing here is a global:
//! the embedding application constructs a `Store` and passes it (or a
//! `Mutex<Store>`) to whatever invokes operations.
//!
//! ## Collection Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Store                                        │
//! │                                                                         │
//! │  products   Vec<Product>       catalog, mutated by catalog.rs          │
//! │  cart       Vec<CartItem>      active session staging, cart.rs         │
//! │  bills      Vec<Bill>          most-recent-first, billing.rs           │
//! │  users      Vec<User>          static seed set, session.rs             │
//! │  current_user  Option<User>    the session, session.rs                 │
//! │  register   Option<CashRegister>  at most one open, register.rs        │
//! │                                                                         │
//! │  storage    Arc<dyn StorageGateway>   write-behind snapshots           │
//! │  credentials Box<dyn CredentialVerifier>  login comparison             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Discipline
//! After a collection changes, its whole snapshot is serialized and the
//! save is spawned; the operation returns without awaiting it. A gateway
//! failure, or the absence of an async runtime, degrades to in-memory-only
//! operation with a warning. No mutating operation ever fails because
//! storage did.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use fastbills_core::{Bill, CartItem, CashRegister, Product, User};
use fastbills_storage::{load_or, StorageError, StorageGateway};

use crate::keys;
use crate::seed;
use crate::session::{CredentialVerifier, PlaintextCredentials};

/// The transactional state engine. See the crate docs for the full model.
#[derive(Debug)]
pub struct Store {
    pub(crate) products: Vec<Product>,
    pub(crate) cart: Vec<CartItem>,
    pub(crate) bills: Vec<Bill>,
    pub(crate) users: Vec<User>,
    pub(crate) current_user: Option<User>,
    pub(crate) register: Option<CashRegister>,
    pub(crate) last_closed_register: Option<CashRegister>,
    pub(crate) storage: Arc<dyn StorageGateway>,
    pub(crate) credentials: Box<dyn CredentialVerifier>,
}

impl Store {
    /// Creates a fresh store with the seed catalog and user set, nothing
    /// persisted yet. Use [`Store::load`] to resume a prior session.
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Store {
            products: seed::sample_products(),
            cart: Vec::new(),
            bills: Vec::new(),
            users: seed::sample_users(),
            current_user: None,
            register: None,
            last_closed_register: None,
            storage,
            credentials: Box::new(PlaintextCredentials),
        }
    }

    /// Restores the store from persisted snapshots.
    ///
    /// Collections load in parallel. A missing or unparseable snapshot
    /// falls back to its default; an empty (or absent) product or user
    /// list falls back to the seed data, so a first launch and a wiped
    /// store both come up usable.
    pub async fn load(storage: Arc<dyn StorageGateway>) -> Self {
        let gateway = storage.as_ref();
        let (mut products, bills, cart, mut users, current_user, register) = tokio::join!(
            load_or::<Vec<Product>>(gateway, keys::PRODUCTS, Vec::new()),
            load_or::<Vec<Bill>>(gateway, keys::BILLS, Vec::new()),
            load_or::<Vec<CartItem>>(gateway, keys::CART, Vec::new()),
            load_or::<Vec<User>>(gateway, keys::USERS, Vec::new()),
            load_or::<Option<User>>(gateway, keys::CURRENT_USER, None),
            load_or::<Option<CashRegister>>(gateway, keys::CASH_REGISTER, None),
        );

        let seeded_products = products.is_empty();
        if seeded_products {
            products = seed::sample_products();
        }
        let seeded_users = users.is_empty();
        if seeded_users {
            users = seed::sample_users();
        }

        info!(
            products = products.len(),
            bills = bills.len(),
            cart_lines = cart.len(),
            session = current_user.is_some(),
            register_open = register.is_some(),
            "store restored from persisted snapshots"
        );

        let store = Store {
            products,
            cart,
            bills,
            users,
            current_user,
            register,
            last_closed_register: None,
            storage,
            credentials: Box::new(PlaintextCredentials),
        };

        // First launch (or wiped store): write the seeds through so the
        // persisted collections exist from here on.
        if seeded_products {
            store.persist_products();
        }
        if seeded_users {
            store.persist_users();
        }
        store
    }

    /// Replaces the credential verifier. The default compares plain text;
    /// see [`crate::session`].
    pub fn with_credentials(mut self, credentials: Box<dyn CredentialVerifier>) -> Self {
        self.credentials = credentials;
        self
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Bills in display order: most recent first.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The open register, if any.
    pub fn register(&self) -> Option<&CashRegister> {
        self.register.as_ref()
    }

    /// The most recently closed register, kept readable so its closing
    /// summary can still be rendered after the drawer state is cleared.
    pub fn last_closed_register(&self) -> Option<&CashRegister> {
        self.last_closed_register.as_ref()
    }

    // =========================================================================
    // Write-Behind Persistence
    // =========================================================================

    pub(crate) fn persist_products(&self) {
        self.persist(keys::PRODUCTS, &self.products);
    }

    pub(crate) fn persist_cart(&self) {
        self.persist(keys::CART, &self.cart);
    }

    pub(crate) fn persist_bills(&self) {
        self.persist(keys::BILLS, &self.bills);
    }

    pub(crate) fn persist_users(&self) {
        self.persist(keys::USERS, &self.users);
    }

    /// Logged-out sessions are stored as key absence, not as a null.
    pub(crate) fn persist_session(&self) {
        match &self.current_user {
            Some(user) => self.persist(keys::CURRENT_USER, user),
            None => self.persist_removal(keys::CURRENT_USER),
        }
    }

    /// A closed register is stored as key absence, not as a null.
    pub(crate) fn persist_register(&self) {
        match &self.register {
            Some(register) => self.persist(keys::CASH_REGISTER, register),
            None => self.persist_removal(keys::CASH_REGISTER),
        }
    }

    fn persist<T: Serialize>(&self, key: &'static str, value: &T) {
        let snapshot = match serde_json::to_value(value) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(key, %error, "snapshot serialization failed, not persisted");
                return;
            }
        };
        let storage = Arc::clone(&self.storage);
        spawn_detached(key, async move { storage.save(key, snapshot).await });
    }

    fn persist_removal(&self, key: &'static str) {
        let storage = Arc::clone(&self.storage);
        spawn_detached(key, async move { storage.remove(key).await });
    }
}

/// Fires a save without blocking the mutating operation. Outside an async
/// runtime the save is skipped; the engine keeps operating on memory.
fn spawn_detached<F>(key: &'static str, save: F)
where
    F: Future<Output = Result<(), StorageError>> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(error) = save.await {
                    warn!(key, %error, "persistence failed, state kept in memory only");
                }
            });
        }
        Err(_) => warn!(key, "no async runtime, state kept in memory only"),
    }
}

// =============================================================================
// Shared Test Fixtures
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================
