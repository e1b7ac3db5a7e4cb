//! # fastbills-engine: The Transactional State Engine
//!
//! One explicit [`Store`] aggregate owns every collection and enforces the
//! business rules: stock conservation, role-gated mutation, monetary
//! arithmetic, and idempotent persistence.
//!
//! ## Module Organization
//! ```text
//! fastbills_engine/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── The Store aggregate, load/seed, write-behind
//! ├── catalog.rs      ◄─── Product CRUD, stock mutation, barcode lookup
//! ├── cart.rs         ◄─── Cart lines, price overrides, totals
//! ├── session.rs      ◄─── Login/logout, authorization policy
//! ├── billing.rs      ◄─── Checkout, void, delete, refund
//! ├── register.rs     ◄─── Cash register open/close, reconciliation
//! ├── report.rs       ◄─── Sales/inventory reports, summaries
//! ├── backup.rs       ◄─── Backup export/import
//! ├── seed.rs         ◄─── Sample catalog and users
//! └── keys.rs         ◄─── Persisted collection key names
//! ```
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Single Logical Writer                                │
//! │                                                                         │
//! │  Every mutation takes &mut Store and runs to completion without        │
//! │  suspension. One device, one cashier, one writer: exclusiveness is     │
//! │  the borrow checker in-process, and one Mutex<Store> if the embedding  │
//! │  application is multi-threaded.                                        │
//! │                                                                         │
//! │  Persistence is write-behind:                                          │
//! │                                                                         │
//! │    mutate in memory ──► serialize snapshot ──► tokio::spawn(save)      │
//! │         │                                            │                  │
//! │         ▼                                            ▼                  │
//! │    caller returns                        failure is logged, state      │
//! │    immediately                           stays in memory only          │
//! │                                                                         │
//! │  A crash between a mutation and its save loses that one mutation.      │
//! │  Accepted at this system's scale.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fastbills_engine::{CheckoutOptions, Store};
//! use fastbills_storage::MemoryStorage;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = Store::new(Arc::new(MemoryStorage::new()));
//! store.login("cashier", "cashier123").expect("seeded user");
//!
//! let apples = store.find_by_barcode("8901234567890").expect("seeded").id.clone();
//! store.add_to_cart(&apples, 3)?;
//!
//! let bill = store.generate_bill(CheckoutOptions {
//!     cash_tendered: Some(10.0.into()),
//!     ..Default::default()
//! })?;
//! assert!((bill.final_amount.amount() - 9.867).abs() < 1e-9);
//! assert!(store.cart().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod billing;
pub mod cart;
pub mod catalog;
pub mod keys;
pub mod register;
pub mod report;
pub mod seed;
pub mod session;
pub mod store;

pub use backup::{BackupDocument, BACKUP_VERSION};
pub use billing::CheckoutOptions;
pub use catalog::NewProduct;
pub use register::{register_summary, RegisterSummary};
pub use report::{summarize_sales, SalesSummary};
pub use session::{CredentialVerifier, PlaintextCredentials};
pub use store::Store;

// Re-export the core vocabulary so engine users need one import path.
pub use fastbills_core::{
    Bill, CartItem, CashRegister, Money, PaymentMethod, Product, ReportTimeframe, Role, StoreError,
    StoreResult, User, VoidStatus, TAX_RATE,
};
