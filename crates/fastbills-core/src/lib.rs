//! # fastbills-core: Pure Business Logic for FastBills
//!
//! This crate is the **heart** of FastBills. It contains the domain types,
//! the monetary arithmetic, the error taxonomy, and the input validation
//! rules, all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       FastBills Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI / External Collaborators                    │   │
//! │  │   Screens ──► Barcode Scanner ──► Receipt Renderer ──► Backup   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fastbills-engine (the Store)                 │   │
//! │  │    catalog, cart, session, billing, register, reporting         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fastbills-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │StoreError │  │   rules   │  │   │
//! │  │   │   Bill    │  │  TAX_RATE │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Bill, User, CashRegister)
//! - [`money`] - Money type with IEEE double semantics and display rounding
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Storage, network, and file system access are FORBIDDEN here
//! 3. **Unrounded Money**: Monetary values keep full double precision; only
//!    display formatting rounds to two decimals
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fastbills_core::Money` instead of
// `use fastbills_core::money::Money`

pub use error::{StoreError, StoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax rate applied at checkout and on refunds.
///
/// ## Why a constant?
/// The system runs with one fixed 10% rate. Tax-rule configurability is an
/// explicit non-goal; making this per-product or per-tenant would be a
/// behavior change, not a refactor.
pub const TAX_RATE: f64 = 0.10;
