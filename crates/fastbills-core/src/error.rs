//! # Error Types
//!
//! Domain error taxonomy for FastBills.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fastbills-core errors (this file)                                     │
//! │  ├── StoreError       - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fastbills-storage errors (separate crate)                             │
//! │  └── StorageError     - Persistence gateway failures                   │
//! │                                                                         │
//! │  StorageError NEVER crosses into StoreError: persistence failures      │
//! │  are swallowed at the gateway boundary and the engine keeps operating  │
//! │  on in-memory state (availability over durability).                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, ids)
//! 3. Errors are enum variants, never strings
//! 4. All failures are synchronous and local; nothing is retried here

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Store Error
// =============================================================================

/// Business rule violations raised by the state engine.
///
/// Every mutating operation either completes or fails synchronously with
/// one of these; the caller (UI) presents it and owns any resubmission.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation requires a logged-in user.
    #[error("no user is logged in")]
    NoSession,

    /// The session's role is not allowed to perform the operation.
    #[error("only managers can {action}")]
    PermissionDenied { action: &'static str },

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart mutation asked for more units than the catalog currently has.
    ///
    /// ## When This Occurs
    /// - Adding a line with quantity above current stock
    /// - Merging into an existing line past current stock
    /// - Raising a line's quantity past the line's product snapshot stock
    #[error("only {available} units of {name} available in stock, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cash tendered does not cover the bill's final amount.
    #[error("insufficient cash: {tendered} tendered for a {required} bill")]
    InsufficientCash { required: Money, tendered: Money },

    /// A stock level was set to a negative quantity.
    #[error("stock quantity cannot be negative (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    /// The product appears on existing bills and cannot be deleted.
    #[error("product {id} has been sold and cannot be deleted")]
    ProductInUse { id: String },

    /// No product with the given id exists in the catalog.
    #[error("product not found: {id}")]
    ProductNotFound { id: String },

    /// No bill with the given id exists.
    #[error("bill not found: {id}")]
    BillNotFound { id: String },

    /// Refunds against voided bills are rejected.
    #[error("bill {id} is voided and cannot be refunded")]
    CannotRefundVoided { id: String },

    /// A supplied refund set is not a subset of the original bill's lines.
    #[error("invalid refund items: {reason}")]
    InvalidRefundItems { reason: String },

    /// A register operation requires an open register.
    #[error("no register is open")]
    NoOpenRegister,

    /// A register is already open; close it before opening another.
    #[error("a register is already open")]
    RegisterAlreadyOpen,

    /// A backup document is missing required collections.
    #[error("invalid backup format: {reason}")]
    InvalidBackupFormat { reason: String },

    /// Input validation failure (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A monetary field must not be negative.
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = StoreError::InsufficientStock {
            name: "Apples".to_string(),
            available: 2,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "only 2 units of Apples available in stock, requested 5"
        );

        let err = StoreError::InsufficientCash {
            required: Money::new(9.867),
            tendered: Money::new(5.0),
        };
        assert_eq!(
            err.to_string(),
            "insufficient cash: $5.00 tendered for a $9.87 bill"
        );

        let err = StoreError::PermissionDenied {
            action: "void bills",
        };
        assert_eq!(err.to_string(), "only managers can void bills");
    }

    #[test]
    fn validation_converts_to_store_error() {
        let validation = ValidationError::Required { field: "name" };
        let err: StoreError = validation.into();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "validation error: name is required");
    }
}
