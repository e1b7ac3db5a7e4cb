//! # Domain Types
//!
//! Core domain types used throughout FastBills.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product (snap) │   │  id             │       │
//! │  │  price          │──►│  quantity       │──►│  items (snap)   │       │
//! │  │  stock_quantity │   │  overridden_    │   │  total/tax/...  │       │
//! │  │  barcode        │   │    price        │   │  void_status    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  CashRegister   │   │   VoidStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (login)   │   │  opening_balance│   │  Active         │       │
//! │  │  role           │   │  transactions   │   │  Voided         │       │
//! │  │  password       │   │  closed_at?     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` carries a full copy of the product at the time it entered
//! the cart, and a `Bill` carries the cart lines at the time of sale. Later
//! catalog edits never rewrite financial history.
//!
//! ## Wire Format
//! All structs serialize with camelCase field names and omit absent optional
//! fields, so persisted snapshots and backup documents remain compatible
//! with data written by earlier releases of the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// A user's role, gating the mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can sell, and additionally manage the catalog, override prices,
    /// void bills, and delete bills.
    Manager,
    /// Can sell, open/close the register, and run reports.
    Cashier,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash; the only method that produces change due.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// UPI transfer.
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Void Status
// =============================================================================

/// The lifecycle state of a bill: `Active → Voided`, terminal once voided.
///
/// A refund never transitions the original bill; it creates a new bill
/// carrying a `refund_reference` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoidStatus {
    Active,
    Voided,
}

impl Default for VoidStatus {
    fn default() -> Self {
        VoidStatus::Active
    }
}

// =============================================================================
// Report Timeframe
// =============================================================================

/// Time window selector for sales reports. All boundaries are computed in
/// local time; the week begins on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTimeframe {
    Daily,
    Weekly,
    Monthly,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, stable for the product's lifetime.
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Catalog unit price. Never negative.
    pub price: Money,

    /// Free-form category string (drawn from a curated set by convention,
    /// not enforced here).
    pub category: String,

    /// Unit label, e.g. "kg", "pcs", "liter".
    pub unit: String,

    /// Barcode payload for exact-match scanner lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Current stock level. Invariant: never negative.
    pub stock_quantity: i64,

    /// Stock level at or below which the product counts as low stock.
    pub low_stock_threshold: i64,
}

impl Product {
    /// Derived low-stock predicate; never stored.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart: a product snapshot, a quantity, and an optional
/// manager price override that applies to this line only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product data frozen at the time the line was created.
    pub product: Product,

    /// Quantity of the product on this line.
    pub quantity: i64,

    /// Per-line price override; supersedes the catalog price for totals
    /// and billing. Does not mutate the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_price: Option<Money>,
}

impl CartItem {
    /// The price this line actually charges: override if set, catalog
    /// price otherwise.
    #[inline]
    pub fn effective_price(&self) -> Money {
        self.overridden_price.unwrap_or(self.product.price)
    }

    /// Line total: effective price times quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.effective_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// An immutable financial record of a completed sale or refund.
///
/// Only the void metadata (`void_status`, `void_reason`, `voided_by`) is
/// ever mutated after creation. A refund is a separate `Bill` whose
/// monetary fields are negated and which carries `refund_reference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,

    /// Cart line snapshots at the time of sale.
    pub items: Vec<CartItem>,

    /// Subtotal across line totals, before tax and discount.
    pub total: Money,

    /// Tax on the subtotal at the fixed rate.
    pub tax: Money,

    /// Flat currency amount subtracted from subtotal + tax.
    pub discount: Money,

    /// `total + tax - discount`, exactly, unrounded.
    pub final_amount: Money,

    /// Creation timestamp.
    pub date: DateTime<Utc>,

    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,

    /// Display name of the user who generated the bill.
    pub cashier_name: String,

    /// Bills written before void tracking existed carry no status field;
    /// they deserialize as active.
    #[serde(default)]
    pub void_status: VoidStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,

    /// Display name of the manager who voided the bill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voided_by: Option<String>,

    /// Change returned to the customer; cash payments only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_due: Option<Money>,

    /// For refund bills: the id of the bill this one refunds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_reference: Option<String>,
}

impl Bill {
    #[inline]
    pub fn is_voided(&self) -> bool {
        self.void_status == VoidStatus::Voided
    }

    #[inline]
    pub fn is_refund(&self) -> bool {
        self.refund_reference.is_some()
    }
}

// =============================================================================
// User
// =============================================================================

/// A user of the system. The `name` doubles as the login identifier.
///
/// The password is stored and compared as plain text, exactly as the data
/// this system inherits. The comparison itself lives behind the engine's
/// `CredentialVerifier` trait so a hashing scheme can replace it without
/// touching the session contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

// =============================================================================
// Cash Register
// =============================================================================

/// A cash-drawer session: a bounded period during which transactions are
/// tracked against an opening balance for reconciliation at close.
///
/// At most one register is open at a time, process-wide. The expected-vs-
/// counted reconciliation is derived from `transactions` on demand and is
/// never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    pub opening_balance: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Money>,

    /// Every bill generated while this register was open, refunds included.
    pub transactions: Vec<Bill>,

    pub opened_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,

    /// Id of the user the register was opened for.
    pub cashier_id: String,
}

impl CashRegister {
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, threshold: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Apples".to_string(),
            price: Money::new(2.99),
            category: "Fruits".to_string(),
            unit: "kg".to_string(),
            barcode: Some("8901234567890".to_string()),
            stock_quantity: stock,
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn low_stock_is_derived_at_or_below_threshold() {
        assert!(product(10, 10).is_low_stock());
        assert!(product(3, 10).is_low_stock());
        assert!(!product(11, 10).is_low_stock());
    }

    #[test]
    fn effective_price_prefers_override() {
        let mut line = CartItem {
            product: product(50, 10),
            quantity: 3,
            overridden_price: None,
        };
        assert_eq!(line.effective_price(), Money::new(2.99));

        line.overridden_price = Some(Money::new(2.00));
        assert_eq!(line.effective_price(), Money::new(2.00));
        assert!((line.line_total().amount() - 6.0).abs() < 1e-9);

        // An override of zero is respected, not treated as unset
        line.overridden_price = Some(Money::zero());
        assert!(line.line_total().is_zero());
    }

    #[test]
    fn product_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(product(50, 10)).unwrap();
        assert!(json.get("stockQuantity").is_some());
        assert!(json.get("lowStockThreshold").is_some());
        assert!(json.get("stock_quantity").is_none());
    }

    #[test]
    fn bill_without_void_fields_deserializes_as_active() {
        // Shape written before void tracking: no voidStatus key at all
        let json = serde_json::json!({
            "id": "b1",
            "items": [],
            "total": 8.97,
            "tax": 0.897,
            "discount": 0.0,
            "finalAmount": 9.867,
            "date": "2026-01-15T10:30:00Z",
            "paymentMethod": "cash",
            "cashierName": "cashier"
        });
        let bill: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(bill.void_status, VoidStatus::Active);
        assert!(!bill.is_voided());
        assert!(!bill.is_refund());
    }

    #[test]
    fn absent_optionals_are_omitted_from_snapshots() {
        let bill = Bill {
            id: "b1".to_string(),
            items: Vec::new(),
            total: Money::new(10.0),
            tax: Money::new(1.0),
            discount: Money::zero(),
            final_amount: Money::new(11.0),
            date: Utc::now(),
            payment_method: PaymentMethod::Card,
            customer_name: None,
            customer_phone: None,
            cashier_name: "manager".to_string(),
            void_status: VoidStatus::Active,
            void_reason: None,
            voided_by: None,
            change_due: None,
            refund_reference: None,
        };
        let json = serde_json::to_value(&bill).unwrap();
        assert!(json.get("customerName").is_none());
        assert!(json.get("changeDue").is_none());
        assert_eq!(json["paymentMethod"], "card");
        assert_eq!(json["voidStatus"], "active");
    }

    #[test]
    fn role_and_timeframe_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_value(Role::Manager).unwrap(), "manager");
        assert_eq!(
            serde_json::to_value(ReportTimeframe::Weekly).unwrap(),
            "weekly"
        );
        let role: Role = serde_json::from_value(serde_json::json!("cashier")).unwrap();
        assert_eq!(role, Role::Cashier);
    }
}
