//! # Billing Engine
//!
//! Converts the cart into an immutable bill, computes tax/discount/change,
//! decrements stock, and records the bill against the open register. Void
//! and refund are the compensating transactions.
//!
//! ## Bill State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   generate_bill ──► Active ──── void_bill ────► Voided (terminal)      │
//! │                       │                                                 │
//! │                       └── process_refund ──► NEW bill (Active,         │
//! │                           original untouched,  refund_reference set)   │
//! │                                                                         │
//! │   Voided bills cannot be refunded. Voiding a voided bill is a no-op.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Discipline
//! Every failure condition is checked before the first state change, so an
//! error from any operation here means nothing moved: no bill, no stock
//! change, no register entry, cart intact.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use fastbills_core::{
    Bill, CartItem, Money, PaymentMethod, Role, StoreError, StoreResult, VoidStatus, TAX_RATE,
};

use crate::store::Store;

// =============================================================================
// Checkout Options
// =============================================================================

/// Parameters for [`Store::generate_bill`]. `Default` gives an anonymous
/// cash sale with no discount and no tendered amount.
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: PaymentMethod,
    /// Flat currency amount subtracted from subtotal + tax. Not validated
    /// against the subtotal; an oversized discount drives the final amount
    /// negative rather than clamping.
    pub discount: Money,
    /// Cash received from the customer. Only meaningful for cash payments;
    /// when supplied, it must cover the final amount and change is due.
    pub cash_tendered: Option<Money>,
}

// =============================================================================
// Billing Operations
// =============================================================================

impl Store {
    /// Checks out the cart into a new active bill.
    ///
    /// Preconditions: a session (`NoSession`), a non-empty cart
    /// (`EmptyCart`), and for cash with a tendered amount, enough cash
    /// (`InsufficientCash`).
    ///
    /// Effects, in order: bill prepended to the bills list, every line's
    /// product stock decremented by the billed quantity, bill appended to
    /// the open register's transactions if one is open, cart cleared.
    pub fn generate_bill(&mut self, opts: CheckoutOptions) -> StoreResult<Bill> {
        let cashier_name = self.authorize("generate bills", None)?.name.clone();

        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let subtotal = self.cart_total();
        let tax = subtotal.apply_rate(TAX_RATE);
        let final_amount = subtotal + tax - opts.discount;

        let mut change_due = None;
        if opts.payment_method == PaymentMethod::Cash {
            if let Some(tendered) = opts.cash_tendered {
                if tendered < final_amount {
                    return Err(StoreError::InsufficientCash {
                        required: final_amount,
                        tendered,
                    });
                }
                change_due = Some(tendered - final_amount);
            }
        }

        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            items: self.cart.clone(),
            total: subtotal,
            tax,
            discount: opts.discount,
            final_amount,
            date: Utc::now(),
            payment_method: opts.payment_method,
            customer_name: opts.customer_name,
            customer_phone: opts.customer_phone,
            cashier_name,
            void_status: VoidStatus::Active,
            void_reason: None,
            voided_by: None,
            change_due,
            refund_reference: None,
        };

        info!(
            bill = %bill.id,
            lines = bill.items.len(),
            total = %bill.final_amount,
            method = ?bill.payment_method,
            "bill generated"
        );

        self.bills.insert(0, bill.clone());
        for line in &bill.items {
            self.adjust_stock(&line.product.id, -line.quantity);
        }
        if let Some(register) = self.register.as_mut() {
            register.transactions.push(bill.clone());
        }
        self.cart.clear();

        self.persist_bills();
        self.persist_products();
        self.persist_cart();
        if self.register.is_some() {
            self.persist_register();
        }

        Ok(bill)
    }

    /// Voids an active bill, restoring stock for every line. Manager only.
    ///
    /// Voiding an already-voided bill is a no-op, not an error. The stock
    /// reversal targets the catalog's current record at each line's
    /// product id; a product deleted in the meantime is skipped.
    pub fn void_bill(&mut self, bill_id: &str, reason: &str) -> StoreResult<()> {
        let voided_by = self
            .authorize("void bills", Some(Role::Manager))?
            .name
            .clone();

        let index = self
            .bills
            .iter()
            .position(|bill| bill.id == bill_id)
            .ok_or_else(|| StoreError::BillNotFound {
                id: bill_id.to_string(),
            })?;

        if self.bills[index].is_voided() {
            return Ok(());
        }

        let items = self.bills[index].items.clone();
        for line in &items {
            self.adjust_stock(&line.product.id, line.quantity);
        }

        let bill = &mut self.bills[index];
        bill.void_status = VoidStatus::Voided;
        bill.void_reason = Some(reason.to_string());
        bill.voided_by = Some(voided_by);
        info!(bill = %bill_id, reason, "bill voided");

        self.persist_bills();
        self.persist_products();
        Ok(())
    }

    /// Removes a bill outright. Manager only.
    ///
    /// Destructive: no stock reversal and no register reconciliation
    /// happen. This is the admin escape hatch the system has always had;
    /// compensating here would change recorded history semantics.
    pub fn delete_bill(&mut self, bill_id: &str) -> StoreResult<()> {
        self.authorize("delete bills", Some(Role::Manager))?;

        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != bill_id);
        if self.bills.len() == before {
            return Err(StoreError::BillNotFound {
                id: bill_id.to_string(),
            });
        }

        warn!(bill = %bill_id, "bill deleted without compensation");
        self.persist_bills();
        Ok(())
    }

    /// Creates a refund bill against an original bill.
    ///
    /// The refund set defaults to the original's full item list; a
    /// supplied subset must reference only original lines with quantities
    /// at most the billed quantities. Amounts are recomputed from the line
    /// snapshots' price-or-override values and negated; `discount` is
    /// zero. The original bill is not mutated and can be refunded again.
    pub fn process_refund(
        &mut self,
        original_bill_id: &str,
        refund_items: Option<Vec<CartItem>>,
    ) -> StoreResult<Bill> {
        let cashier_name = self.authorize("process refunds", None)?.name.clone();

        let (original_items, payment_method, customer_name, customer_phone) = {
            let original = self
                .bills
                .iter()
                .find(|bill| bill.id == original_bill_id)
                .ok_or_else(|| StoreError::BillNotFound {
                    id: original_bill_id.to_string(),
                })?;
            if original.is_voided() {
                return Err(StoreError::CannotRefundVoided {
                    id: original_bill_id.to_string(),
                });
            }
            if let Some(requested) = &refund_items {
                validate_refund_items(original, requested)?;
            }
            (
                original.items.clone(),
                original.payment_method,
                original.customer_name.clone(),
                original.customer_phone.clone(),
            )
        };

        let items = refund_items.unwrap_or(original_items);
        let subtotal: Money = items.iter().map(CartItem::line_total).sum();
        let tax = subtotal.apply_rate(TAX_RATE);

        let refund = Bill {
            id: Uuid::new_v4().to_string(),
            items,
            total: -subtotal,
            tax: -tax,
            discount: Money::zero(),
            final_amount: -(subtotal + tax),
            date: Utc::now(),
            payment_method,
            customer_name,
            customer_phone,
            cashier_name,
            void_status: VoidStatus::Active,
            void_reason: None,
            voided_by: None,
            change_due: None,
            refund_reference: Some(original_bill_id.to_string()),
        };

        info!(
            refund = %refund.id,
            original = %original_bill_id,
            amount = %refund.final_amount,
            "refund processed"
        );

        self.bills.insert(0, refund.clone());
        for line in &refund.items {
            self.adjust_stock(&line.product.id, line.quantity);
        }
        if let Some(register) = self.register.as_mut() {
            register.transactions.push(refund.clone());
        }

        self.persist_bills();
        self.persist_products();
        if self.register.is_some() {
            self.persist_register();
        }

        Ok(refund)
    }
}

/// Checks that a requested refund set stays within the original bill's
/// lines: known product ids, quantities no greater than billed.
fn validate_refund_items(original: &Bill, requested: &[CartItem]) -> StoreResult<()> {
    for line in requested {
        let billed = original
            .items
            .iter()
            .find(|item| item.product.id == line.product.id)
            .ok_or_else(|| StoreError::InvalidRefundItems {
                reason: format!("{} is not on the original bill", line.product.name),
            })?;
        if line.quantity > billed.quantity {
            return Err(StoreError::InvalidRefundItems {
                reason: format!(
                    "refund quantity {} exceeds billed quantity {} for {}",
                    line.quantity, billed.quantity, line.product.name
                ),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
