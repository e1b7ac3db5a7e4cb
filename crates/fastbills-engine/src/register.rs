//! # Cash Register Ledger
//!
//! Tracks the one open cash-drawer session and the bills recorded against
//! it. Reconciliation is derived from the transaction list on demand and
//! never stored.
//!
//! On close, the drawer state transitions immediately and the closed
//! ledger stays readable as [`Store::last_closed_register`] so the closing
//! summary can still be rendered.

use chrono::Utc;
use tracing::info;

use fastbills_core::{CashRegister, Money, PaymentMethod, StoreError, StoreResult};

use crate::store::Store;

// =============================================================================
// Reconciliation Summary
// =============================================================================

/// Derived expected-vs-counted reconciliation for a register session.
///
/// `expected = opening balance + Σ final_amount of cash-method
/// transactions` (refunds are negative and subtract naturally);
/// `difference = counted - expected`, present once the register closed
/// with a counted balance.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSummary {
    pub opening_balance: Money,
    /// Net cash movement across the session's cash transactions.
    pub cash_total: Money,
    pub expected: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counted: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<Money>,
}

/// Recomputes the reconciliation from a register's transaction list.
pub fn register_summary(register: &CashRegister) -> RegisterSummary {
    let cash_total: Money = register
        .transactions
        .iter()
        .filter(|bill| bill.payment_method == PaymentMethod::Cash)
        .map(|bill| bill.final_amount)
        .sum();
    let expected = register.opening_balance + cash_total;
    let counted = register.closing_balance;

    RegisterSummary {
        opening_balance: register.opening_balance,
        cash_total,
        expected,
        counted,
        difference: counted.map(|counted| counted - expected),
    }
}

// =============================================================================
// Register Operations
// =============================================================================

impl Store {
    /// Opens a cash-drawer session for a user with an opening balance.
    ///
    /// Requires a session. Rejected with `RegisterAlreadyOpen` while a
    /// register is open: re-opening would silently discard the unclosed
    /// session's accumulated transactions.
    pub fn open_register(&mut self, user_id: &str, initial_amount: Money) -> StoreResult<()> {
        self.authorize("open the register", None)?;
        if self.register.is_some() {
            return Err(StoreError::RegisterAlreadyOpen);
        }

        info!(user = %user_id, opening = %initial_amount, "register opened");
        self.register = Some(CashRegister {
            opening_balance: initial_amount,
            closing_balance: None,
            transactions: Vec::new(),
            opened_at: Utc::now(),
            closed_at: None,
            cashier_id: user_id.to_string(),
        });
        self.persist_register();
        Ok(())
    }

    /// Closes the open register with the counted drawer amount.
    ///
    /// Stamps the closing balance and time, clears the open slot
    /// immediately (the persisted key is removed; absence means closed),
    /// retains the ledger as the last-closed summary, and returns the
    /// reconciliation.
    pub fn close_register(&mut self, final_amount: Money) -> StoreResult<RegisterSummary> {
        let mut register = self.register.take().ok_or(StoreError::NoOpenRegister)?;
        register.closing_balance = Some(final_amount);
        register.closed_at = Some(Utc::now());

        let summary = register_summary(&register);
        info!(
            counted = %final_amount,
            expected = %summary.expected,
            transactions = register.transactions.len(),
            "register closed"
        );

        self.last_closed_register = Some(register);
        self.persist_register();
        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testutil;
    use crate::CheckoutOptions;

    #[test]
    fn open_requires_a_session() {
        let mut store = testutil::store();
        assert!(matches!(
            store.open_register("1", Money::new(100.0)),
            Err(StoreError::NoSession)
        ));
    }

    #[test]
    fn double_open_is_rejected() {
        let mut store = testutil::cashier_store();
        store.open_register("2", Money::new(100.0)).unwrap();
        assert!(matches!(
            store.open_register("2", Money::new(50.0)),
            Err(StoreError::RegisterAlreadyOpen)
        ));
        // The original session survives
        assert_eq!(
            store.register().unwrap().opening_balance,
            Money::new(100.0)
        );
    }

    #[test]
    fn close_without_open_register_fails() {
        let mut store = testutil::cashier_store();
        assert!(matches!(
            store.close_register(Money::new(100.0)),
            Err(StoreError::NoOpenRegister)
        ));
    }

    #[test]
    fn bills_accumulate_against_the_open_register() {
        let mut store = testutil::cashier_store();
        store.open_register("2", Money::new(100.0)).unwrap();

        store.add_to_cart("1", 3).unwrap();
        let bill = store.generate_bill(CheckoutOptions::default()).unwrap();

        let register = store.register().unwrap();
        assert_eq!(register.transactions.len(), 1);
        assert_eq!(register.transactions[0].id, bill.id);
    }

    #[test]
    fn close_reconciles_cash_transactions() {
        let mut store = testutil::manager_store();
        store.open_register("1", Money::new(100.0)).unwrap();

        // One cash sale with final amount 22.00: 2 × 10.00 + 10% tax
        store.add_to_cart("1", 2).unwrap();
        store.override_price("1", Money::new(10.0)).unwrap();
        store.generate_bill(CheckoutOptions::default()).unwrap();

        let summary = store.close_register(Money::new(122.0)).unwrap();
        assert!((summary.expected.amount() - 122.0).abs() < 1e-9);
        assert!((summary.difference.unwrap().amount()).abs() < 1e-9);
        assert_eq!(summary.counted, Some(Money::new(122.0)));

        // Open slot cleared immediately, ledger retained for display
        assert!(store.register().is_none());
        let closed = store.last_closed_register().unwrap();
        assert!(closed.is_closed());
        assert_eq!(closed.closing_balance, Some(Money::new(122.0)));
    }

    #[test]
    fn non_cash_transactions_stay_out_of_expected_cash() {
        let mut store = testutil::cashier_store();
        store.open_register("2", Money::new(100.0)).unwrap();

        store.add_to_cart("1", 1).unwrap();
        store
            .generate_bill(CheckoutOptions {
                payment_method: PaymentMethod::Card,
                ..Default::default()
            })
            .unwrap();

        let summary = store.close_register(Money::new(100.0)).unwrap();
        assert!(summary.cash_total.is_zero());
        assert!((summary.expected.amount() - 100.0).abs() < 1e-9);
        assert!(summary.difference.unwrap().is_zero());
    }

    #[test]
    fn refunds_subtract_from_expected_cash() {
        let mut store = testutil::cashier_store();
        store.open_register("2", Money::new(100.0)).unwrap();

        store.add_to_cart("1", 3).unwrap(); // final 9.867 cash
        let bill = store.generate_bill(CheckoutOptions::default()).unwrap();
        store.process_refund(&bill.id, None).unwrap(); // -9.867 cash

        let register = store.register().unwrap();
        assert_eq!(register.transactions.len(), 2);

        let summary = register_summary(register);
        assert!(summary.cash_total.amount().abs() < 1e-9);
        assert!((summary.expected.amount() - 100.0).abs() < 1e-9);
        // Still open: no counted balance, no difference yet
        assert_eq!(summary.counted, None);
        assert_eq!(summary.difference, None);
    }

    #[test]
    fn register_can_reopen_after_close() {
        let mut store = testutil::cashier_store();
        store.open_register("2", Money::new(100.0)).unwrap();
        store.close_register(Money::new(100.0)).unwrap();

        store.open_register("3", Money::new(75.0)).unwrap();
        assert_eq!(store.register().unwrap().cashier_id, "3");
    }
}
