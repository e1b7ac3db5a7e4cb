//! # Cart
//!
//! The in-progress selection for the active session: lines keyed by
//! product id, each a frozen product snapshot plus a quantity and an
//! optional manager price override.
//!
//! Stock is validated opportunistically at every cart mutation against the
//! live catalog, but never reserved. Two concurrent carts could race over
//! the same stock; this deployment runs one device with one cashier, so
//! the race cannot occur here. A multi-session deployment must add
//! reservation before trusting these checks.

use tracing::debug;

use fastbills_core::{CartItem, Money, Role, StoreError, StoreResult};

use crate::store::Store;

impl Store {
    /// Adds a product to the cart, merging into an existing line if the
    /// product is already present.
    ///
    /// Fails with `InsufficientStock` when the requested quantity, or the
    /// merged line total, exceeds the catalog's current stock. Order of
    /// existing lines is preserved; new lines append.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| StoreError::ProductNotFound {
                id: product_id.to_string(),
            })?
            .clone();

        if product.stock_quantity < quantity {
            return Err(StoreError::InsufficientStock {
                name: product.name,
                available: product.stock_quantity,
                requested: quantity,
            });
        }

        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            let merged = line.quantity + quantity;
            if product.stock_quantity < merged {
                return Err(StoreError::InsufficientStock {
                    name: product.name,
                    available: product.stock_quantity,
                    requested: merged,
                });
            }
            line.quantity = merged;
        } else {
            self.cart.push(CartItem {
                product,
                quantity,
                overridden_price: None,
            });
        }

        self.persist_cart();
        Ok(())
    }

    /// Removes a line by product id. Idempotent: an absent id is fine.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.retain(|line| line.product.id != product_id);
        self.persist_cart();
    }

    /// Replaces a line's quantity in place.
    ///
    /// Fails with `InsufficientStock` when the quantity exceeds the line's
    /// product stock. A product id not in the cart is a silent no-op.
    pub fn update_cart_item_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            if line.product.stock_quantity < quantity {
                return Err(StoreError::InsufficientStock {
                    name: line.product.name.clone(),
                    available: line.product.stock_quantity,
                    requested: quantity,
                });
            }
            line.quantity = quantity;
        } else {
            debug!(id = %product_id, "quantity update for product not in cart, ignored");
        }
        self.persist_cart();
        Ok(())
    }

    /// Sets a per-line price override. Manager only.
    ///
    /// The override supersedes the catalog price for totals and billing
    /// on this line; the product itself is untouched. A product id not in
    /// the cart is a silent no-op.
    pub fn override_price(&mut self, product_id: &str, price: Money) -> StoreResult<()> {
        self.authorize("override prices", Some(Role::Manager))?;

        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            debug!(id = %product_id, %price, "price overridden");
            line.overridden_price = Some(price);
        }
        self.persist_cart();
        Ok(())
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Sum over lines of `(override ?? catalog price) × quantity`.
    /// Pure; no side effects.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(CartItem::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testutil;

    #[test]
    fn add_to_cart_appends_and_merges() {
        let mut store = testutil::cashier_store();

        store.add_to_cart("1", 2).unwrap(); // Apples
        store.add_to_cart("3", 1).unwrap(); // Milk
        store.add_to_cart("1", 3).unwrap(); // merge into Apples

        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.cart()[0].product.name, "Apples");
        assert_eq!(store.cart()[0].quantity, 5);
        assert_eq!(store.cart()[1].product.name, "Milk");
    }

    #[test]
    fn add_to_cart_rejects_more_than_current_stock() {
        let mut store = testutil::manager_store();
        store.update_stock("1", 2).unwrap();

        let err = store.add_to_cart("1", 5).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 2,
                requested: 5,
                ..
            }
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn merged_quantity_is_revalidated_against_current_stock() {
        let mut store = testutil::manager_store();
        store.update_stock("1", 4).unwrap();

        store.add_to_cart("1", 3).unwrap();
        let err = store.add_to_cart("1", 2).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock { requested: 5, .. }
        ));
        // The existing line is untouched by the failed merge
        assert_eq!(store.cart()[0].quantity, 3);
    }

    #[test]
    fn unknown_product_cannot_enter_the_cart() {
        let mut store = testutil::cashier_store();
        assert!(matches!(
            store.add_to_cart("no-such-id", 1),
            Err(StoreError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn remove_from_cart_is_idempotent() {
        let mut store = testutil::cashier_store();
        store.add_to_cart("1", 1).unwrap();

        store.remove_from_cart("1");
        assert!(store.cart().is_empty());
        store.remove_from_cart("1"); // absent: no error
    }

    #[test]
    fn quantity_update_replaces_in_place_and_validates_stock() {
        let mut store = testutil::cashier_store();
        store.add_to_cart("1", 2).unwrap();

        store.update_cart_item_quantity("1", 10).unwrap();
        assert_eq!(store.cart()[0].quantity, 10);

        let err = store.update_cart_item_quantity("1", 51).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock { available: 50, .. }
        ));
        assert_eq!(store.cart()[0].quantity, 10);

        // Absent product id: silent no-op
        store.update_cart_item_quantity("3", 4).unwrap();
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn override_price_requires_a_manager() {
        let mut store = testutil::cashier_store();
        store.add_to_cart("1", 3).unwrap();

        let err = store.override_price("1", Money::new(1.00)).unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied { .. }));
        assert_eq!(store.cart()[0].overridden_price, None);
    }

    #[test]
    fn override_price_changes_totals_immediately() {
        let mut store = testutil::manager_store();
        store.add_to_cart("1", 3).unwrap(); // 3 × 2.99

        assert!((store.cart_total().amount() - 8.97).abs() < 1e-9);

        store.override_price("1", Money::new(2.00)).unwrap();
        assert!((store.cart_total().amount() - 6.0).abs() < 1e-9);

        // Catalog price is untouched
        assert_eq!(store.products()[0].price, Money::new(2.99));
    }

    #[test]
    fn clear_cart_empties_unconditionally() {
        let mut store = testutil::cashier_store();
        store.add_to_cart("1", 1).unwrap();
        store.add_to_cart("2", 1).unwrap();

        store.clear_cart();
        assert!(store.cart().is_empty());
        assert!(store.cart_total().is_zero());
    }

    #[test]
    fn cart_total_sums_effective_prices() {
        let mut store = testutil::manager_store();
        store.add_to_cart("2", 2).unwrap(); // Bananas 1.49 × 2
        store.add_to_cart("4", 1).unwrap(); // Bread 2.29
        store.override_price("4", Money::new(2.00)).unwrap();

        assert!((store.cart_total().amount() - 4.98).abs() < 1e-9);
    }
}
