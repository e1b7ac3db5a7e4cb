//! # Catalog Store
//!
//! Owns the product list: manager-gated CRUD, stock mutation with
//! validation, barcode lookup, and the derived low-stock view.
//!
//! Stock invariant: `stock_quantity` never goes negative through any
//! operation in this module.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use fastbills_core::validation::{validate_price, validate_product_name};
use fastbills_core::{Money, Product, Role, StoreError, StoreResult};

use crate::store::Store;

/// Input for [`Store::add_product`]: a product minus the id, which the
/// catalog assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub stock_quantity: i64,
    pub low_stock_threshold: i64,
}

impl Store {
    /// Adds a product to the catalog with a fresh unique id. Manager only.
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        self.authorize("add products", Some(Role::Manager))?;
        validate_product_name(&new.name)?;
        validate_price(new.price)?;
        if new.stock_quantity < 0 {
            return Err(StoreError::InvalidQuantity {
                quantity: new.stock_quantity,
            });
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            price: new.price,
            category: new.category,
            unit: new.unit,
            barcode: new.barcode,
            stock_quantity: new.stock_quantity,
            low_stock_threshold: new.low_stock_threshold,
        };
        info!(id = %product.id, name = %product.name, "product added");
        self.products.push(product.clone());
        self.persist_products();
        Ok(product)
    }

    /// Replaces a product wholesale by id. Manager only.
    ///
    /// An unknown id is `ProductNotFound`, not a silent no-op: a lost edit
    /// to a just-deleted product should surface, not vanish.
    pub fn update_product(&mut self, product: Product) -> StoreResult<()> {
        self.authorize("update products", Some(Role::Manager))?;
        validate_product_name(&product.name)?;
        validate_price(product.price)?;
        if product.stock_quantity < 0 {
            return Err(StoreError::InvalidQuantity {
                quantity: product.stock_quantity,
            });
        }

        let slot = self
            .products
            .iter_mut()
            .find(|existing| existing.id == product.id)
            .ok_or_else(|| StoreError::ProductNotFound {
                id: product.id.clone(),
            })?;
        info!(id = %product.id, "product updated");
        *slot = product;
        self.persist_products();
        Ok(())
    }

    /// Removes a product from the catalog. Manager only.
    ///
    /// Rejected with `ProductInUse` while any bill, voided or not, still
    /// references the id: financial history keeps its product snapshots
    /// resolvable.
    pub fn delete_product(&mut self, product_id: &str) -> StoreResult<()> {
        self.authorize("delete products", Some(Role::Manager))?;

        let referenced = self
            .bills
            .iter()
            .any(|bill| bill.items.iter().any(|item| item.product.id == product_id));
        if referenced {
            return Err(StoreError::ProductInUse {
                id: product_id.to_string(),
            });
        }

        let before = self.products.len();
        self.products.retain(|product| product.id != product_id);
        if self.products.len() == before {
            return Err(StoreError::ProductNotFound {
                id: product_id.to_string(),
            });
        }

        info!(id = %product_id, "product deleted");
        self.persist_products();
        Ok(())
    }

    /// Sets a product's stock to an absolute quantity.
    ///
    /// Not role-gated here: sales and reversals flow through stock updates
    /// regardless of who is logged in. The screens gate manual edits.
    pub fn update_stock(&mut self, product_id: &str, new_quantity: i64) -> StoreResult<()> {
        if new_quantity < 0 {
            return Err(StoreError::InvalidQuantity {
                quantity: new_quantity,
            });
        }

        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
            .ok_or_else(|| StoreError::ProductNotFound {
                id: product_id.to_string(),
            })?;
        debug!(id = %product_id, from = product.stock_quantity, to = new_quantity, "stock updated");
        product.stock_quantity = new_quantity;
        self.persist_products();
        Ok(())
    }

    /// Exact-match barcode lookup. `None` is a valid "not found" outcome
    /// surfaced to the scanner flow, never an error.
    pub fn find_by_barcode(&self, code: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.barcode.as_deref() == Some(code))
    }

    /// Products at or below their low-stock threshold, recomputed on every
    /// read.
    pub fn low_stock_items(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.is_low_stock())
            .collect()
    }

    /// Applies a signed stock delta for billing effects (sale decrement,
    /// void/refund restore).
    ///
    /// Checkout does not re-validate stock, so the result is clamped at
    /// zero to keep the non-negativity invariant even if the catalog
    /// shrank between the cart check and the sale. A missing id is skipped:
    /// reversals apply to whatever currently exists at that id.
    pub(crate) fn adjust_stock(&mut self, product_id: &str, delta: i64) {
        if let Some(product) = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
        {
            product.stock_quantity = (product.stock_quantity + delta).max(0);
        } else {
            debug!(id = %product_id, delta, "stock adjustment skipped, product no longer exists");
        }
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

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Butter".to_string(),
            price: Money::new(3.25),
            category: "Dairy".to_string(),
            unit: "pcs".to_string(),
            barcode: Some("8901234567999".to_string()),
            stock_quantity: 12,
            low_stock_threshold: 3,
        }
    }

    #[test]
    fn manager_adds_products_with_fresh_ids() {
        let mut store = testutil::manager_store();
        let before = store.products().len();

        let a = store.add_product(new_product()).unwrap();
        let b = store.add_product(new_product()).unwrap();

        assert_eq!(store.products().len(), before + 2);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn cashier_cannot_mutate_the_catalog() {
        let mut store = testutil::cashier_store();
        assert!(matches!(
            store.add_product(new_product()),
            Err(StoreError::PermissionDenied { .. })
        ));
        assert!(matches!(
            store.delete_product("1"),
            Err(StoreError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn add_product_validates_inputs() {
        let mut store = testutil::manager_store();

        let mut blank = new_product();
        blank.name = "  ".to_string();
        assert!(matches!(
            store.add_product(blank),
            Err(StoreError::Validation(_))
        ));

        let mut negative = new_product();
        negative.stock_quantity = -1;
        assert!(matches!(
            store.add_product(negative),
            Err(StoreError::InvalidQuantity { quantity: -1 })
        ));
    }

    #[test]
    fn update_product_replaces_by_id() {
        let mut store = testutil::manager_store();
        let mut apples = store.products()[0].clone();
        apples.price = Money::new(3.49);

        store.update_product(apples).unwrap();
        assert_eq!(store.products()[0].price, Money::new(3.49));
    }

    #[test]
    fn update_product_surfaces_unknown_id() {
        let mut store = testutil::manager_store();
        let mut ghost = store.products()[0].clone();
        ghost.id = "no-such-id".to_string();
        assert!(matches!(
            store.update_product(ghost),
            Err(StoreError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn delete_is_rejected_while_bills_reference_the_product() {
        let mut store = testutil::manager_store();
        store.add_to_cart("1", 1).unwrap();
        store.generate_bill(CheckoutOptions::default()).unwrap();

        assert!(matches!(
            store.delete_product("1"),
            Err(StoreError::ProductInUse { .. })
        ));

        // A product on no bill deletes fine
        store.delete_product("2").unwrap();
        assert!(store.products().iter().all(|p| p.id != "2"));
    }

    #[test]
    fn update_stock_rejects_negative_quantities() {
        let mut store = testutil::manager_store();
        assert!(matches!(
            store.update_stock("1", -5),
            Err(StoreError::InvalidQuantity { quantity: -5 })
        ));
        // Unchanged on failure
        assert_eq!(store.products()[0].stock_quantity, 50);

        store.update_stock("1", 0).unwrap();
        assert_eq!(store.products()[0].stock_quantity, 0);
    }

    #[test]
    fn barcode_lookup_is_exact_match() {
        let store = testutil::store();
        assert_eq!(store.find_by_barcode("8901234567892").unwrap().name, "Milk");
        assert!(store.find_by_barcode("0000000000000").is_none());
        assert!(store.find_by_barcode("890123456789").is_none());
    }

    #[test]
    fn low_stock_view_tracks_threshold_crossings() {
        let mut store = testutil::manager_store();
        assert!(store.low_stock_items().is_empty());

        store.update_stock("1", 10).unwrap(); // threshold is 10
        let low: Vec<_> = store.low_stock_items();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Apples");

        store.update_stock("1", 11).unwrap();
        assert!(store.low_stock_items().is_empty());
    }

    #[test]
    fn adjust_stock_clamps_at_zero_and_skips_missing_ids() {
        let mut store = testutil::manager_store();
        store.update_stock("1", 2).unwrap();

        store.adjust_stock("1", -5);
        assert_eq!(store.products()[0].stock_quantity, 0);

        // No panic, no effect
        store.adjust_stock("no-such-id", 3);
    }
}
