//! # Backup Export / Import
//!
//! Builds and applies the exportable backup document over the three
//! durable collections. Reading and writing the actual file, and any
//! share sheet around it, belongs to the platform collaborator; this
//! module owns the document's shape and the rules for applying one.
//!
//! ## The User Asymmetry
//! A backup document carries `users`, but import never applies them: a
//! restored backup must not silently replace credentials. Export includes
//! them so the document is a complete account of the store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use fastbills_core::{Bill, Product, StoreError, StoreResult, User};

use crate::store::Store;

/// Format tag written into every exported document.
pub const BACKUP_VERSION: &str = "1.0.0";

/// The exportable document: the three durable collections plus an export
/// timestamp (milliseconds since epoch) and the format version tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub products: Vec<Product>,
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub timestamp: i64,
    pub version: String,
}

impl Store {
    /// Snapshots the durable collections into a backup document.
    pub fn export_backup(&self) -> BackupDocument {
        BackupDocument {
            products: self.products.clone(),
            bills: self.bills.clone(),
            users: self.users.clone(),
            timestamp: Utc::now().timestamp_millis(),
            version: BACKUP_VERSION.to_string(),
        }
    }

    /// Applies a backup document read from a file.
    ///
    /// `products`, `bills`, and `version` must be present; anything else
    /// is `InvalidBackupFormat` and the store is untouched. On success,
    /// products and bills are replaced and persisted. `users` is never
    /// applied.
    pub fn import_backup(&mut self, raw: &str) -> StoreResult<()> {
        let value: Value =
            serde_json::from_str(raw).map_err(|error| StoreError::InvalidBackupFormat {
                reason: error.to_string(),
            })?;

        for field in ["products", "bills", "version"] {
            if value.get(field).is_none() {
                return Err(StoreError::InvalidBackupFormat {
                    reason: format!("missing required field `{field}`"),
                });
            }
        }

        let document: BackupDocument =
            serde_json::from_value(value).map_err(|error| StoreError::InvalidBackupFormat {
                reason: error.to_string(),
            })?;

        info!(
            version = %document.version,
            products = document.products.len(),
            bills = document.bills.len(),
            "backup imported"
        );

        self.products = document.products;
        self.bills = document.bills;
        self.persist_products();
        self.persist_bills();
        Ok(())
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
    fn export_carries_all_three_collections_and_a_version() {
        let mut store = testutil::cashier_store();
        store.add_to_cart("1", 1).unwrap();
        store.generate_bill(CheckoutOptions::default()).unwrap();

        let document = store.export_backup();
        assert_eq!(document.products.len(), 15);
        assert_eq!(document.bills.len(), 1);
        assert_eq!(document.users.len(), 4);
        assert_eq!(document.version, BACKUP_VERSION);
        assert!(document.timestamp > 0);
    }

    #[test]
    fn export_and_import_roundtrip() {
        let mut source = testutil::cashier_store();
        source.add_to_cart("1", 2).unwrap();
        source.generate_bill(CheckoutOptions::default()).unwrap();
        let raw = serde_json::to_string(&source.export_backup()).unwrap();

        let mut target = testutil::store();
        target.import_backup(&raw).unwrap();

        assert_eq!(target.bills().len(), 1);
        // The sold-down stock came across with the products
        let apples = target.products().iter().find(|p| p.id == "1").unwrap();
        assert_eq!(apples.stock_quantity, 48);
    }

    #[test]
    fn import_rejects_documents_missing_required_fields() {
        let mut store = testutil::store();

        let missing_bills = r#"{"products": [], "version": "1.0.0"}"#;
        assert!(matches!(
            store.import_backup(missing_bills),
            Err(StoreError::InvalidBackupFormat { .. })
        ));

        let missing_version = r#"{"products": [], "bills": []}"#;
        assert!(matches!(
            store.import_backup(missing_version),
            Err(StoreError::InvalidBackupFormat { .. })
        ));

        assert!(matches!(
            store.import_backup("not json at all"),
            Err(StoreError::InvalidBackupFormat { .. })
        ));

        // Untouched after every rejection
        assert_eq!(store.products().len(), 15);
    }

    #[test]
    fn import_never_replaces_users() {
        let mut source = testutil::store();
        source.users[0].password = "stolen".to_string();
        let raw = serde_json::to_string(&source.export_backup()).unwrap();

        let mut target = testutil::store();
        target.import_backup(&raw).unwrap();

        // Credentials as seeded, not as carried in the document
        assert_eq!(target.users()[0].password, "manager123");
    }

    #[test]
    fn import_accepts_documents_without_users() {
        // Documents from tools that strip credentials still restore
        let raw = r#"{"products": [], "bills": [], "version": "1.0.0"}"#;
        let mut store = testutil::store();
        store.import_backup(raw).unwrap();
        assert!(store.products().is_empty());
        assert!(store.bills().is_empty());
    }
}
