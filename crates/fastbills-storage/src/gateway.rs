//! # StorageGateway Trait
//!
//! The interface the engine persists through. Implementations store whole
//! collection snapshots as JSON values, keyed by collection name
//! (`products`, `bills`, `cart`, `users`, `currentUser`, `cashRegister`).
//!
//! ## Why `serde_json::Value` at the boundary?
//! The gateway must be object-safe (`Arc<dyn StorageGateway>`), which rules
//! out generic methods. The engine serializes to `Value` before handing
//! over, and [`load_or`] deserializes on the way out.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::error::StorageError;

/// Async key-value store for collection snapshots.
///
/// Key absence is meaningful and distinct from an empty collection: the
/// engine deletes `currentUser` on logout and `cashRegister` on close
/// rather than storing a null.
#[async_trait]
pub trait StorageGateway: Send + Sync + fmt::Debug {
    /// Stores a snapshot under the given key, replacing any prior value.
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Fetches the snapshot stored under the key, if any.
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Deletes the key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Checks whether any value is stored under the key.
    async fn exists(&self, key: &str) -> bool;

    /// Deletes every key. Factory reset; the engine re-seeds on next load.
    async fn clear_all(&self) -> Result<(), StorageError>;
}

/// Typed load with a default.
///
/// Returns `default` on a missing key, a gateway failure, or a parse
/// failure. Failures are logged, never propagated: startup must succeed
/// against an empty or corrupted store.
pub async fn load_or<T: DeserializeOwned>(
    gateway: &dyn StorageGateway,
    key: &str,
    default: T,
) -> T {
    match gateway.load(key).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(key, %error, "stored snapshot failed to parse, using default");
                default
            }
        },
        Ok(None) => default,
        Err(error) => {
            warn!(key, %error, "storage load failed, using default");
            default
        }
    }
}
