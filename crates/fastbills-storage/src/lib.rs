//! # fastbills-storage: Persistence Gateway
//!
//! A generic async key-value store for JSON-serializable collection
//! snapshots. The engine owns the collections and decides when to persist;
//! this crate only moves bytes.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Persistence Gateway Contract                        │
//! │                                                                         │
//! │  save(key, value)    store a snapshot; failure is reported, the        │
//! │                      engine logs it and keeps its in-memory state      │
//! │  load(key)           fetch a snapshot if one exists                    │
//! │  remove(key)         delete a key (absence is meaningful: no session,  │
//! │                      no open register)                                 │
//! │  exists(key)         presence check                                    │
//! │  clear_all()         wipe every key (factory reset)                    │
//! │                                                                         │
//! │  load_or(gateway, key, default)                                        │
//! │      typed load that returns the default on a missing key OR a parse   │
//! │      failure, never an error. Callers of a mutating operation are      │
//! │      never blocked on storage.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//! - [`MemoryStorage`] - HashMap-backed, for tests and ephemeral sessions
//! - [`JsonFileStorage`] - one JSON file per key in a data directory

pub mod error;
pub mod file;
pub mod gateway;
pub mod memory;

pub use error::StorageError;
pub use file::JsonFileStorage;
pub use gateway::{load_or, StorageGateway};
pub use memory::MemoryStorage;
