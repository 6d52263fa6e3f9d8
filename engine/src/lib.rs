//! # Transmarin Engine
//!
//! Local persistence and business logic for the Transmarin trucking dashboard.
//!
//! All dashboard data lives in a flat key-value substrate: one key per
//! collection, each value a JSON array of records. This crate provides the
//! array CRUD layer over that substrate, the page-number window used by every
//! table, and the domain rules built on top (seed data, simulated login,
//! document expiry, dashboard counters).
//!
//! ## Design Principles
//!
//! - **Injected substrate**: the store is generic over [`Storage`], so tests
//!   run against [`MemoryStorage`] and the server against [`FileStorage`]
//! - **Forgiving reads**: absent or corrupt data reads as an empty collection
//! - **Loud writes**: quota and I/O failures surface as [`Error`]
//! - **Whole-array writes**: every mutation is one read-modify-write cycle
//!
//! ## Core Concepts
//!
//! ### Collection Store
//!
//! [`CollectionStore`] offers `get_collection`, `set_collection`, `add_item`,
//! `update_item`, `remove_item`, `find_item` and `init_collection`, each keyed
//! by a storage key from [`CollectionKind::storage_key`].
//!
//! ### Pagination
//!
//! [`page_numbers`] produces the compact `1 … 4 5 6 … 20` window and
//! [`paginate`] slices a list into a [`Page`].
//!
//! ### Identifiers
//!
//! [`generate_id`] returns `"<millis>-<7 base36 chars>"`.
//!
//! ## Quick Start
//!
//! ```rust
//! use transmarin_engine::{
//!     page_numbers, CollectionKind, CollectionStore, MemoryStorage, PageItem,
//! };
//! use serde_json::{json, Value};
//!
//! let mut store = CollectionStore::new(MemoryStorage::new());
//! let key = CollectionKind::Orders.storage_key();
//!
//! store.add_item(key, json!({"id": "o1", "status": "pending"})).unwrap();
//! store.add_item(key, json!({"id": "o2", "status": "pending"})).unwrap();
//!
//! let updated = store
//!     .update_item(
//!         key,
//!         |o: &Value| o["id"] == "o2",
//!         |mut o: Value| {
//!             o["status"] = json!("delivered");
//!             o
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(updated, 1);
//!
//! let orders: Vec<Value> = store.get_collection(key);
//! assert_eq!(orders[1]["status"], "delivered");
//!
//! assert_eq!(
//!     page_numbers(5, 10, 1),
//!     vec![
//!         PageItem::Page(1),
//!         PageItem::Ellipsis,
//!         PageItem::Page(4),
//!         PageItem::Page(5),
//!         PageItem::Page(6),
//!         PageItem::Ellipsis,
//!         PageItem::Page(10),
//!     ]
//! );
//! ```

pub mod auth;
pub mod collection;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod expiry;
pub mod format;
pub mod id;
pub mod keys;
pub mod pagination;
pub mod query;
pub mod seed;
pub mod storage;

// Re-export main types at crate root
pub use auth::{AuthUser, Module, Session, UserRole};
pub use collection::CollectionStore;
pub use dashboard::{fuel_cost_by_truck, orders_by_status, DashboardStats};
pub use error::{Error, Result};
pub use expiry::{collect_alerts, ExpiryAlert, ExpiryStatus};
pub use id::generate_id;
pub use keys::{CollectionKind, AUTH_USER_KEY};
pub use pagination::{page_numbers, paginate, total_pages, Page, PageItem};
pub use query::{ListQuery, SortDirection};
pub use seed::{seed_mock_data, SeedReport};
pub use storage::{FileStorage, MemoryStorage, Storage};
