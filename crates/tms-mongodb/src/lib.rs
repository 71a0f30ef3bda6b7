//! MongoDB access for the time management system
//!
//! This crate provides a shared, thread-safe document client over MongoDB.
//!
//! # Features
//! - Environment-driven configuration with credential escaping
//! - One connection per process, created lazily and released explicitly
//! - CRUD over named collections with string identifiers
//! - Filter and update normalization
//! - In-memory store for tests and local tooling
//!
//! # Example
//!
//! ```no_run
//! use bson::doc;
//! use tms_mongodb::{ClientProvider, Filter, FindOptions};
//!
//! # fn main() -> tms_mongodb::Result<()> {
//! let provider = ClientProvider::from_env();
//! let client = provider.acquire()?;
//!
//! let id = client.insert_one("users", doc! { "name": "John Doe", "age": 30 })?;
//! client.update_by_id("users", &id, doc! { "age": 31 })?;
//! let page = client.find_many("users", Filter::MatchAll, FindOptions::new().limit(10))?;
//! assert!(!page.is_empty());
//!
//! provider.release();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod filter;
pub mod identifier;
pub mod provider;
pub mod query;
pub mod store;
pub mod validation;

pub use client::{DocumentClient, Record};
pub use config::ClientConfig;
pub use connection::{ConnectOptions, Connection};
pub use filter::{Filter, UpdateSpec};
pub use identifier::{render_id, DocumentId, ID_FIELD};
pub use provider::{ClientProvider, Connector, MongoConnector};
pub use query::FindOptions;
pub use store::{DocumentStore, MemoryConnector, MemoryStore, UpdateOutcome};
pub use tms_common::{Result, TmsError};
pub use validation::ValidatedCollectionName;
