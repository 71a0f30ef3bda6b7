//! Record validation for the time management system
//!
//! Validates raw documents for the two persisted record kinds before they
//! reach the document client:
//! - [`UserRecord`] for the `users` collection
//! - [`TimeLogRecord`] for the `time_logs` collection
//!
//! # Example
//!
//! ```rust
//! use bson::doc;
//! use tms_validation::{Schema, TimeLogRecord};
//!
//! let raw = doc! {
//!     "employee_id": "E001",
//!     "date": "2025-06-01",
//!     "hostname": "ws-01",
//!     "os": "Linux",
//!     "login_time": "25:00",
//!     "logout_time": "17:30",
//!     "active_hours": 8.5,
//! };
//! let errors = TimeLogRecord::validate(&raw).unwrap_err();
//! assert!(errors.has_field("login_time"));
//! ```

pub mod errors;
pub mod formats;
pub mod schemas;

pub use errors::{ErrorType, ValidationError, ValidationErrors, ValidationResult};
pub use schemas::{Schema, TimeLogRecord, UserRecord};
