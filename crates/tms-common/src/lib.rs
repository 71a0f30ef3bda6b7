//! Common utilities for the time management system
//!
//! This crate provides the error type and logging bootstrap shared by every
//! `tms-*` crate.

pub mod error;
pub mod logging;

pub use error::{Result, TmsError};
