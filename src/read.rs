//! Read requests against the fatwa table.
//!
//! - Getting a single item by primary key
//! - Scanning the table one page at a time

/// Arguments shared by read requests.
pub mod common;

/// Get item request for a single item by primary key.
pub mod get_item;

/// Scan request returning one page of the table.
pub mod scan;
