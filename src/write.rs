//! Write requests against the fatwa table.
//!
//! - Putting a whole item
//! - Replacing attributes of an existing item under a condition
//! - Deleting an item by primary key

/// Arguments shared by write requests.
pub mod common;

/// Delete item request.
pub mod delete_item;

/// Put item request.
pub mod put_item;

/// Update item request.
pub mod update_item;
