//! The key-value table the repository stores fatawa in.
//!
//! [`Table`] is the seam between the storage adapter and the store itself:
//! [`dynamo::DynamoTable`] talks to DynamoDB, [`memory::MemoryTable`] keeps
//! items in process with the same paging and conditional-write behavior.

/// DynamoDB-backed table.
pub mod dynamo;

/// In-process table.
pub mod memory;

use crate::{
    common::{Item, key::Key},
    error::Result,
};

use async_trait::async_trait;

/// One page of a scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Items of this page, in the order the store returned them.
    pub items: Vec<Item>,
    /// Continuation token; `None` once the scan is complete.
    pub last_evaluated_key: Option<Item>,
}

/// Outcome of a conditional write.
#[derive(Clone, Debug, PartialEq)]
pub enum Conditional<T> {
    /// The condition held and the write took effect.
    Applied(T),
    /// The condition did not hold; nothing was written.
    ConditionFailed,
}

impl<T> Conditional<T> {
    /// Map the applied value with a fallible function.
    pub fn try_map<U, E>(
        self,
        f: impl FnOnce(T) -> std::result::Result<U, E>,
    ) -> std::result::Result<Conditional<U>, E> {
        match self {
            Self::Applied(value) => f(value).map(Conditional::Applied),
            Self::ConditionFailed => Ok(Conditional::ConditionFailed),
        }
    }

    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::ConditionFailed => None,
        }
    }
}

/// Single-table key-value store keyed by one string partition key.
#[async_trait]
pub trait Table: Send + Sync {
    /// Point lookup; `None` when no item has this key.
    async fn get_item(&self, key: Key<String>) -> Result<Option<Item>>;

    /// Fetch the page following `exclusive_start_key`, or the first page.
    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<Page>;

    /// Write the whole item unconditionally.
    async fn put_item(&self, item: Item) -> Result<()>;

    /// Overwrite `assignments` on the item with this key, only if it exists.
    ///
    /// The existence check and the write happen as one atomic operation.
    /// Returns the item as stored after the write.
    async fn update_item(&self, key: Key<String>, assignments: Item) -> Result<Conditional<Item>>;

    /// Remove the item, returning what was stored, or `None` if nothing was.
    async fn delete_item(&self, key: Key<String>) -> Result<Option<Item>>;
}
