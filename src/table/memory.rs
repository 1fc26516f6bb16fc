use crate::{
    common::{Item, key::Key},
    error::{Result, StoreError},
    table,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::types;
use std::{
    collections,
    ops::Bound,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

const DEFAULT_PAGE_SIZE: usize = 100;

/// Table kept in process memory.
///
/// Items are ordered by key. Like DynamoDB, a scan page that comes back full
/// carries a continuation token even when nothing follows it.
#[derive(Debug)]
pub struct MemoryTable {
    items: RwLock<collections::BTreeMap<String, Item>>,
    key_name: String,
    page_size: usize,
    unavailable: AtomicBool,
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self::new("id")
    }
}

impl MemoryTable {
    /// Empty table keyed by the string attribute `key_name`.
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            items: RwLock::new(collections::BTreeMap::new()),
            key_name: key_name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Set the number of items returned per scan page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every subsequent request fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Whether the table holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }

    fn key_of(&self, item: &Item, operation: &'static str) -> Result<String> {
        item.get(&self.key_name)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| StoreError::Request {
                operation,
                message: format!("item is missing string key attribute `{}`", self.key_name),
            })
    }
}

#[async_trait]
impl table::Table for MemoryTable {
    async fn get_item(&self, key: Key<String>) -> Result<Option<Item>> {
        self.check_available()?;
        Ok(self.items.read().await.get(&key.value).cloned())
    }

    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<table::Page> {
        self.check_available()?;
        let lower = match exclusive_start_key {
            Some(start) => Bound::Excluded(self.key_of(&start, "Scan")?),
            None => Bound::Unbounded,
        };
        let items = self.items.read().await;
        let page: Vec<(String, Item)> = items
            .range((lower, Bound::Unbounded))
            .take(self.page_size)
            .map(|(key, item)| (key.clone(), item.clone()))
            .collect();
        let last_evaluated_key = match page.last() {
            Some((key, _)) if page.len() == self.page_size => Some(Item::from([(
                self.key_name.clone(),
                types::AttributeValue::S(key.clone()),
            )])),
            _ => None,
        };
        Ok(table::Page {
            items: page.into_iter().map(|(_, item)| item).collect(),
            last_evaluated_key,
        })
    }

    async fn put_item(&self, item: Item) -> Result<()> {
        self.check_available()?;
        let key = self.key_of(&item, "PutItem")?;
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn update_item(
        &self,
        key: Key<String>,
        assignments: Item,
    ) -> Result<table::Conditional<Item>> {
        self.check_available()?;
        let mut items = self.items.write().await;
        let outcome = match items.get_mut(&key.value) {
            Some(item) => {
                item.extend(assignments);
                table::Conditional::Applied(item.clone())
            }
            None => table::Conditional::ConditionFailed,
        };
        Ok(outcome)
    }

    async fn delete_item(&self, key: Key<String>) -> Result<Option<Item>> {
        self.check_available()?;
        Ok(self.items.write().await.remove(&key.value))
    }
}
