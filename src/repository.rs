//! Storage adapter: typed fatwa operations on top of a [`Table`].
//!
//! This is the only place that knows how a [`Fatwa`] is laid out as a table
//! item. It holds no business rules beyond the existence guard on update,
//! which the table evaluates atomically with the write.

use crate::{
    common::{Item, key::Key},
    error::Result,
    model::{CreateFatwa, Fatwa, UpdateFatwa},
    table::{Conditional, Table},
};

use futures_util::{Stream, TryStreamExt, stream};
use serde_dynamo::{from_item, to_item};
use uuid::Uuid;

/// Partition key attribute of the fatwa table.
pub const KEY_NAME: &str = "id";

enum ScanCursor {
    Start,
    After(Item),
    Done,
}

/// Typed access to the fatwa table.
#[derive(Clone, Debug)]
pub struct FatwaRepository<T> {
    table: T,
}

impl<T: Table> FatwaRepository<T> {
    /// Repository over `table`.
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &T {
        &self.table
    }

    fn key(id: &str) -> Key<String> {
        Key::new(KEY_NAME, id.to_string())
    }

    /// Fetch one fatwa; `None` when `id` is unknown.
    #[tracing::instrument(skip(self), err)]
    pub async fn get(&self, id: &str) -> Result<Option<Fatwa>> {
        let item = self.table.get_item(Self::key(id)).await?;
        let fatwa: Option<Fatwa> = item.map(from_item).transpose()?;
        tracing::debug!(found = fatwa.is_some(), "fetched fatwa");
        Ok(fatwa)
    }

    /// Lazily scan the table, one page of fatawa per stream element.
    ///
    /// Pages come in the order the table returns them. The stream ends after
    /// the page without a continuation token and can be restarted by calling
    /// this again.
    pub fn pages(&self) -> impl Stream<Item = Result<Vec<Fatwa>>> + Send + '_ {
        stream::try_unfold(ScanCursor::Start, move |cursor| self.next_page(cursor))
    }

    async fn next_page(&self, cursor: ScanCursor) -> Result<Option<(Vec<Fatwa>, ScanCursor)>> {
        let exclusive_start_key = match cursor {
            ScanCursor::Start => None,
            ScanCursor::After(key) => Some(key),
            ScanCursor::Done => return Ok(None),
        };
        let page = self.table.scan_page(exclusive_start_key).await?;
        let fatawa = page
            .items
            .into_iter()
            .map(|item| from_item(item).map_err(Into::into))
            .collect::<Result<Vec<Fatwa>>>()?;
        let next = match page.last_evaluated_key {
            Some(key) => ScanCursor::After(key),
            None => ScanCursor::Done,
        };
        Ok(Some((fatawa, next)))
    }

    /// Every fatwa in the table, following all continuation tokens.
    ///
    /// Memory grows with the table; use [`FatwaRepository::pages`] to bound it.
    #[tracing::instrument(skip(self), err)]
    pub async fn list_all(&self) -> Result<Vec<Fatwa>> {
        let fatawa: Vec<Fatwa> = self.pages().try_concat().await?;
        tracing::debug!(count = fatawa.len(), "listed fatawa");
        Ok(fatawa)
    }

    /// Store a new fatwa under a freshly generated id.
    ///
    /// The write is unconditional: a v4 UUID collision is not guarded against.
    #[tracing::instrument(skip_all, err)]
    pub async fn insert(&self, create: CreateFatwa) -> Result<Fatwa> {
        let fatwa = create.into_fatwa(Uuid::new_v4().to_string());
        let item: Item = to_item(&fatwa)?;
        self.table.put_item(item).await?;
        tracing::debug!(id = %fatwa.id, "inserted fatwa");
        Ok(fatwa)
    }

    /// Replace every business field of an existing fatwa.
    ///
    /// Returns [`Conditional::ConditionFailed`] when `id` is unknown.
    #[tracing::instrument(skip(self, update), err)]
    pub async fn update(&self, id: &str, update: UpdateFatwa) -> Result<Conditional<Fatwa>> {
        let assignments: Item = to_item(&update)?;
        let outcome = self.table.update_item(Self::key(id), assignments).await?;
        let outcome: Conditional<Fatwa> = outcome.try_map(from_item)?;
        Ok(outcome)
    }

    /// Remove a fatwa, returning its last stored state.
    #[tracing::instrument(skip(self), err)]
    pub async fn delete(&self, id: &str) -> Result<Option<Fatwa>> {
        let item = self.table.delete_item(Self::key(id)).await?;
        let fatwa: Option<Fatwa> = item.map(from_item).transpose()?;
        Ok(fatwa)
    }
}
