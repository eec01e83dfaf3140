//! Lazily paged remote collections
//!
//! A [`PagedCollection`] mirrors an offset-indexed remote sequence. Pages are
//! requested from a [`PageSource`] only when a position past the local cache
//! is asked for, appended in server order and never requested again.

use crate::error::{CollectionError, FetchError};

use super::items::{AsItemRef, ItemRef};
use super::menu::Listing;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One slice of a remote collection plus the collection's size at the time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Capability to fetch a bounded slice of a remote ordered collection.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Item;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<Self::Item>, FetchError>;
}

/// Append-only local cache over a [`PageSource`].
///
/// Not safe for concurrent use; the control loop owns it exclusively.
pub struct PagedCollection<S: PageSource> {
    source: S,
    items: Vec<S::Item>,
    total: Option<usize>,
    page_size: usize,
    /// Set when the source returned an empty page before reaching `total`
    exhausted: bool,
    cursor: usize,
}

impl<S: PageSource> PagedCollection<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        Self {
            source,
            items: Vec::new(),
            total: None,
            page_size: page_size.max(1),
            exhausted: false,
            cursor: 0,
        }
    }

    #[cfg(test)]
    pub fn known_total(&self) -> Option<usize> {
        self.total
    }

    /// Items fetched so far, in collection order.
    #[cfg(test)]
    pub fn loaded(&self) -> &[S::Item] {
        &self.items
    }

    /// Cached item at `index`, without fetching.
    pub fn cached(&self, index: usize) -> Option<&S::Item> {
        self.items.get(index)
    }

    fn is_complete(&self) -> bool {
        self.exhausted || self.total.is_some_and(|total| self.items.len() >= total)
    }

    /// Fetch pages in ascending order until `index` is cached or the
    /// collection is known to end before it.
    pub async fn ensure_loaded(&mut self, index: usize) -> Result<(), CollectionError> {
        while self.items.len() <= index && !self.is_complete() {
            self.fetch_next_page().await?;
        }

        if index < self.items.len() {
            Ok(())
        } else {
            Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    pub async fn get(&mut self, index: usize) -> Result<&S::Item, CollectionError> {
        self.ensure_loaded(index).await?;
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(CollectionError::OutOfRange { index, len })
    }

    /// Size of the remote collection, probing with a one-item request when
    /// no page has been seen yet.
    ///
    /// A collection that ran dry early is probed again, and fetching resumes
    /// when the remote reports more items than are cached.
    pub async fn length(&mut self) -> Result<usize, CollectionError> {
        if let (Some(total), false) = (self.total, self.exhausted) {
            return Ok(total);
        }

        tracing::debug!(exhausted = self.exhausted, "Probing collection size");
        // the probe item is dropped so page boundaries stay aligned
        let probe = self.source.fetch_page(0, 1).await?;
        self.observe_total(probe.total);

        if self.exhausted {
            if probe.total <= self.items.len() {
                return Ok(self.items.len());
            }
            tracing::debug!(cached = self.items.len(), total = probe.total, "Collection grew, resuming fetches");
            self.exhausted = false;
        }
        Ok(self.total.unwrap_or(probe.total))
    }

    /// Fetch everything that is not cached yet by reading the collection
    /// through once. Leaves the read cursor at the end.
    pub async fn load_all(&mut self) -> Result<&[S::Item], CollectionError> {
        self.rewind();
        while self.next_item().await?.is_some() {}
        Ok(&self.items)
    }

    /// Restart sequential reading from the first item. The cache is kept.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Next item of the sequential read, or `None` past the end.
    pub async fn next_item(&mut self) -> Result<Option<&S::Item>, CollectionError> {
        match self.ensure_loaded(self.cursor).await {
            Ok(()) => {}
            Err(CollectionError::OutOfRange { .. }) => return Ok(None),
            Err(e) => return Err(e),
        }
        let item = self.items.get(self.cursor);
        self.cursor += 1;
        Ok(item)
    }

    async fn fetch_next_page(&mut self) -> Result<(), CollectionError> {
        let offset = self.items.len();
        tracing::debug!(offset, limit = self.page_size, "Fetching page");

        let page = self.source.fetch_page(offset, self.page_size).await?;
        self.observe_total(page.total);

        if page.items.is_empty() {
            if self.total.is_some_and(|total| total > offset) {
                tracing::warn!(
                    offset,
                    total = ?self.total,
                    "Page source returned no items, treating collection as complete"
                );
                self.exhausted = true;
            }
            return Ok(());
        }

        tracing::trace!(offset, fetched = page.items.len(), total = page.total, "Page cached");
        self.items.extend(page.items);
        Ok(())
    }

    fn observe_total(&mut self, total: usize) {
        // a non-zero total only ever grows
        self.total = Some(match self.total {
            Some(known) if known > 0 => known.max(total),
            _ => total,
        });
    }
}

impl<S> Listing for PagedCollection<S>
where
    S: PageSource,
    S::Item: AsItemRef,
{
    fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        self.cached(index).map(AsItemRef::as_item_ref)
    }
}
