//! Cursor-following aggregation
//!
//! Pages are fetched strictly one after the other: the cursor of page N+1 is
//! the id of the last item collected after page N.

use super::types::{Accumulator, AggregationConfig, Cursor, Paginator};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestDescriptor};
use serde_json::Value;
use tracing::{debug, warn};

/// Collects every item of a cursor-paginated feed
pub struct CursorAggregator<'a> {
    client: &'a HttpClient,
    paginator: &'a dyn Paginator,
    config: AggregationConfig,
    accumulator: Accumulator,
    pages_fetched: usize,
}

impl<'a> CursorAggregator<'a> {
    /// Create an aggregator with default settings
    pub fn new(client: &'a HttpClient, paginator: &'a dyn Paginator) -> Self {
        Self {
            client,
            paginator,
            config: AggregationConfig::default(),
            accumulator: Accumulator::new(),
            pages_fetched: 0,
        }
    }

    /// Set aggregation configuration
    #[must_use]
    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    /// Pages requested by the last call to [`collect`](Self::collect)
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch pages until the limit is met or the feed is exhausted.
    ///
    /// `request_for` builds the request for a cursor; it receives `None` only
    /// when no starting cursor was configured and this is the first page.
    /// Any failed page discards everything collected so far.
    pub async fn collect<F>(&mut self, mut request_for: F) -> Result<Vec<Value>>
    where
        F: FnMut(Option<&Cursor>) -> RequestDescriptor + Send,
    {
        self.accumulator.reset();
        self.pages_fetched = 0;

        match self.fetch_all(&mut request_for).await {
            Ok(()) => Ok(self.accumulator.take()),
            Err(e) => {
                self.accumulator.reset();
                Err(e)
            }
        }
    }

    async fn fetch_all<F>(&mut self, request_for: &mut F) -> Result<()>
    where
        F: FnMut(Option<&Cursor>) -> RequestDescriptor + Send,
    {
        let mut cursor = self.config.start_cursor.clone();

        loop {
            if self.pages_fetched >= self.config.max_pages {
                warn!(
                    "Feed still has more items after {} pages, giving up",
                    self.pages_fetched
                );
                return Err(Error::MaxPagesExceeded {
                    max_pages: self.config.max_pages,
                });
            }

            let request = request_for(cursor.as_ref());
            let body = self.client.get_json(&request).await?;
            self.pages_fetched += 1;

            let page = self.paginator.read_page(body)?;
            let page_len = page.items.len();
            debug!(
                "Page {}: {} items, more available: {}",
                self.pages_fetched, page_len, page.more_available
            );
            self.accumulator.extend(page.items);

            if let Some(limit) = self.config.limit {
                if self.accumulator.len() >= limit {
                    self.accumulator.truncate(limit);
                    debug!("Reached limit of {limit} items");
                    return Ok(());
                }
            }

            if !page.more_available {
                return Ok(());
            }

            if page_len == 0 {
                warn!("Page {} was empty but claims more items, stopping", self.pages_fetched);
                return Ok(());
            }

            cursor = match self
                .accumulator
                .last()
                .and_then(|item| self.paginator.cursor_of(item))
            {
                Some(next) => Some(next),
                None => {
                    warn!(
                        "Last item has no '{}' cursor value, stopping",
                        self.paginator.cursor_param()
                    );
                    return Ok(());
                }
            };
        }
    }
}

impl std::fmt::Debug for CursorAggregator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorAggregator")
            .field("config", &self.config)
            .field("collected", &self.accumulator.len())
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
