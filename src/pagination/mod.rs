//! Pagination module
//!
//! # Overview
//!
//! List commands read feeds that are served one page at a time. A
//! [`Paginator`] knows how a feed encodes its items, its continuation signal
//! and the cursor of an item; the [`CursorAggregator`] drives the request loop
//! and enforces the caller's limit and a maximum page count.

mod aggregator;
mod strategies;
mod types;

pub use aggregator::CursorAggregator;
pub use strategies::CursorPaginator;
pub use types::{
    Accumulator, AggregationConfig, Cursor, Page, Paginator, DEFAULT_MAX_PAGES,
};
