//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the aggregator.

use crate::error::Result;
use serde_json::Value;
use std::fmt;

/// Default upper bound on the number of pages one aggregation may request
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Opaque position in a feed, taken from the last item seen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Cursor from a JSON id, which may be a number or a string
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// The raw cursor value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One decoded page of a feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Items on this page, in feed order
    pub items: Vec<Value>,
    /// Continuation signal: the server has more items after this page
    pub more_available: bool,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<Value>, more_available: bool) -> Self {
        Self {
            items,
            more_available,
        }
    }
}

/// Ordered, append-only collection of the items of one aggregation
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    items: Vec<Value>,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything collected so far
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Append a page worth of items
    pub fn extend(&mut self, items: Vec<Value>) {
        self.items.extend(items);
    }

    /// Keep only the first `len` items
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Number of items collected
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recently appended item
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Take the collected items, leaving the accumulator empty
    pub fn take(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.items)
    }
}

/// Per-invocation settings of an aggregation
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Cursor for the very first request, if the caller supplied one
    pub start_cursor: Option<Cursor>,
    /// Stop once this many items have been collected
    pub limit: Option<usize>,
    /// Refuse to request more than this many pages
    pub max_pages: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            start_cursor: None,
            limit: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl AggregationConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the given cursor
    #[must_use]
    pub fn with_start_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.start_cursor = cursor;
        self
    }

    /// Limit the number of items
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page guard
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Knows how a feed encodes its pages
pub trait Paginator: Send + Sync {
    /// Query parameter that carries the cursor
    fn cursor_param(&self) -> &str;

    /// Split a response body into items and the continuation signal
    fn read_page(&self, body: Value) -> Result<Page>;

    /// Cursor that resumes the feed after `item`
    fn cursor_of(&self, item: &Value) -> Option<Cursor>;
}

/// Look up a dotted path (`meta.older_available`) in a JSON value
pub(crate) fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .try_fold(value, |current, part| match current {
            Value::Object(map) => map.get(part),
            _ => None,
        })
}
