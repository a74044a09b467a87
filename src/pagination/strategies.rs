//! Pagination strategy implementations

use super::types::{lookup, Cursor, Page, Paginator};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination driven by the id of the last item
///
/// The response carries its items in an array field and a boolean flag saying
/// whether older items exist. The next request passes the id of the last
/// item collected so far, e.g. Yammer's `?older_than=5611239081`.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Field holding the page's items
    pub items_field: String,
    /// Field of an item used as the next cursor
    pub id_field: String,
    /// Dotted path to the continuation flag
    pub more_path: String,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(
        cursor_param: impl Into<String>,
        items_field: impl Into<String>,
        id_field: impl Into<String>,
        more_path: impl Into<String>,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            items_field: items_field.into(),
            id_field: id_field.into(),
            more_path: more_path.into(),
        }
    }

    /// Yammer message feeds: `messages`, `meta.older_available`, `older_than`
    pub fn yammer_messages() -> Self {
        Self::new("older_than", "messages", "id", "meta.older_available")
    }
}

impl Paginator for CursorPaginator {
    fn cursor_param(&self) -> &str {
        &self.cursor_param
    }

    fn read_page(&self, body: Value) -> Result<Page> {
        // Only a literal `true` continues the feed
        let more_available = matches!(lookup(&body, &self.more_path), Some(Value::Bool(true)));

        let items = match body {
            Value::Object(mut map) => match map.remove(&self.items_field) {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(Error::decode(format!(
                        "'{}' is not an array",
                        self.items_field
                    )))
                }
            },
            _ => return Err(Error::decode("Expected a JSON object page")),
        };

        Ok(Page::new(items, more_available))
    }

    fn cursor_of(&self, item: &Value) -> Option<Cursor> {
        item.get(&self.id_field).and_then(Cursor::from_value)
    }
}
