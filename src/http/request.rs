//! Request descriptors
//!
//! A [`RequestDescriptor`] is everything needed to issue one call: the
//! endpoint, ordered query parameters and headers. No command sends a body.
//! Query parameters keep their insertion order so that generated URLs are
//! stable and easy to assert on.

use url::form_urlencoded;

/// Description of a single HTTP request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Absolute URL, or a path resolved against the client's base URL
    pub url: String,
    /// Query parameters, in the order they are appended
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Create a descriptor for the given URL or path
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter when a value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// The URL with its query string.
    ///
    /// The first parameter is joined with `?` unless the URL already carries a
    /// query (e.g. `?api-version=...`), every other one with `&`.
    pub fn url_with_query(&self) -> String {
        let mut url = self.url.clone();
        for (key, value) in &self.query {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.extend(form_urlencoded::byte_serialize(key.as_bytes()));
            url.push('=');
            url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }
        url
    }
}
