//! Parsed command options
//!
//! Options arrive from the command line as text. Values that look like whole
//! numbers are stored as JSON numbers, everything else as strings, and flags
//! as booleans. Commands then check the types they need during validation.

use serde_json::{Map, Number, Value};

/// A parsed set of options, keyed by long flag name (`feedType`, `asAdmin`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(Map<String, Value>);

impl Options {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an option from raw command-line text
    pub fn set_raw(&mut self, name: impl Into<String>, raw: &str) {
        self.set(name, coerce(raw));
    }

    /// Raw value of an option
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether an option was given a meaningful value.
    ///
    /// `null`, `false` and the empty string count as not set.
    pub fn is_set(&self, name: &str) -> bool {
        match self.0.get(name) {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Boolean flag value
    pub fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Option value rendered as text (numbers included)
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether the option holds a number
    pub fn is_number(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(Value::Number(_)))
    }

    /// Option value as an unsigned integer
    pub fn u64(&self, name: &str) -> Option<u64> {
        self.0.get(name).and_then(Value::as_u64)
    }

    /// Names of all options present
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Value> for Options {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Interpret command-line text the way the option parser does.
///
/// Only canonical integers become numbers, so `007` or `1e3` stay text.
pub fn coerce(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<u64>() {
        if n.to_string() == raw {
            return Value::Number(Number::from(n));
        }
    }
    if let Ok(n) = raw.parse::<i64>() {
        if n.to_string() == raw {
            return Value::Number(Number::from(n));
        }
    }
    Value::String(raw.to_string())
}
