//! Parsing querystrings into flat records of strings.
//!
//! The output is deliberately lossy with respect to whatever produced the
//! querystring: every value comes back as a string, and a key that appears
//! more than once comes back as the list of its values in order of
//! appearance. No attempt is made to recover numbers, booleans or nested
//! arrays.

mod decode;

pub use decode::decode;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::value::Value;

/// A parsed querystring, keyed in order of first appearance.
pub type ParsedQuery = IndexMap<String, ParsedValue>;

/// The value(s) recorded for a single key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedValue {
    /// The key appeared once.
    One(String),
    /// The key appeared more than once; values are in order of appearance.
    Many(Vec<String>),
}

impl ParsedValue {
    /// The value when the key appeared exactly once.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// All values for the key, in order of appearance.
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    fn push(&mut self, value: String) {
        match self {
            Self::One(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(values) => values.push(value),
        }
    }
}

impl From<ParsedValue> for Value {
    fn from(value: ParsedValue) -> Self {
        match value {
            ParsedValue::One(s) => Self::String(s),
            ParsedValue::Many(values) => Self::Array(values.into_iter().map(Self::String).collect()),
        }
    }
}

impl From<&str> for ParsedValue {
    fn from(s: &str) -> Self {
        Self::One(s.to_owned())
    }
}

impl<const N: usize> From<[&str; N]> for ParsedValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// Parses a querystring, with or without its leading `?`.
///
/// The input is split on `?` and `&`, and each piece on its first `=`.
/// Pieces without an `=` contribute nothing. Keys are kept verbatim; values
/// are percent-decoded. Parsing never fails.
///
/// ```
/// use fetch_qs::{ParsedValue, parse};
///
/// let parsed = parse("?a=one&a=two&b=three");
/// assert_eq!(parsed["a"], ParsedValue::from(["one", "two"]));
/// assert_eq!(parsed["b"].as_str(), Some("three"));
/// ```
pub fn parse(search: &str) -> ParsedQuery {
    let mut record = ParsedQuery::new();
    for pair in search.split(['?', '&']) {
        let Some((key, value)) = pair.split_once('=') else {
            if !pair.is_empty() {
                tracing::trace!(pair, "querystring pair has no value, skipping");
            }
            continue;
        };
        let value = decode(value).into_owned();
        match record.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(ParsedValue::One(value));
            }
        }
    }
    record
}
