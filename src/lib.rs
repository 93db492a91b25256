//! Flat querystrings, defaults merging and a typed fetch wrapper.
//!
//! This library provides the small utilities that sit in front of an HTTP
//! fetch call:
//!
//! - a querystring codec ([`stringify`], [`parse`], [`get_serialized_value`])
//!   for flat mappings of strings, numbers, booleans, dates and arrays;
//! - a defaults merger ([`defaults`], [`defaults_deep`]) used to compose
//!   option objects;
//! - a thin wrapper ([`fetch_typed`], [`Config::fetch`]) that composes both
//!   with a caller-supplied [`Transport`].
//!
//! ## Supported Types
//!
//! Only the **top level** keys of a query mapping are serialized. Values may
//! be strings, finite numbers, booleans, dates or arrays of those. Nested
//! maps, `null` and non-finite numbers are dropped silently; the codec never
//! returns an error.
//!
//! Querystrings produced by [`stringify`] do not round-trip through
//! [`parse`]: every parsed value is a string, repeated keys become lists,
//! and arrays of arrays come back as comma-joined strings.
//!
//! ## Usage
//!
//! ```
//! use fetch_qs::{ParsedValue, map_from_json, parse, stringify};
//! use serde_json::json;
//!
//! let query = map_from_json(json!({
//!     "name": "Acme",
//!     "id": 42,
//!     "user_ids": [1, 2, 3],
//!     "address": { "city": "Carrot City" },
//! }));
//! let qs = stringify(&query);
//! assert_eq!(qs, "?name=Acme&id=42&user_ids=1&user_ids=2&user_ids=3");
//!
//! let parsed = parse(&qs);
//! assert_eq!(parsed["id"], ParsedValue::from("42"));
//! assert_eq!(parsed["user_ids"], ParsedValue::from(["1", "2", "3"]));
//! assert!(!parsed.contains_key("address"));
//! ```

mod config;
mod de;
mod defaults;
mod error;
mod fetch;
mod ser;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{ParsedQuery, ParsedValue, decode, parse};
#[doc(inline)]
pub use defaults::{defaults, defaults_deep};
pub use error::{Error, Result};
#[doc(inline)]
pub use fetch::{FetchResponse, Transport, fetch_typed};
#[doc(inline)]
pub use ser::{encode, get_serialized_value, number_to_string, stringify};
#[doc(inline)]
pub use value::{Kind, Map, Value, map_from_json};
