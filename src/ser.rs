//! Serialization of flat mappings into querystrings.

mod encode;
mod value;

pub use encode::encode;
pub(crate) use value::date_to_string;
pub use value::number_to_string;

pub(crate) use value::primitive_text;

use crate::value::{Kind, Map, Value};

/// Serializes a single value, or an array of values, into its
/// percent-encoded textual form.
///
/// Primitives (strings, finite numbers, booleans, dates) are rendered and
/// percent-encoded. An array renders each primitive element, percent-encodes
/// each one on its own and joins them with `,`, so a literal comma inside an
/// element shows up as `%2C` and never as a delimiter. Elements that are not
/// primitives (`null`, maps, nested arrays) are dropped. Everything else
/// yields `None`.
///
/// ```
/// use fetch_qs::{Value, get_serialized_value};
/// use serde_json::json;
///
/// let value = Value::from(json!(["a", null, "b,c", true, {}, 4]));
/// assert_eq!(get_serialized_value(&value).as_deref(), Some("a,b%2Cc,true,4"));
/// assert_eq!(get_serialized_value(&Value::from(json!({}))), None);
/// ```
pub fn get_serialized_value(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(encoded_primitive)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => encoded_primitive(value),
    }
}

fn encoded_primitive(value: &Value) -> Option<String> {
    let text = primitive_text(value)?;
    Some(encode(&text).into_owned())
}

/// Serializes the top level keys of a mapping into a querystring.
///
/// Arrays become repeated `key=value` pairs, one per serializable element.
/// Nullish values and values with no serializable content are skipped. The
/// output starts with `?` only when at least one pair was written, so an
/// empty mapping yields the empty string.
///
/// Each array element goes through [`get_serialized_value`] and is then
/// percent-encoded once more. An array of arrays therefore collapses into
/// comma-joined strings, and parsing the output back gives a flat list of
/// strings rather than the original nested arrays.
///
/// ```
/// use fetch_qs::{map_from_json, stringify};
/// use serde_json::json;
///
/// let query = map_from_json(json!({ "a": "hello", "b": 5, "c": true }));
/// assert_eq!(stringify(&query), "?a=hello&b=5&c=true");
///
/// let query = map_from_json(json!({ "a": ["one", "two"], "b": "three" }));
/// assert_eq!(stringify(&query), "?a=one&a=two&b=three");
///
/// let query = map_from_json(json!({ "sort": [["one", 1], ["two", -1]], "b": "three" }));
/// assert_eq!(stringify(&query), "?sort=one%2C1&sort=two%2C-1&b=three");
/// ```
pub fn stringify(query: &Map) -> String {
    let mut writer = PairWriter::new(String::with_capacity(64));
    for (key, value) in query {
        match value.kind() {
            Kind::Array => {
                let Value::Array(items) = value else {
                    continue;
                };
                let mut written = 0usize;
                for item in items {
                    if let Some(serialized) = get_serialized_value(item) {
                        writer.write_pair(key, &encode(&serialized));
                        written += 1;
                    }
                }
                if written == 0 {
                    tracing::trace!(key = %key, "array has no serializable element, skipping");
                }
            }
            Kind::Unsupported if value.is_null() => {}
            _ => match get_serialized_value(value) {
                Some(serialized) => writer.write_pair(key, &serialized),
                None => tracing::trace!(key = %key, "unsupported query value, skipping"),
            },
        }
    }
    writer.finish()
}

/// Accumulates `key=value` pairs, inserting `?` before the first pair and
/// `&` between the rest.
struct PairWriter {
    output: String,
    first_kv: bool,
}

impl PairWriter {
    const fn new(output: String) -> Self {
        Self {
            output,
            first_kv: true,
        }
    }

    /// Writes a pair; the key is percent-encoded, the value must already be.
    fn write_pair(&mut self, key: &str, encoded_value: &str) {
        self.output.push(if self.first_kv { '?' } else { '&' });
        self.first_kv = false;
        self.output.push_str(&encode(key));
        self.output.push('=');
        self.output.push_str(encoded_value);
    }

    fn finish(self) -> String {
        self.output
    }
}
