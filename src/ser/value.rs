//! Textual forms of primitive values, before percent-encoding.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::value::{Kind, Value};

/// Returns the raw textual form of a primitive, or `None` for anything the
/// [`Kind`] discriminator does not classify as primitive.
pub fn primitive_text(value: &Value) -> Option<String> {
    if value.kind() != Kind::Primitive {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(*n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Date(d) => Some(date_to_string(d)),
        _ => None,
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2020-01-02T03:04:05.000Z`.
pub fn date_to_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a finite number the way ECMAScript's `Number::toString` does.
///
/// Integers print without a fractional part and negative zero prints as `0`.
/// Beyond 2^53 only the shortest round-trip digits are kept, padded with
/// zeros. Exponent notation is used below `1e-6` and from `1e21` upwards,
/// with an explicit `+` on positive exponents.
pub fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        return "0".to_owned();
    }
    let magnitude = n.abs();
    if n.fract() == 0.0 && magnitude < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        let int = n as i64;
        let mut buffer = itoa::Buffer::new();
        return buffer.format(int).to_owned();
    }
    if (1e-6..1e21).contains(&magnitude) {
        // shortest round-trip digits, never in exponent form
        return n.to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let formatted = buffer.format_finite(n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{exponent}", mantissa.trim_end_matches(".0"))
        }
        Some((mantissa, exponent)) => format!("{}e{exponent}", mantissa.trim_end_matches(".0")),
        None => formatted.to_owned(),
    }
}
