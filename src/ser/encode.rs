use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// The characters `encodeURIComponent` leaves untouched are the ASCII
/// alphanumerics plus `-_.!~*'()`.
///
/// Everything else, including the querystring delimiters `&`, `=`, `?`,
/// `#`, the comma and the space, is percent-encoded. Spaces become `%20`,
/// never `+`.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a key or value for use in a querystring.
///
/// Borrows the input when nothing needs escaping.
pub fn encode(input: &str) -> Cow<'_, str> {
    percent_encoding::utf8_percent_encode(input, URI_COMPONENT_SET).into()
}
