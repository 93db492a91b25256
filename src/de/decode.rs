use std::borrow::Cow;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).and_then(|d| u8::try_from(d).ok())
}

/// Percent-decodes a querystring value into a UTF-8 string.
///
/// Unlike form decoding, `+` is kept as a literal plus sign. A `%` that is
/// not followed by two hex digits is left in place, and byte sequences that
/// do not form valid UTF-8 are replaced with U+FFFD, so decoding never
/// fails.
pub fn decode(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    if !bytes.contains(&b'%') {
        return Cow::Borrowed(input);
    }

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        let b = bytes[idx];
        if b == b'%' {
            if let (Some(h), Some(l)) = (
                bytes.get(idx + 1).copied().and_then(char_to_digit),
                bytes.get(idx + 2).copied().and_then(char_to_digit),
            ) {
                decoded.push(h * 0x10 + l);
                idx += 3;
                continue;
            }
        }
        decoded.push(b);
        idx += 1;
    }

    match String::from_utf8(decoded) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}
