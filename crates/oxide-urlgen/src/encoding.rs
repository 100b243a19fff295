//! Percent-encoding of URL components.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left alone when encoding a URL component:
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes a URL component, escaping everything but unreserved marks.
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Encodes a path segment value. Slashes stay literal.
#[must_use]
pub fn encode_path_value(input: &str) -> String {
    encode_component(input).replace("%2F", "/")
}
