//! Query-string parsing and percent-encoding.

use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Bytes escaped in a URL query or fragment. Everything outside the set of
/// unreserved characters, sub-delims, `:`, `@`, `/` and `?`.
const QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

const PATH: &AsciiSet = &QUERY.add(b'?').add(b';');

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which characters survive [`encode_url`] unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlCharset {
    #[default]
    Fragment,
    Query,
    Path,
    /// Only unreserved characters; suitable for a single key or value.
    Component,
}

impl UrlCharset {
    const fn escaped(self) -> &'static AsciiSet {
        match self {
            Self::Fragment | Self::Query => QUERY,
            Self::Path => PATH,
            Self::Component => COMPONENT,
        }
    }
}

fn decode_or_raw(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_string(), Cow::into_owned)
}

/// Parse `a=1&b=two` into a map.
///
/// Pairs without exactly one `=` are skipped. Keys and values are
/// percent-decoded, falling back to the raw text when the decoded bytes are
/// not UTF-8. A repeated key keeps its last value.
#[must_use]
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    let mut query = BTreeMap::new();
    for pair in raw.split('&') {
        let mut parts = pair.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        query.insert(decode_or_raw(key), decode_or_raw(value));
    }
    query
}

#[must_use]
pub fn encode_url_query(raw: &str) -> String {
    encode_url(raw, UrlCharset::Query)
}

#[must_use]
pub fn encode_url(raw: &str, charset: UrlCharset) -> String {
    utf8_percent_encode(raw, charset.escaped()).to_string()
}
