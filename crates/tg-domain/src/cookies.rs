//! Cookie value codec
//!
//! The `auth-storage` envelope travels URL-encoded; every other mirrored
//! value is written raw. Raw `Cookie` headers built or read outside a
//! cookie-aware HTTP stack go through these functions.

use crate::constants::AUTH_STORAGE_KEY;

/// Encode a credential value for a cookie named `key`
pub fn encode_cookie_value(key: &str, value: &str) -> String {
    if key == AUTH_STORAGE_KEY {
        urlencoding::encode(value).into_owned()
    } else {
        value.to_string()
    }
}

/// Decode a cookie value; `None` when the value is empty or undecodable
pub fn decode_cookie_value(key: &str, raw: &str) -> Option<String> {
    let value = if key == AUTH_STORAGE_KEY {
        urlencoding::decode(raw).ok()?.into_owned()
    } else {
        raw.to_string()
    };
    (!value.is_empty()).then_some(value)
}

/// Render a `Cookie` request header from decoded `(key, value)` pairs
pub fn cookie_header<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, encode_cookie_value(key, value)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a `Cookie` request header into decoded `(key, value)` pairs
///
/// Pairs without `=` and values that fail to decode are skipped.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (key, raw) = pair.trim().split_once('=')?;
            let key = key.trim();
            decode_cookie_value(key, raw.trim()).map(|value| (key.to_string(), value))
        })
        .collect()
}
