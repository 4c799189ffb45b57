//! Decoding of fetched bytes into text.
//!
//! A non-UTF-8 `charset=` in the Content-Type header wins; otherwise the
//! body is read as UTF-8, falling back to Latin-1 when that fails.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::debug;

/// Decode a response body. Returns `None` only for an empty body.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    if let Some(encoding) = content_type.and_then(charset_from_content_type) {
        if encoding != UTF_8 {
            let (decoded, _, _) = encoding.decode(bytes);
            return Some(decoded.into_owned());
        }
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(strip_utf8_bom(bytes)) {
        Some(text) => Some(text.into_owned()),
        None => {
            debug!("Body is not valid UTF-8, decoding as Latin-1");
            // encoding_rs treats the latin1 label as windows-1252, its superset
            let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Some(decoded.into_owned())
        }
    }
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// e.g. "text/html; charset=iso-8859-1" -> Some(WINDOWS_1252)
fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let lower = content_type.to_ascii_lowercase();
    let charset = lower
        .split("charset=")
        .nth(1)?
        .trim_start_matches('"')
        .split(['"', ';', ',', ' '])
        .next()?
        .trim();

    if charset.is_empty() {
        return None;
    }
    Encoding::for_label(charset.as_bytes())
}
