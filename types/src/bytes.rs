use std::fmt::Write;

/// Render bytes as lowercase hex, two digits per byte.
///
/// This is the conventional text form of push-notification device tokens.
#[must_use]
pub fn hex_token(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[must_use]
pub fn utf8_string(bytes: &[u8]) -> Option<String> {
    String::from_utf8(bytes.to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use super::{hex_token, utf8_string};

    #[test]
    fn hex_token_pads_each_byte() {
        assert_eq!(hex_token(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
        assert_eq!(hex_token(&[]), "");
    }

    #[test]
    fn utf8_string_rejects_invalid_sequences() {
        assert_eq!(utf8_string("héllo".as_bytes()).as_deref(), Some("héllo"));
        assert_eq!(utf8_string(&[0xff, 0xfe]), None);
    }
}
