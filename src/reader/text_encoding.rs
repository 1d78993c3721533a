//! Text encodings for length-prefixed strings.

/// Encoding of the bytes following a length prefix.
///
/// Decoding is lossy: malformed sequences become U+FFFD rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 (the default).
    #[default]
    Utf8,
    /// UTF-16, least-significant byte of each code unit first.
    Utf16Le,
    /// UTF-16, most-significant byte of each code unit first.
    Utf16Be,
    /// ISO-8859-1: every byte is its own code point.
    Latin1,
    /// 7-bit ASCII; bytes above `0x7F` become U+FFFD.
    Ascii,
}

impl TextEncoding {
    /// Decodes `bytes` into a string.
    ///
    /// For the UTF-16 encodings a dangling odd byte is decoded as U+FFFD.
    ///
    /// # Example
    /// ```
    /// use bytefield::reader::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::Utf16Le.decode(&[0x48, 0x00, 0x69, 0x00]), "Hi");
    /// assert_eq!(TextEncoding::Latin1.decode(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    /// ```
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            TextEncoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();

    let mut text: String = char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_lossy() {
        assert_eq!(TextEncoding::Utf8.decode("grüß".as_bytes()), "grüß");
        assert_eq!(TextEncoding::Utf8.decode(&[0x61, 0xFF, 0x62]), "a\u{FFFD}b");
    }

    #[test]
    fn test_utf16_both_orders() {
        assert_eq!(TextEncoding::Utf16Be.decode(&[0x00, 0x4F, 0x00, 0x4B]), "OK");
        // surrogate pair for U+1F600
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x3D, 0xD8, 0x00, 0xDE]), "\u{1F600}");
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x41, 0x00, 0x42]), "A\u{FFFD}");
    }

    #[test]
    fn test_single_byte_encodings() {
        assert_eq!(TextEncoding::Latin1.decode(&[0xC4, 0x70]), "Äp");
        assert_eq!(TextEncoding::Ascii.decode(&[0x4F, 0x80, 0x4B]), "O\u{FFFD}K");
    }
}
