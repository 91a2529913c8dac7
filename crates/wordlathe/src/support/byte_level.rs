//! # Byte-Level Alphabet
//!
//! A bijection between the 256 byte values and printable characters, so
//! arbitrary bytes survive as JSON-safe vocabulary text.
//!
//! * Bytes ``33..=126``, ``161..=172`` and ``174..=255`` map to themselves.
//! * The remaining 68 bytes map, in order, to ``U+0100..=U+0143``.

use std::sync::LazyLock;

use crate::types::{WLHashMap, hash_map_with_capacity};

const fn is_direct_byte(b: usize) -> bool {
    (b >= 33 && b <= 126) || (b >= 161 && b <= 172) || b >= 174
}

const fn build_byte_to_char() -> [char; 256] {
    let mut table = ['\0'; 256];
    let mut next = 256u32;
    let mut b = 0usize;
    while b < 256 {
        let cp = if is_direct_byte(b) {
            b as u32
        } else {
            next += 1;
            next - 1
        };
        table[b] = match char::from_u32(cp) {
            Some(c) => c,
            None => '\0',
        };
        b += 1;
    }
    table
}

/// Byte to character table.
pub static BYTE_TO_CHAR: [char; 256] = build_byte_to_char();

/// Character to byte table; the inverse of [`BYTE_TO_CHAR`].
pub static CHAR_TO_BYTE: LazyLock<WLHashMap<char, u8>> = LazyLock::new(|| {
    let mut map = hash_map_with_capacity(256);
    for (b, &c) in BYTE_TO_CHAR.iter().enumerate() {
        map.insert(c, b as u8);
    }
    map
});

/// Map the UTF-8 bytes of `text` through [`BYTE_TO_CHAR`].
pub fn byte_level_encode(text: &str) -> String {
    text.bytes().map(|b| BYTE_TO_CHAR[b as usize]).collect()
}

/// Append the bytes of byte-level `text` to `buf`.
///
/// If any character of `text` is outside the alphabet, none are mapped:
/// the whole of `text` contributes its own UTF-8 bytes.
pub fn byte_level_decode_into(
    text: &str,
    buf: &mut Vec<u8>,
) {
    let start = buf.len();
    for c in text.chars() {
        match CHAR_TO_BYTE.get(&c) {
            Some(&b) => buf.push(b),
            None => {
                buf.truncate(start);
                buf.extend_from_slice(text.as_bytes());
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_bijective() {
        assert_eq!(CHAR_TO_BYTE.len(), 256);
        assert_eq!(BYTE_TO_CHAR[b'!' as usize], '!');
        assert_eq!(BYTE_TO_CHAR[0], '\u{100}');
        assert_eq!(BYTE_TO_CHAR[b' ' as usize], 'Ġ');
        assert_eq!(BYTE_TO_CHAR[b'\n' as usize], 'Ċ');
        assert_eq!(BYTE_TO_CHAR[173], '\u{143}');
    }

    #[test]
    fn test_encode_decode() {
        let text = "Hi 你好\n";
        let encoded = byte_level_encode(text);
        assert_eq!(encoded, "HiĠä½łå¥½Ċ");

        let mut buf = Vec::new();
        byte_level_decode_into(&encoded, &mut buf);
        assert_eq!(String::from_utf8(buf).unwrap(), text);
    }

    #[test]
    fn test_foreign_characters_keep_the_whole_text() {
        let mut buf = b"a".to_vec();
        byte_level_decode_into("Ġ\u{65e5}", &mut buf);
        assert_eq!(String::from_utf8(buf).unwrap(), "aĠ\u{65e5}");

        let mut buf = Vec::new();
        byte_level_decode_into("\u{65e5}", &mut buf);
        byte_level_decode_into("Ġx", &mut buf);
        assert_eq!(String::from_utf8(buf).unwrap(), "\u{65e5} x");
    }
}
