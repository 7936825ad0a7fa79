//! Byte-exact conversion between `midicsv` output and Rust strings.
//!
//! `midicsv` writes text meta events (lyrics, titles, markers) as the raw
//! bytes stored in the MIDI file, usually ISO-8859-1 and never guaranteed to
//! be UTF-8. Each byte is mapped to the char with the same code point, so
//! decoding never fails and encoding restores the original bytes.

/// Map every byte to the char with the same code point.
pub fn decode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`decode_bytes`].
///
/// Chars above U+00FF cannot come from `decode_bytes`; they are written as
/// UTF-8 rather than dropped.
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => out.push(b),
            Err(_) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out
}
