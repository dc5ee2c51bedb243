//! Text encodings for the show-text operators.
//!
//! Converts character codes into the operand syntax of `Tj` / `TJ`:
//! escaped literal strings for single-byte fonts and hex strings for
//! composite and custom-encoded fonts.

/// WinAnsi (Windows-1252) encoding table.
///
/// Maps Unicode codepoints to WinAnsi byte values. The range 0x80-0x9F
/// differs from Latin-1.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Append the escaped form of a single-byte code to a literal string body.
///
/// `\r \n \t \b \f` use their mnemonic escapes, `( ) \` are backslash
/// escaped, remaining control codes are written as three-digit octal and
/// everything else is copied as-is.
pub fn push_escaped_byte(out: &mut Vec<u8>, b: u8) {
    match b {
        b'\r' => out.extend_from_slice(b"\\r"),
        b'\n' => out.extend_from_slice(b"\\n"),
        b'\t' => out.extend_from_slice(b"\\t"),
        0x08 => out.extend_from_slice(b"\\b"),
        0x0C => out.extend_from_slice(b"\\f"),
        b'(' => out.extend_from_slice(b"\\("),
        b')' => out.extend_from_slice(b"\\)"),
        b'\\' => out.extend_from_slice(b"\\\\"),
        0..=7 => out.extend_from_slice(format!("\\00{:o}", b).as_bytes()),
        8..=31 => out.extend_from_slice(format!("\\0{:o}", b).as_bytes()),
        _ => out.push(b),
    }
}

/// Encode single-byte codes as a PDF literal string body (without parentheses).
pub fn escape_literal(codes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len() + 8);
    for &b in codes {
        push_escaped_byte(&mut out, b);
    }
    out
}

/// Format each code as its own hex string, `digits` wide: `<0048><0069>`.
pub fn encode_hex_codes(codes: &[u32], digits: usize) -> String {
    let mut result = String::with_capacity(codes.len() * (digits + 2));
    for code in codes {
        result.push_str(&format!("<{:0width$X}>", code, width = digits));
    }
    result
}
