//! Uppercase subtractive roman numerals, 1 through 3999.

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Largest value with a standard representation.
pub const MAX: u32 = 3999;

/// Format `value`, or `None` outside `1..=3999`.
///
/// ```
/// assert_eq!(pdf_compose::layout::roman::format(1994).as_deref(), Some("MCMXCIV"));
/// assert_eq!(pdf_compose::layout::roman::format(0), None);
/// ```
pub fn format(value: u32) -> Option<String> {
    if !(1..=MAX).contains(&value) {
        return None;
    }
    let mut remaining = value;
    let mut out = String::new();
    for (amount, symbol) in NUMERALS {
        while remaining >= amount {
            out.push_str(symbol);
            remaining -= amount;
        }
    }
    Some(out)
}

/// Parse a canonical uppercase numeral.
///
/// Non-canonical spellings such as `IIII` or `IC` are rejected, so
/// `parse(&format(n)?) == Some(n)` holds and nothing else parses.
pub fn parse(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let mut rest = text;
    let mut value = 0;
    for (amount, symbol) in NUMERALS {
        while let Some(tail) = rest.strip_prefix(symbol) {
            value += amount;
            rest = tail;
        }
    }
    if !rest.is_empty() {
        return None;
    }
    format(value).filter(|canonical| canonical == text).map(|_| value)
}
