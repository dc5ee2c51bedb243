//! Page content streams.
//!
//! [`ContentStream`] holds a page's decoded drawing program and
//! [`ContentStreamWriter`] is the only way bytes get into it. Operators are
//! described by [`ContentStreamOp`] and encoded according to
//! ISO 32000-1:2008 Sections 8-9, one operator per line.

use crate::fonts::encoding::push_escaped_byte;
use std::io::Write;

/// The content-stream operators the layout engine emits.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f64),
    /// Set text matrix (Tm)
    SetTextMatrix(f64, f64, f64, f64, f64, f64),
    /// Show a literal string (Tj); bytes are escaped on output
    ShowText(Vec<u8>),
    /// Show text with positioning (TJ)
    ShowTextArray(Vec<TextArrayItem>),
    /// Set character spacing (Tc)
    SetCharacterSpacing(f64),
    /// Set word spacing (Tw)
    SetWordSpacing(f64),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f64, f64, f64),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f64, f64, f64),
    /// Set line width (w)
    SetLineWidth(f64),
    /// Set dash pattern (d)
    SetDashPattern(Vec<f64>, f64),
    /// Move to (m)
    MoveTo(f64, f64),
    /// Line to (l)
    LineTo(f64, f64),
    /// Rectangle (re)
    Rectangle(f64, f64, f64, f64),
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Fill and stroke (B)
    FillStroke,

    // === Marked Content Operations ===
    /// `BDC` with an MCID property list
    BeginMarkedContentDict {
        /// The tag/structure type (e.g., "P" for paragraph, "LI" for list item)
        tag: String,
        /// Marked-content identifier
        mcid: u32,
        /// Alternate description
        alt: Option<String>,
    },
    /// End marked content (EMC)
    EndMarkedContent,
}

/// Items in a TJ array.
#[derive(Debug, Clone, PartialEq)]
pub enum TextArrayItem {
    /// Literal string bytes, escaped on output
    Text(Vec<u8>),
    /// Hex string(s), already formatted as `<XXXX>...`
    HexText(String),
    /// Positioning adjustment in thousandths of text space
    Adjustment(f64),
}

/// A page's decoded content bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStream {
    decoded_bytes: Vec<u8>,
    in_text_object: bool,
}

impl ContentStream {
    /// Create an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded bytes.
    pub fn decoded_bytes(&self) -> &[u8] {
        &self.decoded_bytes
    }

    /// Content as text, one byte per character (Latin-1).
    pub fn to_latin1_string(&self) -> String {
        self.decoded_bytes.iter().map(|&b| b as char).collect()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.decoded_bytes.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.decoded_bytes.is_empty()
    }

    /// Check that `q`/`Q`, `BT`/`ET` and `BDC`/`EMC` pair up.
    ///
    /// String operands are skipped, so parentheses or operator names inside
    /// shown text do not count.
    pub fn is_balanced(&self) -> bool {
        let mut graphics = 0i64;
        let mut text = 0i64;
        let mut marked = 0i64;
        for token in operator_tokens(&self.decoded_bytes) {
            match token {
                b"q" => graphics += 1,
                b"Q" => graphics -= 1,
                b"BT" => text += 1,
                b"ET" => text -= 1,
                b"BDC" | b"BMC" => marked += 1,
                b"EMC" => marked -= 1,
                _ => {},
            }
            if graphics < 0 || text < 0 || marked < 0 || text > 1 {
                return false;
            }
        }
        graphics == 0 && text == 0 && marked == 0
    }
}

/// Split content bytes into bare tokens, skipping string and dictionary
/// delimiters.
fn operator_tokens(bytes: &[u8]) -> Vec<&[u8]> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'(' => {
                let mut depth = 1;
                i += 1;
                while i < bytes.len() && depth > 0 {
                    match bytes[i] {
                        b'\\' => i += 1,
                        b'(' => depth += 1,
                        b')' => depth -= 1,
                        _ => {},
                    }
                    i += 1;
                }
            },
            b'<' if bytes.get(i + 1) == Some(&b'<') => i += 2,
            b'>' if bytes.get(i + 1) == Some(&b'>') => i += 2,
            b'<' => {
                while i < bytes.len() && bytes[i] != b'>' {
                    i += 1;
                }
                i += 1;
            },
            b'[' | b']' | b'{' | b'}' | b'>' => i += 1,
            _ if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'(' | b'<' | b'[' | b']' | b'/' | b'>')
                {
                    i += 1;
                }
                if b == b'/' {
                    // Name: consume the slash and its characters, not an operator.
                    i += 1;
                    while i < bytes.len()
                        && !bytes[i].is_ascii_whitespace()
                        && !matches!(bytes[i], b'(' | b'<' | b'[' | b']' | b'/' | b'>')
                    {
                        i += 1;
                    }
                } else {
                    tokens.push(&bytes[start..i]);
                }
            },
        }
    }
    tokens
}

/// Format a number operand: at most 7 fractional digits, no trailing zeros.
///
/// # Examples
///
/// ```
/// use pdf_compose::writer::format_number;
///
/// assert_eq!(format_number(12.0), "12");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333");
/// assert_eq!(format_number(-0.00000001), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.7}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Single gateway for appending operators to a [`ContentStream`].
#[derive(Debug)]
pub struct ContentStreamWriter<'a> {
    stream: &'a mut ContentStream,
}

impl<'a> ContentStreamWriter<'a> {
    /// Write into `stream`.
    pub fn new(stream: &'a mut ContentStream) -> Self {
        Self { stream }
    }

    /// Append `\n` unless the stream is empty or already ends with one.
    pub fn append_newline_if_needed(&mut self) -> &mut Self {
        if let Some(&last) = self.stream.decoded_bytes.last() {
            if last != b'\n' {
                self.stream.decoded_bytes.push(b'\n');
            }
        }
        self
    }

    /// Append a space unless the stream is empty or already ends with whitespace.
    pub fn append_space_if_needed(&mut self) -> &mut Self {
        if let Some(&last) = self.stream.decoded_bytes.last() {
            if !last.is_ascii_whitespace() {
                self.stream.decoded_bytes.push(b' ');
            }
        }
        self
    }

    /// Save graphics state (`q`).
    pub fn save_graphics_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state (`Q`).
    pub fn restore_graphics_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Append one operator on its own line.
    ///
    /// A `BT` inside an open text object, or an `ET` outside one, is
    /// dropped with a warning.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        match op {
            ContentStreamOp::BeginText if self.stream.in_text_object => {
                log::warn!("Ignoring BT inside an open text object");
                return self;
            },
            ContentStreamOp::EndText if !self.stream.in_text_object => {
                log::warn!("Ignoring ET without a matching BT");
                return self;
            },
            ContentStreamOp::BeginText => self.stream.in_text_object = true,
            ContentStreamOp::EndText => self.stream.in_text_object = false,
            _ => {},
        }

        self.append_newline_if_needed();
        let out = &mut self.stream.decoded_bytes;
        // Writing into a Vec<u8> cannot fail.
        let _ = write_op(out, &op);
        out.push(b'\n');
        self
    }

    /// Append several operators.
    pub fn ops(&mut self, ops: impl IntoIterator<Item = ContentStreamOp>) -> &mut Self {
        for op in ops {
            self.op(op);
        }
        self
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    let n = |v: &f64| format_number(*v);
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, n(size)),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} Tm", n(a), n(b), n(c), n(d), n(e), n(f))
        },
        ContentStreamOp::ShowText(bytes) => {
            write!(w, "(")?;
            write_escaped_bytes(w, bytes)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::ShowTextArray(items) => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                match item {
                    TextArrayItem::Text(bytes) => {
                        write!(w, "(")?;
                        write_escaped_bytes(w, bytes)?;
                        write!(w, ")")?;
                    },
                    TextArrayItem::HexText(hex) => write!(w, "{}", hex)?,
                    TextArrayItem::Adjustment(adj) => write!(w, "{}", n(adj))?,
                }
            }
            write!(w, "] TJ")
        },
        ContentStreamOp::SetCharacterSpacing(spacing) => write!(w, "{} Tc", n(spacing)),
        ContentStreamOp::SetWordSpacing(spacing) => write!(w, "{} Tw", n(spacing)),
        ContentStreamOp::SetFillColorRGB(r, g, b) => write!(w, "{} {} {} rg", n(r), n(g), n(b)),
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => {
            write!(w, "{} {} {} RG", n(r), n(g), n(b))
        },
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", n(width)),
        ContentStreamOp::SetDashPattern(pattern, phase) => {
            write!(w, "[")?;
            for (i, p) in pattern.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                write!(w, "{}", n(p))?;
            }
            write!(w, "] {} d", n(phase))
        },
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", n(x), n(y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", n(x), n(y)),
        ContentStreamOp::Rectangle(x, y, w_val, h) => {
            write!(w, "{} {} {} {} re", n(x), n(y), n(w_val), n(h))
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::FillStroke => write!(w, "B"),

        // Marked content operations
        ContentStreamOp::BeginMarkedContentDict { tag, mcid, alt } => {
            write!(w, "/{} << /MCID {}", tag, mcid)?;
            if let Some(alt) = alt {
                write!(w, " /Alt (")?;
                write_alt_text(w, alt)?;
                write!(w, ")")?;
            }
            write!(w, " >> BDC")
        },
        ContentStreamOp::EndMarkedContent => write!(w, "EMC"),
    }
}

fn write_escaped_bytes<W: Write>(w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &b in bytes {
        push_escaped_byte(&mut escaped, b);
    }
    w.write_all(&escaped)
}

/// Alternate text as a literal string body. `>` is written in octal so the
/// property list never contains a bare dictionary delimiter.
///
/// Latin-1 text is written byte for byte. Anything wider is written as
/// UTF-16BE with a byte order mark, still as a literal string.
fn write_alt_text<W: Write>(w: &mut W, alt: &str) -> std::io::Result<()> {
    let bytes: Vec<u8> = match alt
        .chars()
        .map(|ch| u8::try_from(u32::from(ch)).ok())
        .collect::<Option<Vec<u8>>>()
    {
        Some(latin1) => latin1,
        None => {
            let mut utf16 = vec![0xFE, 0xFF];
            for unit in alt.encode_utf16() {
                utf16.extend_from_slice(&unit.to_be_bytes());
            }
            utf16
        },
    };
    let mut escaped = Vec::with_capacity(bytes.len());
    for b in bytes {
        if b == b'>' {
            escaped.extend_from_slice(b"\\076");
        } else {
            push_escaped_byte(&mut escaped, b);
        }
    }
    w.write_all(&escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(ops: Vec<ContentStreamOp>) -> String {
        let mut stream = ContentStream::new();
        ContentStreamWriter::new(&mut stream).ops(ops);
        stream.to_latin1_string()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(22.5), "22.5");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(0.123456789), "0.1234568");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_newline_and_space_if_needed() {
        let mut stream = ContentStream::new();
        {
            let mut w = ContentStreamWriter::new(&mut stream);
            w.append_newline_if_needed().append_space_if_needed();
        }
        assert!(stream.is_empty());

        stream.decoded_bytes.extend_from_slice(b"q");
        {
            let mut w = ContentStreamWriter::new(&mut stream);
            w.append_space_if_needed().append_space_if_needed();
        }
        assert_eq!(stream.decoded_bytes(), b"q ");
        {
            let mut w = ContentStreamWriter::new(&mut stream);
            w.append_newline_if_needed().append_newline_if_needed();
        }
        assert_eq!(stream.decoded_bytes(), b"q \n");
    }

    #[test]
    fn test_save_restore() {
        let mut stream = ContentStream::new();
        ContentStreamWriter::new(&mut stream)
            .save_graphics_state()
            .restore_graphics_state();
        assert_eq!(stream.decoded_bytes(), b"q\nQ\n");
        assert!(stream.is_balanced());
    }

    #[test]
    fn test_text_operators() {
        let out = written(vec![
            ContentStreamOp::BeginText,
            ContentStreamOp::SetFillColorRGB(0.0, 0.0, 0.0),
            ContentStreamOp::SetFont("F1".to_string(), 1.0),
            ContentStreamOp::SetTextMatrix(12.0, 0.0, 0.0, 12.0, 100.0, 700.0),
            ContentStreamOp::ShowTextArray(vec![TextArrayItem::HexText(
                "<0048><0069>".to_string(),
            )]),
            ContentStreamOp::EndText,
        ]);
        assert_eq!(out, "BT\n0 0 0 rg\n/F1 1 Tf\n12 0 0 12 100 700 Tm\n[<0048><0069>] TJ\nET\n");
    }

    #[test]
    fn test_literal_show_is_escaped() {
        let out = written(vec![ContentStreamOp::ShowText(b"a(b)\\".to_vec())]);
        assert_eq!(out, "(a\\(b\\)\\\\) Tj\n");
    }

    #[test]
    fn test_path_operators() {
        let out = written(vec![
            ContentStreamOp::SetDashPattern(vec![3.0, 2.0], 0.0),
            ContentStreamOp::Rectangle(10.0, 20.0, 30.5, 40.0),
            ContentStreamOp::FillStroke,
            ContentStreamOp::MoveTo(0.0, 0.0),
            ContentStreamOp::LineTo(5.0, 0.0),
            ContentStreamOp::Stroke,
        ]);
        assert_eq!(out, "[3 2] 0 d\n10 20 30.5 40 re\nB\n0 0 m\n5 0 l\nS\n");
    }

    #[test]
    fn test_marked_content_dict() {
        let out = written(vec![
            ContentStreamOp::BeginMarkedContentDict {
                tag: "P".to_string(),
                mcid: 1,
                alt: None,
            },
            ContentStreamOp::EndMarkedContent,
            ContentStreamOp::BeginMarkedContentDict {
                tag: "LI".to_string(),
                mcid: 2,
                alt: Some("a > b".to_string()),
            },
            ContentStreamOp::EndMarkedContent,
        ]);
        assert_eq!(
            out,
            "/P << /MCID 1 >> BDC\nEMC\n/LI << /MCID 2 /Alt (a \\076 b) >> BDC\nEMC\n"
        );
    }

    #[test]
    fn test_wide_alt_text_is_utf16() {
        let out = written(vec![ContentStreamOp::BeginMarkedContentDict {
            tag: "Figure".to_string(),
            mcid: 3,
            alt: Some("a\u{2192}>".to_string()),
        }]);
        // FE FF, then 0061 2192 003E with control and '>' bytes in octal
        assert_eq!(
            out,
            "/Figure << /MCID 3 /Alt (\u{fe}\u{ff}\\000a!\u{92}\\000\\076) >> BDC\n"
        );
    }

    #[test]
    fn test_text_objects_do_not_nest() {
        let out = written(vec![
            ContentStreamOp::EndText,
            ContentStreamOp::BeginText,
            ContentStreamOp::BeginText,
            ContentStreamOp::EndText,
            ContentStreamOp::EndText,
        ]);
        assert_eq!(out, "BT\nET\n");
    }

    #[test]
    fn test_is_balanced() {
        let mut stream = ContentStream::new();
        ContentStreamWriter::new(&mut stream).ops(vec![
            ContentStreamOp::SaveState,
            ContentStreamOp::BeginText,
            ContentStreamOp::ShowText(b"Q) ET (".to_vec()),
            ContentStreamOp::EndText,
        ]);
        assert!(!stream.is_balanced());
        ContentStreamWriter::new(&mut stream).restore_graphics_state();
        assert!(stream.is_balanced());
    }

    #[test]
    fn test_unbalanced_marked_content() {
        let mut stream = ContentStream::new();
        ContentStreamWriter::new(&mut stream).op(ContentStreamOp::EndMarkedContent);
        assert!(!stream.is_balanced());
    }
}
