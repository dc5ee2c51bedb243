//! PDF object values used by resource dictionaries.
//!
//! Only the direct object kinds that fonts and resource tables carry are
//! modelled; serialization of indirect objects belongs to the document
//! writer, not the layout engine.

use indexmap::IndexMap;

/// A PDF dictionary with insertion-ordered keys (names without the leading `/`).
pub type Dictionary = IndexMap<String, Object>;

/// PDF object types.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
}

impl Object {
    /// Create a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }
}

/// Compare two dictionaries while ignoring the given keys.
///
/// Key order is irrelevant, as in PDF itself.
pub fn dictionaries_equal_except(a: &Dictionary, b: &Dictionary, ignored: &[&str]) -> bool {
    let relevant = |d: &Dictionary| d.keys().filter(|k| !ignored.contains(&k.as_str())).count();
    relevant(a) == relevant(b)
        && a
            .iter()
            .filter(|(k, _)| !ignored.contains(&k.as_str()))
            .all(|(k, v)| b.get(k) == Some(v))
}
