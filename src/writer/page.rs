//! Pages and their resource tables.

use crate::compliance::Conformance;
use crate::fonts::Font;
use crate::geometry::Size;
use crate::object::{dictionaries_equal_except, Dictionary, Object};
use crate::writer::content_stream::{ContentStream, ContentStreamWriter};
use indexmap::IndexMap;
use std::sync::Arc;

/// Resource dictionary of a page (`Font` and `XObject` subtables).
///
/// Keys are resource names without the leading slash (`F1`, `Im1`, ...).
#[derive(Debug, Clone, Default)]
pub struct Resources {
    fonts: IndexMap<String, Arc<dyn Font>>,
    xobjects: IndexMap<String, Object>,
}

impl Resources {
    /// Create empty resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the resource name of `font`, registering it on first use.
    ///
    /// A font whose dictionary equals an already registered one (ignoring
    /// `Name`) reuses that entry. New fonts get `Fk` for the smallest
    /// unused k >= 1.
    pub fn intern_font(&mut self, font: &Arc<dyn Font>) -> String {
        let wanted = font.dictionary();
        if let Some(name) = self.fonts.iter().find_map(|(name, existing)| {
            dictionaries_equal_except(&existing.dictionary(), &wanted, &["Name"])
                .then(|| name.clone())
        }) {
            return name;
        }

        let mut k = 1usize;
        while self.fonts.contains_key(&format!("F{}", k)) {
            k += 1;
        }
        let name = format!("F{}", k);
        log::debug!("Registering font {} as /{}", font.base_font(), name);
        self.fonts.insert(name.clone(), Arc::clone(font));
        name
    }

    /// Registered fonts by resource name.
    pub fn fonts(&self) -> &IndexMap<String, Arc<dyn Font>> {
        &self.fonts
    }

    /// Font registered under `name`.
    pub fn font(&self, name: &str) -> Option<&Arc<dyn Font>> {
        self.fonts.get(name)
    }

    /// The dictionary as written to the file: the font's entries plus its
    /// `Name`.
    pub fn font_dictionary(&self, name: &str) -> Option<Dictionary> {
        self.fonts.get(name).map(|font| {
            let mut dict = font.dictionary();
            dict.insert("Name".to_string(), Object::name(name));
            dict
        })
    }

    /// XObjects by resource name.
    pub fn xobjects(&self) -> &IndexMap<String, Object> {
        &self.xobjects
    }

    /// Register an XObject under `name`, replacing any previous entry.
    pub fn add_xobject(&mut self, name: impl Into<String>, xobject: Object) {
        self.xobjects.insert(name.into(), xobject);
    }
}

/// A page: size, content stream and resources.
#[derive(Debug, Clone)]
pub struct Page {
    width: f64,
    height: f64,
    contents: ContentStream,
    resources: Resources,
    conformance: Option<Conformance>,
}

impl Page {
    /// Create an empty page without a conformance declaration.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            contents: ContentStream::new(),
            resources: Resources::new(),
            conformance: None,
        }
    }

    /// Create an empty page carrying a document's conformance.
    pub fn with_conformance(width: f64, height: f64, conformance: Option<Conformance>) -> Self {
        Self {
            conformance,
            ..Self::new(width, height)
        }
    }

    /// Page dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Conformance declared by the owning document.
    pub fn conformance(&self) -> Option<Conformance> {
        self.conformance
    }

    /// Whether content on this page must be tagged.
    pub fn requires_tagged_pdf(&self) -> bool {
        self.conformance
            .map(|c| c.requires_tagged_pdf())
            .unwrap_or(false)
    }

    /// The content stream.
    pub fn contents(&self) -> &ContentStream {
        &self.contents
    }

    /// The resource tables.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Mutable resource tables.
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// A writer appending to this page's content stream.
    pub fn writer(&mut self) -> ContentStreamWriter<'_> {
        ContentStreamWriter::new(&mut self.contents)
    }
}
