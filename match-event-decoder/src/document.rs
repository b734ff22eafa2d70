//! Document loading
//!
//! Reads an annotation export and parses it into an owned element tree using
//! the roxmltree crate. The tree keeps only what the extractor needs: element
//! names, direct text content and child elements, in document order.

use crate::types::{DecoderError, Result};
use std::path::{Path, PathBuf};

/// A single element of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local tag name (namespace prefix stripped)
    pub name: String,
    /// Concatenated direct text content, `None` if the element has no text
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// First direct child with the given tag
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child with the given tag
    ///
    /// `None` if there is no such child; `Some("")` if the child is empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_deref().unwrap_or(""))
    }

    /// First descendant (or self) with the given tag, depth-first pre-order
    pub fn find_first(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_first(name))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text: Option<String> = None;
        let mut children = Vec::new();

        for child in node.children() {
            if child.is_element() {
                children.push(Element::from_node(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.get_or_insert_with(String::new).push_str(t);
                }
            }
        }

        Self {
            name: node.tag_name().name().to_string(),
            text,
            children,
        }
    }
}

/// A structurally valid, immutable annotation document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    root: Element,
    source: Option<PathBuf>,
}

impl ParsedDocument {
    /// Parse a document from in-memory markup
    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| DecoderError::Parse(e.to_string()))?;

        Ok(Self {
            root: Element::from_node(doc.root_element()),
            source: None,
        })
    }

    /// Root element of the document
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Path the document was loaded from (if loaded from disk)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Read and structurally parse an annotation export from disk
///
/// # Errors
/// * `DecoderError::NotFound` - the file is missing or unreadable
/// * `DecoderError::Parse` - the file is not UTF-8 or not well-formed XML
pub fn load(path: &Path) -> Result<ParsedDocument> {
    log::info!("Loading annotation export: {:?}", path);

    let bytes = std::fs::read(path).map_err(|e| DecoderError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = String::from_utf8(bytes).map_err(|e| {
        DecoderError::Parse(format!("{:?} is not valid UTF-8: {}", path, e))
    })?;

    let mut doc = ParsedDocument::parse(&text).map_err(|e| match e {
        DecoderError::Parse(msg) => DecoderError::Parse(format!("{:?}: {}", path, msg)),
        other => other,
    })?;
    doc.source = Some(path.to_path_buf());

    log::debug!("Document root element: <{}>", doc.root.name);
    Ok(doc)
}
