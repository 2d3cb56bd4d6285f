//! Compound tree → [`Document`] extraction.
//!
//! One pass, top-down: the compound drives its sections, each section its
//! members, and each member pulls fields, parameters and enum values through
//! the flattener. The source tree is only read.

mod enums;
mod field;
mod member;
mod params;

pub use field::Field;

use crate::error::{ExtractError, Result};
use crate::flatten::{RewriteTable, DEFAULT_RULES};
use crate::model::Document;
use crate::tree::{self, SourceNode};
use tracing::debug;

/// Extraction pass bound to one rewrite table.
#[derive(Clone, Copy)]
pub struct Extractor<'t> {
    rules: &'t RewriteTable,
}

impl<'t> Extractor<'t> {
    pub fn new(rules: &'t RewriteTable) -> Self {
        Extractor { rules }
    }

    /// Build the document for a tree rooted at `<doxygen>` (or directly at
    /// `<compounddef>`).
    pub fn document(&self, root: &SourceNode) -> Result<Document> {
        let compound = if root.tag == "compounddef" {
            root
        } else {
            root.child("compounddef")
                .ok_or_else(|| ExtractError::missing("compounddef", &root.path))?
        };

        let name = required_text(compound, "compoundname", "name")?;
        let kind = compound
            .attr("kind")
            .and_then(non_empty_str)
            .ok_or_else(|| ExtractError::missing("kind", &compound.path))?;

        debug!(compound = %name, kind = %kind, "extracting compound");

        Ok(Document {
            name,
            kind,
            brief: self.field(compound, Field::Brief),
            include: self.flattened(compound, "includes"),
            location: compound
                .child("location")
                .and_then(|loc| loc.attr("file"))
                .and_then(non_empty_str),
            language: compound.attr("language").and_then(non_empty_str),
            format_version: if root.tag == "compounddef" {
                None
            } else {
                root.attr("version").and_then(non_empty_str)
            },
            sections: self.sections(compound)?,
        })
    }
}

impl Default for Extractor<'static> {
    fn default() -> Self {
        Extractor::new(&DEFAULT_RULES)
    }
}

/// Parse `input` and extract its document with the default rewrite rules.
pub fn extract_str(input: &str) -> Result<Document> {
    let root = tree::parse_str(input)?;
    Extractor::default().document(&root)
}

/// Same as [`extract_str`] for file contents that have not been decoded yet.
pub fn extract_bytes(input: &[u8]) -> Result<Document> {
    extract_str(tree::decode_utf8(input)?)
}

/// Trimmed text of a required child element. Absent or blank is fatal.
fn required_text(node: &SourceNode, tag: &str, field: &'static str) -> Result<String> {
    node.child(tag)
        .and_then(|child| non_empty_str(child.text()))
        .ok_or_else(|| ExtractError::missing(field, &node.path))
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn non_empty_str(s: &str) -> Option<String> {
    non_empty(s.trim().to_string())
}
