//! Optional single-value fields of a member, enum value or compound.

use super::{non_empty, Extractor};
use crate::flatten::{flatten, flatten_paragraphs};
use crate::tree::SourceNode;

/// Named lookups for optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Initializer,
    /// First paragraph of the brief description
    Brief,
    /// First paragraph of the detailed description
    Description,
    Return,
    Since,
    Note,
}

impl Field {
    /// `simplesect` kind for annotation fields, `None` for flattened ones.
    fn annotation_kind(self) -> Option<&'static str> {
        match self {
            Field::Return => Some("return"),
            Field::Since => Some("since"),
            Field::Note => Some("note"),
            _ => None,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Initializer => "initializer",
            Field::Brief => "briefdescription/para",
            Field::Description => "detaileddescription/para",
            Field::Return | Field::Since | Field::Note => "detaileddescription",
        }
    }
}

impl Extractor<'_> {
    /// Extract `field` from `node`. Missing nodes and empty results are `None`.
    pub fn field(&self, node: &SourceNode, field: Field) -> Option<String> {
        match field.annotation_kind() {
            Some(kind) => annotation(node, field.path(), kind),
            None => self.flattened(node, field.path()),
        }
    }

    /// Flatten whatever `path` addresses under `node`.
    pub(super) fn flattened(&self, node: &SourceNode, path: &str) -> Option<String> {
        node.find(path)
            .map(|target| flatten(target, self.rules))
            .and_then(non_empty)
    }
}

/// Annotation blocks are `<simplesect kind="...">` anywhere inside the
/// detailed description. Their paragraphs are not rewritten.
fn annotation(node: &SourceNode, path: &str, kind: &str) -> Option<String> {
    let block = node.find(path)?.find_descendant("simplesect", "kind", kind)?;
    let paras: Vec<&SourceNode> = block.children_named("para").collect();
    non_empty(flatten_paragraphs(&paras))
}
