//! Member descriptors and the sections that group them.

use super::{required_text, Extractor, Field};
use crate::error::{ExtractError, Result};
use crate::model::{carries_enum_values, MemberDescriptor, Section};
use crate::tree::SourceNode;
use tracing::debug;

impl Extractor<'_> {
    /// One [`Section`] per `<sectiondef>` of the compound, in source order.
    pub fn sections(&self, compound: &SourceNode) -> Result<Vec<Section>> {
        compound
            .children_named("sectiondef")
            .map(|section| self.section(section))
            .collect()
    }

    pub fn section(&self, node: &SourceNode) -> Result<Section> {
        let kind = node
            .attr("kind")
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .ok_or_else(|| ExtractError::missing("kind", &node.path))?
            .to_string();

        let members = node
            .children_named("memberdef")
            .map(|member| self.member(member, &kind))
            .collect::<Result<Vec<_>>>()?;

        debug!(section = %kind, members = members.len(), "extracted section");
        Ok(Section { kind, members })
    }

    pub fn member(&self, node: &SourceNode, section_kind: &str) -> Result<MemberDescriptor> {
        let name = required_text(node, "name", "name")?;

        let values = if carries_enum_values(section_kind) {
            Some(self.enum_values(node)?)
        } else {
            None
        };

        Ok(MemberDescriptor {
            name,
            ty: self.field(node, Field::Type),
            initializer: self.field(node, Field::Initializer),
            brief: self.field(node, Field::Brief),
            description: self.field(node, Field::Description),
            return_text: self.field(node, Field::Return),
            since: self.field(node, Field::Since),
            note: self.field(node, Field::Note),
            values,
            params: self.params(node)?,
        })
    }
}
