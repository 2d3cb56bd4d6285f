use super::{required_text, Extractor, Field};
use crate::error::Result;
use crate::model::EnumValueDescriptor;
use crate::tree::SourceNode;

impl Extractor<'_> {
    /// Every `<enumvalue>` beneath `member`, in document order.
    pub fn enum_values(&self, member: &SourceNode) -> Result<Vec<EnumValueDescriptor>> {
        member
            .descendants("enumvalue")
            .into_iter()
            .map(|value| {
                Ok(EnumValueDescriptor {
                    name: required_text(value, "name", "name")?,
                    initializer: self.field(value, Field::Initializer),
                    brief: self.field(value, Field::Brief),
                    description: self.field(value, Field::Description),
                })
            })
            .collect()
    }
}
