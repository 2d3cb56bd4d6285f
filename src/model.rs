//! Output model for one extracted compound.
//!
//! Field order here is the field order of the serialized document. Optional
//! fields are skipped when absent, never written as `null` or `""`.

use serde::Serialize;

/// One documented compound (class, struct, file, ...).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Source file path of the compound's declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Version of the tool that produced the input tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    pub sections: Vec<Section>,
}

/// Members sharing one declaration kind, in source order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: String,
    pub members: Vec<MemberDescriptor>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDescriptor {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// `Some` only for members of enum-bearing sections, possibly empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<EnumValueDescriptor>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDescriptor>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EnumValueDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ParamDescriptor {
    pub name: String,
    /// Always written, even when empty
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Section kinds whose members carry enum values.
pub const ENUM_SECTION_KINDS: &[&str] = &["enum", "public-type"];

pub fn carries_enum_values(section_kind: &str) -> bool {
    ENUM_SECTION_KINDS.contains(&section_kind)
}
