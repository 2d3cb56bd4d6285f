//! Parameter declarations joined with their out-of-band descriptions.
//!
//! Declarations are the member's direct `<param>` children. Descriptions live
//! in `<parameterlist kind="param">` blocks inside the detailed description
//! and are matched by exact parameter name. Function-like macros declare
//! their parameters with `<defname>` instead of `<declname>`.

use super::{non_empty, non_empty_str, Extractor};
use crate::error::{ExtractError, Result};
use crate::flatten::flatten;
use crate::model::ParamDescriptor;
use crate::tree::SourceNode;
use tracing::trace;

impl Extractor<'_> {
    pub fn params(&self, member: &SourceNode) -> Result<Vec<ParamDescriptor>> {
        let descriptions = self.param_descriptions(member);

        let params = member
            .children_named("param")
            .map(|param| {
                let name = declared_name(param)?;
                let ty = param
                    .child("type")
                    .map(|ty| flatten(ty, self.rules))
                    .unwrap_or_default();
                let description = lookup(&descriptions, &name).map(str::to_string);
                Ok(ParamDescriptor {
                    name,
                    ty,
                    description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, _) in &descriptions {
            if !params.iter().any(|p| &p.name == name) {
                trace!(member = %member.path, param = %name, "dropping description of undeclared parameter");
            }
        }

        Ok(params)
    }

    /// `(name, description)` pairs in source order. One item may document
    /// several names at once.
    fn param_descriptions(&self, member: &SourceNode) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let Some(detailed) = member.child("detaileddescription") else {
            return out;
        };

        for list in detailed.descendants("parameterlist") {
            if list.attr("kind") != Some("param") {
                continue;
            }
            for item in list.children_named("parameteritem") {
                let Some(text) = item
                    .child("parameterdescription")
                    .map(|desc| self.description_text(desc))
                    .and_then(non_empty)
                else {
                    continue;
                };
                for name in item.find_all("parameternamelist/parametername") {
                    out.push((name.text().trim().to_string(), text.clone()));
                }
            }
        }
        out
    }

    fn description_text(&self, desc: &SourceNode) -> String {
        match desc.child("para") {
            Some(para) => flatten(para, self.rules),
            None => flatten(desc, self.rules),
        }
    }
}

fn declared_name(param: &SourceNode) -> Result<String> {
    param
        .child("declname")
        .or_else(|| param.child("defname"))
        .and_then(|name| non_empty_str(name.text()))
        .ok_or_else(|| ExtractError::missing("name", &param.path))
}

/// Later entries win when a name is documented twice.
fn lookup<'a>(descriptions: &'a [(String, String)], name: &str) -> Option<&'a str> {
    descriptions
        .iter()
        .rev()
        .find(|(candidate, _)| candidate == name)
        .map(|(_, text)| text.as_str())
}
