//! JSON renderer.
//!
//! Key order follows the model's field order and absent optional fields are
//! left out. Non-ASCII text is written as-is.

use crate::error::Result;
use crate::model::Document;
use crate::render::Renderer;

pub struct JsonRenderer {
    /// Two-space indentation when set, a single line otherwise
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
