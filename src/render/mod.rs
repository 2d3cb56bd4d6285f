//! Output encodings for an extracted document.

pub mod json;

use crate::error::Result;
use crate::model::Document;
use anyhow::anyhow;

/// Encodes a finished [`Document`] for writing.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Look up the renderer for a `--format` value.
pub fn create_renderer(format: &str) -> anyhow::Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer { pretty: true })),
        "json-compact" => Ok(Box::new(json::JsonRenderer { pretty: false })),
        _ => Err(anyhow!(
            "unknown format: {}. Use json or json-compact",
            format
        )),
    }
}
