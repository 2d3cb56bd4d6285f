//! Inline markup flattening.
//!
//! Reduces a mixed text/element node to one string. Inline tags with a
//! registered rewrite are replaced by lightly annotated HTML; every other tag
//! contributes its own text verbatim. Only direct children are visited, so a
//! rewritten tag's own children are not rewritten again.

use crate::tree::SourceNode;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Pure transform applied to the own text of a rewrite-eligible element.
pub type RewriteFn = fn(&str) -> String;

/// Lookup from tag name to its rewrite. Tags without an entry pass through.
#[derive(Clone)]
pub struct RewriteTable {
    rules: HashMap<&'static str, RewriteFn>,
}

impl RewriteTable {
    pub fn empty() -> Self {
        RewriteTable {
            rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, tag: &'static str, rule: RewriteFn) -> Self {
        self.rules.insert(tag, rule);
        self
    }

    pub fn get(&self, tag: &str) -> Option<RewriteFn> {
        self.rules.get(tag).copied()
    }
}

impl Default for RewriteTable {
    fn default() -> Self {
        RewriteTable::empty()
            .with_rule("ref", reference_link)
            .with_rule("computeroutput", code_span)
    }
}

/// Rewrite rules used by the extractor.
pub static DEFAULT_RULES: LazyLock<RewriteTable> = LazyLock::new(RewriteTable::default);

/// `foo()` → `<a href='#foo'>foo()</a>`
fn reference_link(text: &str) -> String {
    let target = text.strip_suffix("()").unwrap_or(text);
    format!("<a href='#{}'>{}</a>", target, text)
}

fn code_span(text: &str) -> String {
    format!("<code>{}</code>", text)
}

/// Flatten `node` into a single trimmed string.
pub fn flatten(node: &SourceNode, table: &RewriteTable) -> String {
    let mut out = node.text().to_string();
    for child in &node.children {
        match table.get(&child.tag) {
            Some(rule) => out.push_str(&rule(child.text())),
            None => out.push_str(child.text()),
        }
        out.push_str(child.tail());
    }
    out.trim().to_string()
}

/// Flatten a run of sibling paragraphs (return, since and note blocks).
///
/// A plain first paragraph yields its own text. Otherwise the raw markup of
/// every child of every paragraph is concatenated, for consumers that render
/// the markup themselves.
pub fn flatten_paragraphs(paras: &[&SourceNode]) -> String {
    let Some(first) = paras.first() else {
        return String::new();
    };

    let own = first.text().trim();
    if !own.is_empty() {
        return own.to_string();
    }

    let mut out = String::new();
    for para in paras {
        for child in &para.children {
            out.push_str(&child.to_markup());
        }
    }
    out.trim().to_string()
}
