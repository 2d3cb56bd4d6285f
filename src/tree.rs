//! Owned element tree read from compound XML.
//!
//! Text is stored the way mixed content needs it: `text` is whatever precedes
//! the first child, and each child's `tail` is whatever follows it inside the
//! parent. Nodes also carry a positional path for error messages.

use crate::error::{ExtractError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

/// One element of the source tree. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceNode {
    pub tag: String,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<SourceNode>,
    /// e.g. `/doxygen[1]/compounddef[1]/sectiondef[2]`
    pub path: String,
}

impl SourceNode {
    /// Own text, or `""` when the element has none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Text following this element inside its parent, or `""`.
    pub fn tail(&self) -> &str {
        self.tail.as_deref().unwrap_or("")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&SourceNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a SourceNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Follow a slash-separated path of tags, taking the first match at each step.
    pub fn find(&self, path: &str) -> Option<&SourceNode> {
        path.split('/').try_fold(self, |node, step| node.child(step))
    }

    /// All nodes reachable through a slash-separated path, in document order.
    pub fn find_all(&self, path: &str) -> Vec<&SourceNode> {
        let mut current = vec![self];
        for step in path.split('/') {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| c.tag == step))
                .collect();
        }
        current
    }

    /// Every descendant (not including `self`) with the given tag, pre-order.
    pub fn descendants<'a>(&'a self, tag: &str) -> Vec<&'a SourceNode> {
        let mut out = Vec::new();
        collect_descendants(self, tag, &mut out);
        out
    }

    /// First descendant with the given tag whose attribute equals `value`.
    pub fn find_descendant(&self, tag: &str, attr: &str, value: &str) -> Option<&SourceNode> {
        self.descendants(tag)
            .into_iter()
            .find(|node| node.attr(attr) == Some(value))
    }

    /// Serialize this element (and its tail) back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_markup(self, &mut out);
        out
    }
}

fn collect_descendants<'a>(node: &'a SourceNode, tag: &str, out: &mut Vec<&'a SourceNode>) {
    for child in &node.children {
        if child.tag == tag {
            out.push(child);
        }
        collect_descendants(child, tag, out);
    }
}

fn write_markup(node: &SourceNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        out.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
    }
    if node.text.is_none() && node.children.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        out.push_str(&escape_text(node.text()));
        for child in &node.children {
            write_markup(child, out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }
    out.push_str(&escape_text(node.tail()));
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Compounds must be UTF-8. Anything else is reported at the first
/// offending byte.
pub fn decode_utf8(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|e| ExtractError::Parse {
        position: e.valid_up_to() as u64,
        message: "input is not valid UTF-8".to_string(),
    })
}

/// Parse an XML document into its root element.
pub fn parse_str(input: &str) -> Result<SourceNode> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<SourceNode> = Vec::new();
    let mut root: Option<SourceNode> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(&reader, e))?;
        match event {
            Event::Start(start) => {
                let node = open_node(&reader, &start, stack.last(), root.is_some())?;
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = open_node(&reader, &start, stack.last(), root.is_some())?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| parse_error(&reader, "closing tag without an open element"))?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| parse_error(&reader, e))?;
                push_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut stack, &text);
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(parse_error(
            &reader,
            format!("unclosed element <{}>", open.tag),
        ));
    }
    root.ok_or_else(|| parse_error(&reader, "document has no root element"))
}

fn open_node(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    parent: Option<&SourceNode>,
    have_root: bool,
) -> Result<SourceNode> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let path = match parent {
        Some(parent) => {
            let index = parent.children_named(&tag).count() + 1;
            format!("{}/{}[{}]", parent.path, tag, index)
        }
        None if have_root => {
            return Err(parse_error(
                reader,
                format!("second root element <{}>", tag),
            ));
        }
        None => format!("/{}[1]", tag),
    };

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(reader, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(reader, e))?
            .into_owned();
        attrs.push((key, value));
    }

    Ok(SourceNode {
        tag,
        attrs,
        path,
        ..Default::default()
    })
}

fn attach(stack: &mut [SourceNode], root: &mut Option<SourceNode>, node: SourceNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Text before the first child belongs to the parent, anything later to the
/// preceding sibling's tail. Text outside the root element is dropped.
fn push_text(stack: &mut [SourceNode], text: &str) {
    let Some(top) = stack.last_mut() else {
        return;
    };
    let slot = match top.children.last_mut() {
        Some(last) => &mut last.tail,
        None => &mut top.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}

fn parse_error(reader: &Reader<&[u8]>, message: impl Display) -> ExtractError {
    ExtractError::Parse {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}
