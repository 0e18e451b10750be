//! Schema document parsing.
//!
//! Turns XML schema text into the generic [`SchemaNode`] tree consumed by
//! [`Schema::from_tree`](crate::wdbc::schema::Schema::from_tree). Only
//! elements, attributes and text content are kept; declarations, comments
//! and processing instructions are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::wdbc::schema::SchemaNode;
use crate::DbcError;

/// Parse schema XML into its top-level element nodes.
///
/// A well-formed document yields exactly one root, but the tree is returned
/// as-is so the schema layer can report structural problems itself.
pub fn parse_schema_tree(text: &str) -> Result<Vec<SchemaNode>, DbcError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut roots: Vec<SchemaNode> = Vec::new();
    let mut stack: Vec<SchemaNode> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            DbcError::Schema(format!(
                "Malformed schema XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => stack.push(start_node(&e)?),
            Event::Empty(e) => attach(start_node(&e)?, &mut stack, &mut roots),
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    DbcError::Schema(format!(
                        "Unexpected closing tag at byte {}",
                        reader.buffer_position()
                    ))
                })?;
                attach(node, &mut stack, &mut roots);
            }
            Event::Text(e) => {
                let content = e
                    .unescape()
                    .map_err(|e| DbcError::Schema(format!("Bad text in schema XML: {}", e)))?;
                append_text(&mut stack, &content);
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DbcError::Schema(format!(
            "Schema XML ends inside <{}>",
            open.name
        )));
    }

    debug!(roots = roots.len(), "Parsed schema XML");
    Ok(roots)
}

fn start_node(e: &BytesStart<'_>) -> Result<SchemaNode, DbcError> {
    let mut node = SchemaNode::new(&String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            DbcError::Schema(format!("Bad attribute on <{}>: {}", node.name, err))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| DbcError::Schema(format!("Bad value for '{}': {}", key, err)))?;
        node.attributes.push((key, value.into_owned()));
    }
    Ok(node)
}

fn attach(node: SchemaNode, stack: &mut [SchemaNode], roots: &mut Vec<SchemaNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

// Text outside any element (only whitespace survives trimming) is dropped.
fn append_text(stack: &mut [SchemaNode], content: &str) {
    if let Some(node) = stack.last_mut() {
        node.text.push_str(content.trim());
    }
}
