//! # Contract Outline
//!
//! Renders the `Contract` node of a dictionary as an indented outline for
//! review: one line per property, tagged with its nesting depth.

use crate::node::{Properties, SchemaNode, SchemaType};
use crate::resolve::SchemaDictionary;

/// One property in the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub depth: usize,
    pub name: String,
    /// `string`, `object`, `array of integer`, ...
    pub kind: String,
    /// Format, else reference name, else pattern.
    pub modifier: Option<String>,
}

/// Walk the contract's properties depth first.
pub fn outline(dictionary: &SchemaDictionary) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    walk(&dictionary.contract().properties, 0, &mut lines);
    lines
}

fn walk(properties: &Properties, depth: usize, lines: &mut Vec<OutlineLine>) {
    for (name, node) in properties {
        lines.push(OutlineLine {
            depth,
            name: name.as_str().to_string(),
            kind: kind_label(node),
            modifier: modifier(node),
        });

        match node.kind() {
            SchemaType::Object => walk(&node.properties, depth + 1, lines),
            SchemaType::Array => {
                if let Some(items) = node.items.as_deref() {
                    if items.kind() == SchemaType::Object {
                        walk(&items.properties, depth + 1, lines);
                    }
                }
            }
            _ => {}
        }
    }
}

fn kind_label(node: &SchemaNode) -> String {
    match (node.kind(), node.items.as_deref()) {
        (SchemaType::Array, Some(items)) => match modifier(items) {
            Some(m) => format!("array of {} ({m})", items.kind()),
            None => format!("array of {}", items.kind()),
        },
        (kind, _) => kind.to_string(),
    }
}

fn modifier(node: &SchemaNode) -> Option<String> {
    node.format
        .as_ref()
        .map(ToString::to_string)
        .or_else(|| node.reference_name().map(str::to_string))
        .or_else(|| node.pattern.clone())
}

/// Plain text, two spaces of indentation per level.
pub fn render_text(lines: &[OutlineLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!("{}{}: {}", "  ".repeat(line.depth), line.name, line.kind));
        if let Some(m) = &line.modifier {
            out.push_str(&format!(" ({m})"));
        }
        out.push('\n');
    }
    out
}

/// HTML fragment, one `<div>` per line carrying a depth class.
pub fn render_html(lines: &[OutlineLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!(
            "<div class=\"contract-line depth-{}\"><span class=\"contract-name\">{}</span>: {}",
            line.depth,
            escape_html(&line.name),
            escape_html(&line.kind)
        ));
        if let Some(m) = &line.modifier {
            out.push_str(&format!(" <em>({})</em>", escape_html(m)));
        }
        out.push_str("</div>\n");
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
