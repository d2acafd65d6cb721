//! Recursive conversion of a reduced-content tree into Markdown.
//!
//! Block tags (headings, paragraphs, lists, fenced code, quotes) extract
//! their full subtree text, flattening any nested markup; unknown tags are
//! transparent containers that recurse through the converter. That
//! asymmetry matches the archiver's fixed tag set and is deliberate.

use crate::content::{ContentNode, ElementNode};

/// Convert the children of the given element into Markdown.
///
/// Pure and deterministic: the same tree always yields the same string.
pub fn convert(node: &ElementNode) -> String {
    let mut fragments: Vec<String> = Vec::new();

    for child in &node.children {
        match child {
            ContentNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    fragments.push(text.to_string());
                }
            }
            ContentNode::Element(el) => {
                if let Some(fragment) = render_element(el) {
                    fragments.push(fragment);
                }
            }
        }
    }

    fragments
        .join("\n")
        .replace("\n \n", "\n\n")
        .trim()
        .to_string()
}

fn render_element(el: &ElementNode) -> Option<String> {
    if let Some(level) = heading_level(&el.tag) {
        let text = el.text_content();
        return Some(format!("\n{} {}\n", "#".repeat(level), text.trim()));
    }

    match el.tag.as_str() {
        "p" => {
            let text = el.text_content();
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(format!("\n{text}\n"))
            }
        }
        "ul" => render_list(el, false),
        "ol" => render_list(el, true),
        "strong" | "b" => Some(format!("**{}**", el.text_content().trim())),
        "em" | "i" => Some(format!("*{}*", el.text_content().trim())),
        "a" => {
            let href = el.attr("href").unwrap_or("");
            Some(format!("[{}]({})", el.text_content().trim(), href))
        }
        "code" => Some(format!("`{}`", el.text_content().trim())),
        "pre" => Some(render_fenced_block(el)),
        "blockquote" => Some(render_blockquote(el)),
        // Unknown tags are transparent wrappers
        _ => {
            let nested = convert(el);
            if nested.is_empty() { None } else { Some(nested) }
        }
    }
}

fn heading_level(tag: &str) -> Option<usize> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Render direct `li` children as one block, one item per line, with a
/// blank line after the whole list. Nested lists flatten into item text.
fn render_list(el: &ElementNode, ordered: bool) -> Option<String> {
    let mut lines = String::new();
    let mut index = 0;

    for child in &el.children {
        if let ContentNode::Element(item) = child {
            if item.tag == "li" {
                index += 1;
                let text = item.text_content();
                if ordered {
                    lines.push_str(&format!("{}. {}\n", index, text.trim()));
                } else {
                    lines.push_str(&format!("- {}\n", text.trim()));
                }
            }
        }
    }

    if lines.is_empty() { None } else { Some(lines) }
}

fn render_fenced_block(el: &ElementNode) -> String {
    let lang = el.attr("class").map(code_language).unwrap_or_default();
    let code = el.text_content();
    format!("\n```{}\n{}\n```\n", lang, code.trim())
}

/// First class matching `language-<lang>` wins; empty string otherwise.
fn code_language(classes: &str) -> String {
    classes
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .unwrap_or("")
        .to_string()
}

fn render_blockquote(el: &ElementNode) -> String {
    let text = el.text_content();
    let quoted = text
        .trim()
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n{quoted}\n")
}
