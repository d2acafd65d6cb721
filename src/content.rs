use std::collections::HashMap;

use scraper::{ElementRef, Html, Node};

/// A node in the reduced-content tree.
///
/// Either a text node or an element; text nodes carry no tag or children.
/// The tree is owned and value-based so the image relocator can rewrite
/// nodes in place between downloads without holding DOM borrows.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Text(String),
    Element(ElementNode),
}

/// An element in the reduced-content tree
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Lowercase tag name
    pub tag: String,

    /// Attribute name to value mapping
    pub attributes: HashMap<String, String>,

    /// Child nodes in document order
    pub children: Vec<ContentNode>,
}

impl ElementNode {
    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenate all descendant text, in document order.
    ///
    /// Nested markup is flattened: `<li>a <b>c</b></li>` yields `"a c"`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                ContentNode::Text(text) => out.push_str(text),
                ContentNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

/// Parse an HTML fragment into a content tree.
///
/// The returned root is the `<html>` wrapper element the fragment parser
/// introduces; the Markdown converter treats unknown tags as transparent,
/// so the wrapper never shows up in output.
pub fn parse_fragment(html: &str) -> ElementNode {
    let doc = Html::parse_fragment(html);
    build_element(doc.root_element())
}

fn build_element(el: ElementRef) -> ElementNode {
    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => children.push(ContentNode::Text(text.text.to_string())),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    children.push(ContentNode::Element(build_element(child_el)));
                }
            }
            // Comments, doctypes and processing instructions carry no content
            _ => {}
        }
    }

    ElementNode {
        tag: el.value().name().to_string(),
        attributes: el
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children,
    }
}

/// Replace the node at the given child-index path with a replacement node.
///
/// This is the single structural mutation the tree permits: swapping an
/// `img` element for a text node during image relocation. Paths come from
/// a walk of the same tree, so a dangling path is a caller bug and is
/// ignored rather than panicking.
pub fn replace_child(root: &mut ElementNode, path: &[usize], replacement: ContentNode) {
    let Some((&last, parents)) = path.split_last() else {
        return;
    };

    let mut node = root;
    for &index in parents {
        node = match node.children.get_mut(index) {
            Some(ContentNode::Element(el)) => el,
            _ => return,
        };
    }

    if let Some(slot) = node.children.get_mut(last) {
        *slot = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_structure() {
        let root = parse_fragment("<p class=\"x\">Hi <b>there</b></p>");
        assert_eq!(root.tag, "html");
        assert_eq!(root.children.len(), 1);

        let ContentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.tag, "p");
        assert_eq!(p.attr("class"), Some("x"));
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0], ContentNode::Text("Hi ".to_string()));

        let ContentNode::Element(b) = &p.children[1] else {
            panic!("expected element");
        };
        assert_eq!(b.tag, "b");
    }

    #[test]
    fn test_text_content_flattens_descendants() {
        let root = parse_fragment("<li>a <b>c</b> d</li>");
        let ContentNode::Element(li) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(li.text_content(), "a c d");
    }

    #[test]
    fn test_replace_child() {
        let mut root = parse_fragment("<p>Hi <b>there</b></p>");
        // Path [0, 1] addresses the <b> inside the <p>
        replace_child(&mut root, &[0, 1], ContentNode::Text("everyone".to_string()));

        let ContentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.text_content(), "Hi everyone");
    }

    #[test]
    fn test_replace_child_ignores_dangling_path() {
        let mut root = parse_fragment("<p>Hi</p>");
        let before = root.clone();
        replace_child(&mut root, &[5, 2], ContentNode::Text("x".to_string()));
        assert_eq!(root, before);
    }
}
