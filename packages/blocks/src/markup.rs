//! # Markup
//!
//! Compact HTML builder for block output, and the comment delimiters that wrap
//! a rendered block into a persisted [`MarkupSnapshot`]:
//!
//! ```text
//! <!-- block:starboard/faq-item {"title":"Hi"} -->
//! <details class="faq">...</details>
//! <!-- /block:starboard/faq-item -->
//! ```

use crate::attributes::Attributes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A node in rendered block markup
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),

    /// Plain text, escaped on render
    Text(String),

    /// Pre-rendered HTML (rich-text values), emitted verbatim
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append whitespace-separated class names. Blank input is ignored.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        self.classes
            .extend(class.as_ref().split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), Some(value.into())));
        self
    }

    /// Boolean attribute, rendered bare when `on` and omitted otherwise
    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attributes.push((name.into(), None));
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn raw(self, html: impl Into<String>) -> Self {
        self.child(Node::Raw(html.into()))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);

        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_html(&self.classes.join(" ")));
            out.push('"');
        }

        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }

        if self.children.is_empty() && is_self_closing(&self.tag) {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            render_node(child, out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => element.render_into(out),
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(html) => out.push_str(html),
    }
}

/// Render sibling nodes back to back
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "wbr")
}

/// Persisted markup of one block instance. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupSnapshot(String);

/// The parts of a delimited snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct DelimitedBlock<'a> {
    pub block_name: &'a str,
    pub attributes: Attributes,
    pub inner: &'a str,
}

impl MarkupSnapshot {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Wrap rendered markup in comment delimiters carrying the stored attributes
    pub fn delimit(block_name: &str, attributes: &Attributes, inner: &str) -> Self {
        let mut out = format!("<!-- block:{}", block_name);
        if !attributes.is_empty() {
            out.push(' ');
            out.push_str(&comment_json(attributes));
        }
        out.push_str(" -->\n");
        out.push_str(inner);
        out.push_str("\n<!-- /block:");
        out.push_str(block_name);
        out.push_str(" -->");
        Self(out)
    }

    /// Split the snapshot into block name, attributes and inner markup.
    ///
    /// Returns `None` for anything that is not a well-formed delimited block.
    pub fn parse(&self) -> Option<DelimitedBlock<'_>> {
        static DELIMITERS: OnceLock<Regex> = OnceLock::new();
        let re = DELIMITERS.get_or_init(|| {
            Regex::new(
                r"(?s)\A<!-- block:(?P<name>[a-z0-9-]+/[a-z0-9-]+)(?: (?P<attrs>\{.*?\}))? -->\n(?P<inner>.*)\n<!-- /block:(?P<close>[a-z0-9-]+/[a-z0-9-]+) -->\z",
            )
            .expect("valid delimiter pattern")
        });

        let caps = re.captures(&self.0)?;
        let name = caps.name("name")?.as_str();
        if caps.name("close")?.as_str() != name {
            return None;
        }

        let attributes = match caps.name("attrs") {
            Some(json) => serde_json::from_str(json.as_str()).ok()?,
            None => Attributes::new(),
        };

        Some(DelimitedBlock {
            block_name: name,
            attributes,
            inner: caps.name("inner")?.as_str(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MarkupSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MarkupSnapshot {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl From<&str> for MarkupSnapshot {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

/// Attribute JSON that cannot close the surrounding comment
fn comment_json(attributes: &Attributes) -> String {
    serde_json::to_string(attributes)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_element_tree() {
        let html = Element::new("details")
            .class("faq")
            .flag("open", true)
            .attr("data-block-id", "abc")
            .child(Element::new("summary").class("faq__title").text("Q & A"))
            .render();

        assert_eq!(
            html,
            r#"<details class="faq" open data-block-id="abc"><summary class="faq__title">Q &amp; A</summary></details>"#
        );
    }

    #[test]
    fn test_blank_classes_are_dropped() {
        let html = Element::new("div").class("").class("  a   b ").render();
        assert_eq!(html, r#"<div class="a b"></div>"#);
        assert_eq!(Element::new("div").class(" ").render(), "<div></div>");
    }

    #[test]
    fn test_false_flag_is_omitted() {
        assert_eq!(Element::new("details").flag("open", false).render(), "<details></details>");
    }

    #[test]
    fn test_raw_is_not_escaped() {
        let html = Element::new("div").raw("<strong>Bold</strong>").render();
        assert_eq!(html, "<div><strong>Bold</strong></div>");
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(Element::new("hr").render(), "<hr/>");
    }

    #[test]
    fn test_delimit_and_parse() {
        let attrs = Attributes::new().with("title", "Hi");
        let snapshot = MarkupSnapshot::delimit("starboard/faq-item", &attrs, "<p>x</p>");

        assert_eq!(
            snapshot.as_str(),
            "<!-- block:starboard/faq-item {\"title\":\"Hi\"} -->\n<p>x</p>\n<!-- /block:starboard/faq-item -->"
        );

        let parsed = snapshot.parse().unwrap();
        assert_eq!(parsed.block_name, "starboard/faq-item");
        assert_eq!(parsed.attributes, attrs);
        assert_eq!(parsed.inner, "<p>x</p>");
    }

    #[test]
    fn test_empty_attributes_omit_json() {
        let snapshot = MarkupSnapshot::delimit("starboard/faq", &Attributes::new(), "");
        assert_eq!(
            snapshot.as_str(),
            "<!-- block:starboard/faq -->\n\n<!-- /block:starboard/faq -->"
        );
        let parsed = snapshot.parse().unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.inner, "");
    }

    #[test]
    fn test_comment_breaking_characters_are_escaped() {
        let attrs = Attributes::new().with("content", "a --> b <c>");
        let snapshot = MarkupSnapshot::delimit("starboard/faq-item", &attrs, "");
        let header = snapshot.as_str().lines().next().unwrap();
        assert!(!header[4..header.len() - 3].contains("--"));
        assert!(!header.contains("<c>"));
        assert_eq!(snapshot.parse().unwrap().attributes, attrs);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(MarkupSnapshot::from("<div></div>").parse().is_none());
        assert!(MarkupSnapshot::from(
            "<!-- block:starboard/faq -->\n\n<!-- /block:starboard/stats -->"
        )
        .parse()
        .is_none());
        assert!(MarkupSnapshot::from(
            "<!-- block:starboard/faq {\"a\": -->\n\n<!-- /block:starboard/faq -->"
        )
        .parse()
        .is_none());
        assert!(MarkupSnapshot::from(
            "<!-- block:starboard/faq [1] -->\n\n<!-- /block:starboard/faq -->"
        )
        .parse()
        .is_none());
    }
}
