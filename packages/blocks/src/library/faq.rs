//! FAQ container. Carries the page's `FAQPage` structured data as JSON-LD.

use crate::library::block_class;
use crate::markup::{Element, Node};
use crate::registry::VersionedSchemaRegistry;
use crate::shape::{AttributeKind, AttributeShape};
use crate::version::MarkupVersion;
use serde_json::Value;

pub const FAQ: &str = "starboard/faq";

/// JSON for embedding in a script element; `</` would close it early
fn script_json(schema: &Value) -> String {
    schema.to_string().replace("</", "<\\/")
}

pub fn schema() -> VersionedSchemaRegistry {
    let shape = AttributeShape::new().field("schema", AttributeKind::Object);

    VersionedSchemaRegistry::new(MarkupVersion::new(FAQ, shape, |attrs| {
        let mut nodes = vec![Node::from(
            Element::new("div").class(block_class(FAQ)).class("faqs-wrapper"),
        )];

        if let Some(schema) = attrs.get("schema") {
            nodes.push(
                Element::new("script")
                    .attr("type", "application/ld+json")
                    .raw(script_json(schema))
                    .into(),
            );
        }
        nodes
    }))
}
