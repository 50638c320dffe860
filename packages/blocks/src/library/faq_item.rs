//! Collapsible question and answer inside an FAQ block.

use crate::attributes::Attributes;
use crate::library::block_class;
use crate::markup::{Element, Node};
use crate::registry::VersionedSchemaRegistry;
use crate::shape::{AttributeKind, AttributeShape};
use crate::version::{MarkupVersion, MigrationStep};
use starboard_common::ConfigurationError;

pub const FAQ_ITEM: &str = "starboard/faq-item";

fn shape(title_key: &'static str) -> AttributeShape {
    AttributeShape::new()
        .field("blockId", AttributeKind::String)
        .field_with_default(title_key, AttributeKind::String, "")
        .field_with_default("content", AttributeKind::String, "")
        .field_with_default("isOpen", AttributeKind::Boolean, false)
}

fn render(attrs: &Attributes, title_key: &str) -> Vec<Node> {
    let mut details = Element::new("details")
        .class(block_class(FAQ_ITEM))
        .class("faq")
        .flag("open", attrs.get_bool("isOpen").unwrap_or(false));

    if let Some(block_id) = attrs.get_str("blockId") {
        details = details.attr("data-block-id", block_id);
    }

    details = details
        .child(
            Element::new("summary")
                .class("faq__title")
                .raw(attrs.get_str(title_key).unwrap_or_default()),
        )
        .child(
            Element::new("div")
                .class("faq__content")
                .raw(attrs.get_str("content").unwrap_or_default()),
        );

    vec![details.into()]
}

pub fn schema() -> Result<VersionedSchemaRegistry, ConfigurationError> {
    let v0 = MarkupVersion::new(FAQ_ITEM, shape("heading"), |attrs| render(attrs, "heading"));
    let v1 = MarkupVersion::new(FAQ_ITEM, shape("title"), |attrs| render(attrs, "title"));

    let mut registry = VersionedSchemaRegistry::new(v0);
    registry.append(MigrationStep::rename("heading", "title"), v1)?;
    Ok(registry)
}
