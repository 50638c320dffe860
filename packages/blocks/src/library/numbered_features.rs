//! Numbered features section and its items.
//!
//! The section's first release stored the heading tag name (`"h2"`); the
//! current one stores the numeric level.

use crate::attributes::Attributes;
use crate::library::block_class;
use crate::markup::{Element, Node};
use crate::registry::VersionedSchemaRegistry;
use crate::shape::{AttributeKind, AttributeShape};
use crate::version::{MarkupVersion, MigrationStep};
use starboard_common::ConfigurationError;

pub const NUMBERED_FEATURES: &str = "starboard/numbered-features";
pub const NUMBERED_FEATURE_ITEM: &str = "starboard/numbered-feature-item";

const DEFAULT_LEVEL: u64 = 2;

fn clamp_level(level: u64) -> u64 {
    level.clamp(1, 6)
}

/// `"h3"` to `3`. Anything unparseable falls back to the default level.
fn level_from_tag(tag: &str) -> u64 {
    tag.trim()
        .strip_prefix(['h', 'H'])
        .and_then(|level| level.parse::<u64>().ok())
        .map(clamp_level)
        .unwrap_or(DEFAULT_LEVEL)
}

fn base_shape() -> AttributeShape {
    AttributeShape::new()
        .field_with_default("heading", AttributeKind::String, "")
        .field_with_default("backgroundColor", AttributeKind::String, "")
        .field_with_default("columns", AttributeKind::Integer, 3)
}

fn render_section(attrs: &Attributes, heading_tag: &str) -> Vec<Node> {
    let columns = attrs.get_u64("columns").unwrap_or(3);
    let background = attrs.get_str("backgroundColor").unwrap_or_default();

    let mut section = Element::new("section")
        .class(block_class(NUMBERED_FEATURES))
        .class(format!("columns-{}", columns));
    if !background.is_empty() {
        section = section.attr("style", format!("background-color:{}", background));
    }

    let container = Element::new("div")
        .class("container")
        .child(
            Element::new(heading_tag)
                .class("section-heading")
                .raw(attrs.get_str("heading").unwrap_or_default()),
        )
        .child(Element::new("div").class("features-grid"));

    vec![section.child(container).into()]
}

fn heading_level_step() -> MigrationStep {
    MigrationStep::new("headingTag to headingLevel", |mut attrs: Attributes| {
        if let Some(tag) = attrs.remove("headingTag") {
            let level = tag.as_str().map(level_from_tag).unwrap_or(DEFAULT_LEVEL);
            attrs.insert("headingLevel", level);
        }
        attrs
    })
}

pub fn schema() -> Result<VersionedSchemaRegistry, ConfigurationError> {
    let v0 = MarkupVersion::new(
        NUMBERED_FEATURES,
        base_shape().field_with_default("headingTag", AttributeKind::String, "h2"),
        |attrs| {
            let tag = format!("h{}", level_from_tag(attrs.get_str("headingTag").unwrap_or_default()));
            render_section(attrs, &tag)
        },
    );

    let v1 = MarkupVersion::new(
        NUMBERED_FEATURES,
        base_shape().field_with_default("headingLevel", AttributeKind::Integer, DEFAULT_LEVEL),
        |attrs| {
            let level = clamp_level(attrs.get_u64("headingLevel").unwrap_or(DEFAULT_LEVEL));
            render_section(attrs, &format!("h{}", level))
        },
    );

    let mut registry = VersionedSchemaRegistry::new(v0);
    registry.append(heading_level_step(), v1)?;
    Ok(registry)
}

pub fn item_schema() -> VersionedSchemaRegistry {
    let shape = AttributeShape::new()
        .field_with_default("heading", AttributeKind::String, "")
        .field_with_default("description", AttributeKind::String, "")
        .field_with_default("showBorder", AttributeKind::Boolean, false);

    VersionedSchemaRegistry::new(MarkupVersion::new(NUMBERED_FEATURE_ITEM, shape, |attrs| {
        let mut item = Element::new("div")
            .class(block_class(NUMBERED_FEATURE_ITEM))
            .class("numbered-feature-item");
        if attrs.get_bool("showBorder").unwrap_or(false) {
            item = item.class("has-border");
        }

        let content = Element::new("div")
            .class("feature-content")
            .child(
                Element::new("h3")
                    .class("feature-heading")
                    .raw(attrs.get_str("heading").unwrap_or_default()),
            )
            .child(
                Element::new("p")
                    .class("feature-description")
                    .raw(attrs.get_str("description").unwrap_or_default()),
            );

        vec![item
            .child(Element::new("div").class("feature-number").attr("aria-hidden", "true"))
            .child(content)
            .into()]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::version::SchemaVersion;

    #[test]
    fn test_level_from_tag() {
        assert_eq!(level_from_tag("h3"), 3);
        assert_eq!(level_from_tag("H1"), 1);
        assert_eq!(level_from_tag("h9"), 6);
        assert_eq!(level_from_tag("h0"), 1);
        assert_eq!(level_from_tag("div"), 2);
        assert_eq!(level_from_tag(""), 2);
    }

    #[test]
    fn test_section_markup() {
        let attrs = Attributes::new()
            .with("heading", "How it works")
            .with("backgroundColor", "#fafafa")
            .with("headingLevel", 3);
        let body = schema().unwrap().current().render(&attrs);

        assert_eq!(
            body,
            concat!(
                r##"<section class="wp-block-starboard-numbered-features columns-3" style="background-color:#fafafa">"##,
                r#"<div class="container"><h3 class="section-heading">How it works</h3>"#,
                r#"<div class="features-grid"></div></div></section>"#
            )
        );
    }

    #[test]
    fn test_heading_tag_becomes_level() {
        let registry = schema().unwrap();
        let stored = Attributes::new().with("heading", "Steps").with("headingTag", "h4");
        let snapshot = registry.version(0).unwrap().serialize(&stored);

        let resolution = resolve(&snapshot, &stored, &registry).unwrap();
        assert_eq!(resolution.version_index, 0);
        assert_eq!(
            resolution.attributes,
            Attributes::new().with("heading", "Steps").with("headingLevel", 4)
        );

        // The migrated attributes render the same heading under the current version.
        let current = registry.current().render(&resolution.attributes);
        assert!(current.contains(r#"<h4 class="section-heading">Steps</h4>"#));
    }

    #[test]
    fn test_default_tag_snapshot_resolves_to_current() {
        let registry = schema().unwrap();
        let snapshot = registry.version(0).unwrap().serialize(&Attributes::new());

        // Nothing stored: both versions render an h2 and the newest wins.
        assert_eq!(registry.matching_versions(&snapshot), vec![0, 1]);
        let resolution = resolve(&snapshot, &Attributes::new(), &registry).unwrap();
        assert_eq!(resolution.version_index, 1);
    }

    #[test]
    fn test_item_markup() {
        let attrs = Attributes::new()
            .with("heading", "Plan")
            .with("description", "Pick a goal")
            .with("showBorder", true);
        let body = item_schema().current().render(&attrs);

        assert_eq!(
            body,
            concat!(
                r#"<div class="wp-block-starboard-numbered-feature-item numbered-feature-item has-border">"#,
                r#"<div class="feature-number" aria-hidden="true"></div>"#,
                r#"<div class="feature-content"><h3 class="feature-heading">Plan</h3>"#,
                r#"<p class="feature-description">Pick a goal</p></div></div>"#
            )
        );
    }
}
