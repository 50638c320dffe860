//! A single stat inside the stats grid, sized per screen with `columns` and `offset`.

use crate::attributes::Attributes;
use crate::markup::{Element, Node};
use crate::registry::VersionedSchemaRegistry;
use crate::shape::{AttributeKind, AttributeShape};
use crate::version::{MarkupVersion, MigrationStep};
use serde_json::json;
use starboard_common::ConfigurationError;
use starboard_styles::{BreakpointConfig, ScreenRegistry, StyleDeriver};
use std::sync::Arc;

pub const STATS_ITEM: &str = "starboard/stats-item";

const BLOCK_CLASS: &str = "wp-block-stats-item";

fn shape_v0(screens: &Arc<ScreenRegistry>) -> AttributeShape {
    AttributeShape::new()
        .with_screens(screens.clone())
        .field_with_default("statsHeading", AttributeKind::String, "")
        .field_with_default("statsDescription", AttributeKind::String, "")
        .field_with_default("headingFontSize", AttributeKind::String, "large")
        .field_with_default("paragraphFontSize", AttributeKind::String, "medium")
        .field_with_default("breakpoints", AttributeKind::Breakpoints, json!({}))
}

fn shape_v1(screens: &Arc<ScreenRegistry>) -> AttributeShape {
    shape_v0(screens).field_with_default("statsFootnote", AttributeKind::String, "")
}

/// Class prefix of the inner elements; the first release namespaced it
struct ItemClasses {
    stat: &'static str,
    description: &'static str,
}

const LEGACY_CLASSES: ItemClasses = ItemClasses {
    stat: "starboard-stats-item__stat",
    description: "starboard-stats-item__description",
};

const CLASSES: ItemClasses = ItemClasses {
    stat: "stats-item__stat",
    description: "stats-item__description",
};

fn render_item(deriver: &StyleDeriver, attrs: &Attributes, classes: &ItemClasses) -> Element {
    let config: BreakpointConfig = attrs.decode("breakpoints").unwrap_or_default();
    let heading = attrs.get_str("statsHeading").unwrap_or_default();
    let description = attrs.get_str("statsDescription").unwrap_or_default();
    let heading_size = attrs.get_str("headingFontSize").unwrap_or_default();
    let paragraph_size = attrs.get_str("paragraphFontSize").unwrap_or_default();

    let mut stat = Element::new("h4")
        .class(classes.stat)
        .class(format!("has-{}-font-size", heading_size))
        .raw(heading);

    if !description.is_empty() {
        stat = stat.child(
            Element::new("span")
                .class(classes.description)
                .class(format!("has-{}-font-size", paragraph_size))
                .raw(description),
        );
    }

    Element::new("article")
        .class(BLOCK_CLASS)
        .class(deriver.derive(&config).to_class_string())
        .child(stat)
}

pub fn schema(deriver: StyleDeriver) -> Result<VersionedSchemaRegistry, ConfigurationError> {
    let screens = deriver.shared_screens();
    let v0_deriver = deriver.clone();
    let v0 = MarkupVersion::new(STATS_ITEM, shape_v0(&screens), move |attrs| {
        vec![render_item(&v0_deriver, attrs, &LEGACY_CLASSES).into()]
    });

    let v1 = MarkupVersion::new(STATS_ITEM, shape_v1(&screens), move |attrs| {
        let footnote = attrs.get_str("statsFootnote").unwrap_or_default();
        let mut article = render_item(&deriver, attrs, &CLASSES);
        if !footnote.is_empty() {
            article = article.child(
                Element::new("span")
                    .class("stats-item__footnote")
                    .text(format!(" {} ", footnote)),
            );
        }
        vec![Node::from(article)]
    });

    let mut registry = VersionedSchemaRegistry::new(v0);
    registry.append(MigrationStep::inject("statsFootnote", ""), v1)?;
    Ok(registry)
}
