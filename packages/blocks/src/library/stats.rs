//! Stats grid: a header and a responsive grid of stats items.
//!
//! | index | markup |
//! |---|---|
//! | 0 | grid tokens on the block root, no header |
//! | 1 | header, grid tokens on an inner `stats-wrapper` div |
//! | 2 | header, grid tokens back on the block root |
//!
//! Version 0 stores no header, and with no header stored version 2 renders the
//! same bytes. Every version 0 snapshot therefore resolves to version 2 without
//! migrating, and the `headingFontSize` injection only runs through
//! [`VersionedSchemaRegistry::migrate`]. Nothing is lost: the current shape
//! defaults `headingFontSize` to the injected value.

use crate::attributes::Attributes;
use crate::markup::{Element, Node};
use crate::registry::VersionedSchemaRegistry;
use crate::shape::{AttributeKind, AttributeShape};
use crate::version::{MarkupVersion, MigrationStep};
use serde_json::{json, Value};
use starboard_common::ConfigurationError;
use starboard_styles::{BreakpointConfig, ScreenRegistry, StyleDeriver};
use std::sync::Arc;

pub const STATS: &str = "starboard/stats";

const BLOCK_CLASS: &str = "wp-block-stats";
const ALTERNATE_STYLE: &str = "is-style-alternate";

fn default_breakpoints() -> Value {
    json!({ "Default": { "active": true, "settings": {} } })
}

fn grid_tokens(deriver: &StyleDeriver, attrs: &Attributes) -> String {
    let config: BreakpointConfig = attrs.decode("breakpoints").unwrap_or_default();
    deriver.derive(&config).to_class_string()
}

fn shape_v0(screens: &Arc<ScreenRegistry>) -> AttributeShape {
    AttributeShape::new()
        .with_screens(screens.clone())
        .field_with_default("breakpoints", AttributeKind::Breakpoints, default_breakpoints())
}

fn shape_v1(screens: &Arc<ScreenRegistry>) -> AttributeShape {
    shape_v0(screens)
        .field_with_default("statsHeader", AttributeKind::String, "")
        .field_with_default("headingFontSize", AttributeKind::String, "large")
        .field_with_default("className", AttributeKind::String, "")
}

#[derive(Clone, Copy, PartialEq)]
enum GridPlacement {
    InnerWrapper,
    Root,
}

fn render_with_header(deriver: &StyleDeriver, attrs: &Attributes, placement: GridPlacement) -> Vec<Node> {
    let header = attrs.get_str("statsHeader").unwrap_or_default();
    let font_size = attrs.get_str("headingFontSize").unwrap_or_default();
    let class_name = attrs.get_str("className").unwrap_or_default();
    let alternate = class_name.split_whitespace().any(|class| class == ALTERNATE_STYLE);
    let tokens = grid_tokens(deriver, attrs);

    let heading = || {
        Element::new("h3")
            .class(format!("has-{}-font-size", font_size))
            .text(header)
    };

    let mut nodes = Vec::new();

    // The alternate style repeats the header above the block on small screens.
    if alternate && !header.is_empty() {
        nodes.push(
            Element::new("div")
                .class("block md:hidden remove-bottom-spacing w-10/12 offset-1/12")
                .child(heading())
                .into(),
        );
    }

    let mut root = Element::new("div").class(BLOCK_CLASS).class(class_name);
    if placement == GridPlacement::Root {
        root = root.class(&tokens);
    }

    if !header.is_empty() {
        let wrapper = if alternate {
            Element::new("div").class("w-10/12 offset-1/12 hidden md:block")
        } else {
            Element::new("div").class("w-full")
        };
        root = root.child(wrapper.child(heading()));
    }

    if placement == GridPlacement::InnerWrapper {
        root = root.child(Element::new("div").class("stats-wrapper").class(&tokens));
    }

    nodes.push(root.into());
    nodes
}

pub fn schema(deriver: StyleDeriver) -> Result<VersionedSchemaRegistry, ConfigurationError> {
    let screens = deriver.shared_screens();
    let v0_deriver = deriver.clone();
    let v0 = MarkupVersion::new(STATS, shape_v0(&screens), move |attrs| {
        vec![Element::new("div")
            .class(BLOCK_CLASS)
            .class(grid_tokens(&v0_deriver, attrs))
            .into()]
    });

    let v1_deriver = deriver.clone();
    let v1 = MarkupVersion::new(STATS, shape_v1(&screens), move |attrs| {
        render_with_header(&v1_deriver, attrs, GridPlacement::InnerWrapper)
    });

    let v2 = MarkupVersion::new(STATS, shape_v1(&screens), move |attrs| {
        render_with_header(&deriver, attrs, GridPlacement::Root)
    });

    let mut registry = VersionedSchemaRegistry::new(v0);
    registry
        .append(MigrationStep::inject("headingFontSize", "large"), v1)?
        .append(MigrationStep::identity(), v2)?;
    Ok(registry)
}
