//! # Starboard Styles
//!
//! Responsive style derivation for Starboard blocks.
//!
//! ```text
//! ScreenRegistry ──┐
//!                  ├─► StyleDeriver::derive(&BreakpointConfig) ─► StyleTokens
//! RuleSet ─────────┘
//! ```
//!
//! Editing sessions mutate a [`BreakpointConfigStore`]; tokens are recomputed
//! from its config on every read.

mod breakpoints;
mod config;
mod deriver;
mod rules;
mod screens;

pub use breakpoints::{
    BreakpointConfig, BreakpointConfigStore, BreakpointEntry, BreakpointPatch, ScreenSettings,
    SettingValue, UnknownScreenError,
};
pub use config::{ScreenEntry, StyleConfig, Width, DEFAULT_CONFIG_NAME};
pub use deriver::{StyleDeriver, StyleTokens};
pub use rules::{ColumnsRule, OffsetRule, PerRowRule, RuleDefaults, RuleSet, StyleRule};
pub use screens::{Screen, ScreenRegistry, DEFAULT_SCREEN, TAILWIND_SCREENS};
