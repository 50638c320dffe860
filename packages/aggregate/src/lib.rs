//! # Starboard Aggregate
//!
//! Child blocks report a summary of themselves into an [`AggregateStore`];
//! observers (such as the FAQ container) rebuild derived data from the full
//! list whenever it changes.

mod schema;
mod store;

pub use schema::{FaqAnswer, FaqPageSchema, FaqQuestion};
pub use store::{AggregateStore, ItemRecord, ItemSummary, Observer, SubscriptionId};
