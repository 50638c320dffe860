//! Id-keyed summaries of child items, kept in last-write order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What a child item reports about itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn Fn(&[ItemSummary]) + Send + Sync>;

#[derive(Default)]
pub struct AggregateStore {
    items: Vec<ItemSummary>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the summary for `id` and move it to the end.
    ///
    /// Repeating the latest write unchanged (same id, title and content, already
    /// last) leaves the list as it was and does not notify observers.
    pub fn add_or_update(&mut self, id: impl Into<String>, record: ItemRecord) {
        let id = id.into();
        let summary = ItemSummary {
            id,
            title: record.title,
            content: record.content,
        };

        match self.items.iter().position(|item| item.id == summary.id) {
            Some(index) => {
                if index + 1 == self.items.len() && self.items[index] == summary {
                    trace!(id = %summary.id, "Item unchanged");
                    return;
                }
                self.items.remove(index);
            }
            None => debug!(id = %summary.id, "Adding item"),
        }

        self.items.push(summary);
        self.broadcast();
    }

    /// Drop the summary for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }

        debug!(id, "Removed item");
        self.broadcast();
        true
    }

    pub fn get(&self, id: &str) -> Option<&ItemSummary> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn list(&self) -> &[ItemSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Register an observer, called with the full list after every change
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn broadcast(&self) {
        for (_, observer) in &self.observers {
            observer(&self.items);
        }
    }
}

impl std::fmt::Debug for AggregateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateStore")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}
