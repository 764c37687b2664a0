//! The item store: sole authority over persisted work items.
//!
//! Every view reads and writes items through one [`ItemStore`]. The store
//! keeps the whole collection as a single JSON array under
//! [`ITEMS_KEY`] in a [`KeyValueStorage`] and announces every successful
//! write on its [`EventBus`] as [`ITEMS_CHANGED`], carrying the full
//! post-write collection.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Capture/Workflow│───▶│   ItemStore     │───▶│ KeyValueStorage │
//! │    CLI views    │    │ (item_ops,      │    │ (SQLite/memory) │
//! └─────────────────┘    │  item_handlers) │    └─────────────────┘
//!          ▲             └────────┬────────┘
//!          │     items-changed    │
//!          └──────────────────────┘
//! ```
//!
//! Each operation loads the collection, changes it and writes it back as two
//! separate storage calls. There is no locking between them: two writers
//! racing on the same storage both succeed and the later write wins for the
//! whole collection.
//!
//! [`ITEMS_CHANGED`]: crate::events::ITEMS_CHANGED

use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    events::EventBus,
    models::WorkItem,
    storage::KeyValueStorage,
};

pub mod builder;
pub mod item_handlers;
pub mod item_ops;

#[cfg(test)]
mod tests;

pub use builder::ItemStoreBuilder;

/// Storage key holding the item collection.
pub const ITEMS_KEY: &str = "capturedItems";

/// Payload of the items-changed event.
pub type ItemsChanged = Vec<WorkItem>;

/// Handle to the item collection.
///
/// Clones share the same storage and the same event bus.
#[derive(Clone)]
pub struct ItemStore {
    pub(crate) storage: Arc<dyn KeyValueStorage>,
    pub(crate) events: EventBus<ItemsChanged>,
}

impl ItemStore {
    /// Creates a store over `storage` with a fresh event bus.
    pub(crate) fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            events: EventBus::new(),
        }
    }

    /// The bus on which the store announces writes.
    pub fn events(&self) -> &EventBus<ItemsChanged> {
        &self.events
    }
}

/// Milliseconds since the Unix epoch, the unit item IDs are minted in.
pub(crate) fn epoch_millis(at: Timestamp) -> u64 {
    u64::try_from(at.as_millisecond()).unwrap_or(0)
}
