//! Core collection operations: save, list, delete, tag enumeration.

use std::{collections::BTreeSet, sync::Arc};

use jiff::Timestamp;
use log::{debug, error};
use serde_json::Value;
use tokio::task;

use super::{epoch_millis, ItemStore, ItemsChanged, ITEMS_KEY};
use crate::{
    error::{join_error, Result, SieveError},
    events::{Subscription, ITEMS_CHANGED},
    models::{ItemFilter, WorkItem},
    stage_model,
};

impl ItemStore {
    /// Saves a new or existing item and returns the stored version.
    ///
    /// An item whose ID is already stored is shallow-merged over the stored
    /// entry and gets a fresh `updated_at`. Any other item is added; it gets
    /// an ID if it has none, and `created_at`/`updated_at` timestamps. In both
    /// cases a missing stage is filled in from the capture type, repeated
    /// user tags are dropped and the `gtd:<stage>` system tag is appended if
    /// missing. Unset optional fields keep their stored value; `tags` always
    /// replaces the stored list. The whole collection is then written back and announced as
    /// `items-changed`.
    ///
    /// # Errors
    ///
    /// Any storage or serialization failure. The failure is logged, nothing
    /// is emitted and the stored collection is whatever the backend kept; the
    /// store never retries.
    pub async fn save_item(&self, item: &WorkItem) -> Result<WorkItem> {
        let result = self.try_save_item(item).await;
        if let Err(ref e) = result {
            error!("Save failed for item {}: {e}", item.id);
        }
        result
    }

    async fn try_save_item(&self, item: &WorkItem) -> Result<WorkItem> {
        let mut items = self.load_items().await?;
        let now = Timestamp::now();

        let existing = (item.id != WorkItem::UNASSIGNED_ID)
            .then(|| items.iter().position(|stored| stored.id == item.id))
            .flatten();

        let stored = match existing {
            Some(index) => {
                let mut merged = merge_fields(&items[index], item)?;
                merged.updated_at = Some(now);
                finalize(&mut merged);
                items[index] = merged.clone();
                merged
            }
            None => {
                let mut created = item.clone();
                if created.id == WorkItem::UNASSIGNED_ID {
                    created.id = next_item_id(&items, now)?;
                }
                created.created_at.get_or_insert(now);
                created.updated_at = Some(now);
                finalize(&mut created);
                items.push(created.clone());
                created
            }
        };

        self.persist_items(&items).await?;
        debug!("Saved item {} at stage {}", stored.id, stored.effective_stage().as_str());

        self.events.emit(ITEMS_CHANGED, &items);
        Ok(stored)
    }

    /// Returns the items matching `filter`, newest `created_at` first.
    ///
    /// Items with equal timestamps keep their stored order. Filtering never
    /// writes.
    pub async fn get_all_items(&self, filter: &ItemFilter) -> Result<Vec<WorkItem>> {
        let mut items = self.load_items().await.map_err(|e| {
            error!("Retrieval failed: {e}");
            e
        })?;

        if !filter.is_empty() {
            items.retain(|item| filter.matches(item));
        }

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    /// Looks up one item by ID.
    pub async fn get_item(&self, id: u64) -> Result<Option<WorkItem>> {
        let items = self.load_items().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    /// Permanently removes the item with `id`.
    ///
    /// Removing an ID that is not stored still succeeds, writes the unchanged
    /// collection and emits `items-changed`.
    pub async fn delete_item(&self, id: u64) -> Result<()> {
        let result = self.try_delete_item(id).await;
        if let Err(ref e) = result {
            error!("Delete failed for item {id}: {e}");
        }
        result
    }

    async fn try_delete_item(&self, id: u64) -> Result<()> {
        let mut items = self.load_items().await?;
        items.retain(|item| item.id != id);

        self.persist_items(&items).await?;
        debug!("Deleted item {id}");

        self.events.emit(ITEMS_CHANGED, &items);
        Ok(())
    }

    /// Every distinct non-empty user tag across all items, sorted.
    pub async fn get_all_tags(&self) -> Result<Vec<String>> {
        let items = self.load_items().await.map_err(|e| {
            error!("Tag retrieval failed: {e}");
            e
        })?;

        let tags: BTreeSet<String> = items
            .into_iter()
            .flat_map(|item| item.tags)
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(tags.into_iter().collect())
    }

    /// Registers `handler` on the store's event bus.
    pub fn on<F>(&self, event: &str, handler: F) -> Subscription<ItemsChanged>
    where
        F: Fn(&ItemsChanged) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.events.subscribe(event, handler)
    }

    /// First ID of a block of new IDs that collide with no stored item.
    pub(crate) async fn next_id_seed(&self) -> Result<u64> {
        let items = self.load_items().await?;
        next_item_id(&items, Timestamp::now())
    }

    /// Reads the whole collection. A missing key is an empty collection.
    pub(crate) async fn load_items(&self) -> Result<Vec<WorkItem>> {
        let storage = Arc::clone(&self.storage);
        let raw = task::spawn_blocking(move || storage.get(ITEMS_KEY))
            .await
            .map_err(join_error)??;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the whole collection in one write.
    pub(crate) async fn persist_items(&self, items: &[WorkItem]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        let storage = Arc::clone(&self.storage);
        task::spawn_blocking(move || storage.set(ITEMS_KEY, &json))
            .await
            .map_err(join_error)?
    }
}

/// Overlays the fields present on `incoming` onto `existing`.
///
/// System tags form an append-only log: if `incoming` does not already extend
/// the stored log, its tags are appended to it instead of replacing it.
fn merge_fields(existing: &WorkItem, incoming: &WorkItem) -> Result<WorkItem> {
    let mut base = serde_json::to_value(existing)?;
    if let (Value::Object(base_fields), Value::Object(overlay)) =
        (&mut base, serde_json::to_value(incoming)?)
    {
        base_fields.extend(overlay);
    }

    let mut merged: WorkItem = serde_json::from_value(base)?;
    if !incoming.system_tags.starts_with(&existing.system_tags) {
        merged.system_tags = existing
            .system_tags
            .iter()
            .chain(&incoming.system_tags)
            .cloned()
            .collect();
    }
    Ok(merged)
}

/// Applies the invariants every stored item satisfies.
fn finalize(item: &mut WorkItem) {
    if item.gtd_stage.is_none() {
        item.gtd_stage = Some(stage_model::default_stage(item.item_type));
    }
    item.dedup_tags();
    item.ensure_stage_tag();
}

/// Current time in milliseconds, bumped past the highest stored ID so two
/// captures in the same millisecond do not collide.
///
/// Fails once `u64::MAX` is stored: no ID above it is left.
fn next_item_id(items: &[WorkItem], now: Timestamp) -> Result<u64> {
    let highest = items.iter().map(|item| item.id).max().unwrap_or(0);
    let next = highest
        .checked_add(1)
        .ok_or_else(|| SieveError::storage(format!("No item ID left above {highest}")))?;
    Ok(epoch_millis(now).max(next))
}
