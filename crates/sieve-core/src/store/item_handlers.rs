//! Item handler operations that return formatted wrapper types for the store.

use super::ItemStore;
use crate::{
    display::{Items, UpdateResult},
    error::{Result, SieveError},
    models::{ItemFilter, StageCounts, WorkItem},
    params::{DeleteItem, Id, ListItems, TagItem, UpdateItem},
};

impl ItemStore {
    /// Handle listing items with optional type, tag, stage and text filters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use sieve_core::{params::ListItems, ItemStoreBuilder};
    /// # async fn example() -> sieve_core::Result<()> {
    /// let store = ItemStoreBuilder::new().in_memory().build().await?;
    /// let items = store.list_items(&ListItems::default()).await?;
    /// assert!(items.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_items(&self, params: &ListItems) -> Result<Items> {
        let filter = ItemFilter::from(params);
        Ok(Items(self.get_all_items(&filter).await?))
    }

    /// Handle showing a single item.
    ///
    /// # Errors
    ///
    /// Returns `SieveError::ItemNotFound` if no item has the ID.
    pub async fn show_item(&self, params: &Id) -> Result<WorkItem> {
        self.require_item(params.id).await
    }

    /// Handle editing an item's text, type, stage or tags.
    ///
    /// A stage set here is filed directly: the stage tag is appended like any
    /// other transition, but no workflow side effects apply.
    ///
    /// # Errors
    ///
    /// Returns `SieveError::ItemNotFound` if no item has the ID, or the
    /// underlying save error.
    pub async fn update_item(&self, params: &UpdateItem) -> Result<UpdateResult<WorkItem>> {
        let mut item = self.require_item(params.id).await?;
        let mut changes = Vec::new();

        if let Some(text) = &params.text {
            item.text = Some(text.clone());
            changes.push("Updated text".to_string());
        }

        if let Some(item_type) = params.item_type {
            if item.item_type != Some(item_type) {
                item.item_type = Some(item_type);
                changes.push(format!("Changed type to {}", item_type.as_str()));
            }
        }

        if let Some(stage) = params.stage {
            if item.gtd_stage != Some(stage) {
                item.gtd_stage = Some(stage);
                item.push_system_tag(stage.system_tag());
                changes.push(format!("Moved to {}", stage.label()));
            }
        }

        if let Some(tags) = &params.tags {
            item.tags = tags
                .iter()
                .filter_map(|tag| normalize_tag(tag))
                .collect();
            changes.push("Replaced tags".to_string());
        }

        let saved = self.save_item(&item).await?;
        Ok(UpdateResult::with_changes(saved, changes))
    }

    /// Handle adding a user tag to an item.
    ///
    /// Adding a tag the item already has is not an error and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidInput` for a blank tag and
    /// `SieveError::ItemNotFound` if no item has the ID.
    pub async fn add_tag(&self, params: &TagItem) -> Result<WorkItem> {
        let tag = require_tag(&params.tag)?;
        let mut item = self.require_item(params.id).await?;

        if !item.add_tag(tag) {
            return Ok(item);
        }
        self.save_item(&item).await
    }

    /// Handle removing a user tag from an item.
    ///
    /// System tags cannot be removed this way.
    pub async fn remove_tag(&self, params: &TagItem) -> Result<WorkItem> {
        let tag = require_tag(&params.tag)?;
        let mut item = self.require_item(params.id).await?;

        if !item.remove_tag(tag) {
            return Ok(item);
        }
        self.save_item(&item).await
    }

    /// Handle permanently deleting an item with confirmation.
    ///
    /// Returns the deleted item, or `None` if no item had the ID. The
    /// collection is written back in both cases.
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidInput` if `confirmed` is false.
    pub async fn delete_item_confirmed(&self, params: &DeleteItem) -> Result<Option<WorkItem>> {
        if !params.confirmed {
            return Err(SieveError::invalid_input("confirmed").with_reason(
                "Item deletion cannot be undone. Set 'confirmed' to true to proceed.",
            ));
        }

        let item = self.get_item(params.id).await?;
        self.delete_item(params.id).await?;
        Ok(item)
    }

    /// Handle counting items per stage.
    pub async fn stage_counts(&self) -> Result<StageCounts> {
        let items = self.get_all_items(&ItemFilter::default()).await?;
        Ok(StageCounts::from_items(&items))
    }

    /// Loads one item or fails with `ItemNotFound`.
    pub(crate) async fn require_item(&self, id: u64) -> Result<WorkItem> {
        self.get_item(id)
            .await?
            .ok_or(SieveError::ItemNotFound { id })
    }
}

/// Trims a user tag; blank tags are dropped.
pub(crate) fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

fn require_tag(tag: &str) -> Result<&str> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(SieveError::invalid_input("tag").with_reason("Tag cannot be empty"));
    }
    Ok(trimmed)
}
