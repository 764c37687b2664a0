//! Filter types for querying work items.

use super::{GtdStage, ItemType, WorkItem};

/// Read-side projection applied by [`crate::ItemStore::get_all_items`].
///
/// All set criteria must match. An empty filter matches every item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Exact capture type
    pub item_type: Option<ItemType>,

    /// Tag present in either the user tags or the system tags
    pub tag: Option<String>,

    /// Exact stage, with a missing stage reading as inbox
    pub stage: Option<GtdStage>,

    /// Case-insensitive substring of the title, the text or a user tag
    pub search: Option<String>,
}

impl ItemFilter {
    /// Filter selecting a single stage.
    ///
    /// ```rust
    /// use sieve_core::models::{GtdStage, ItemFilter};
    ///
    /// let filter = ItemFilter::for_stage(GtdStage::Inbox);
    /// assert_eq!(filter.stage, Some(GtdStage::Inbox));
    /// assert!(filter.tag.is_none());
    /// ```
    pub fn for_stage(stage: GtdStage) -> Self {
        Self {
            stage: Some(stage),
            ..Default::default()
        }
    }

    /// Filter selecting items carrying a tag.
    pub fn for_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.item_type.is_none()
            && self.tag.is_none()
            && self.stage.is_none()
            && self.search.is_none()
    }

    /// Whether `item` satisfies every set criterion.
    pub fn matches(&self, item: &WorkItem) -> bool {
        if let Some(item_type) = self.item_type {
            if item.item_type != Some(item_type) {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            if !item.has_tag(tag) {
                return false;
            }
        }

        if let Some(stage) = self.stage {
            if item.effective_stage() != stage {
                return false;
            }
        }

        if let Some(ref term) = self.search {
            if !mentions(item, &term.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

fn mentions(item: &WorkItem, term: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);
    item.title.as_deref().is_some_and(contains)
        || item.text.as_deref().is_some_and(contains)
        || item.tags.iter().any(|tag| contains(tag))
}

impl From<&crate::params::ListItems> for ItemFilter {
    fn from(params: &crate::params::ListItems) -> Self {
        Self {
            item_type: params.item_type,
            tag: params.tag.clone(),
            stage: params.stage,
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(String::from),
        }
    }
}
