//! Parameter structures for sieve operations.
//!
//! These structures carry user input from an interface layer (the CLI today)
//! into the store and workflow without any framework-specific derives. The
//! CLI defines its own clap wrappers and converts them with `From` impls:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │───▶│ Store/Workflow  │
//! │  (clap derives) │    │ (serde derives) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{GtdStage, ItemType};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the item to operate on
    pub id: u64,
}

/// Parameters for listing items.
///
/// Every field is optional; unset fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItems {
    /// Only items captured with this type
    pub item_type: Option<ItemType>,
    /// Only items carrying this user or system tag
    pub tag: Option<String>,
    /// Only items in this stage
    pub stage: Option<GtdStage>,
    /// Only items whose title, text or a tag contains this text, ignoring case
    pub search: Option<String>,
}

/// User-supplied part of a capture.
///
/// The page URL, title and screenshot come from a
/// [`crate::capture::TabSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureItem {
    /// Capture type chosen by the user
    pub item_type: ItemType,
    /// Optional free-text description
    pub text: Option<String>,
    /// Optional user tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameters for editing an item.
///
/// Only provided fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItem {
    /// The ID of the item to update
    pub id: u64,
    /// New description
    pub text: Option<String>,
    /// New capture type
    pub item_type: Option<ItemType>,
    /// New stage, filed directly without the decision tree
    pub stage: Option<GtdStage>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

/// Parameters for adding or removing one user tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagItem {
    /// The ID of the item to tag
    pub id: u64,
    /// Tag name
    pub tag: String,
}

/// Parameters for permanently deleting an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItem {
    /// The ID of the item to delete
    pub id: u64,
    /// Must be true; deletion cannot be undone
    pub confirmed: bool,
}
