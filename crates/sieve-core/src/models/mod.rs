//! Data models for captured work items.
//!
//! [`WorkItem`] is the only persisted entity. Stages and capture types are
//! type-safe enums that serialize to the strings stored on disk. Display
//! implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use sieve_core::models::{GtdStage, ItemType, WorkItem};
//!
//! let item = WorkItem {
//!     item_type: Some(ItemType::Todo),
//!     title: Some("Rust book".to_string()),
//!     ..Default::default()
//! };
//!
//! // Items without a stage are in the inbox.
//! assert_eq!(item.effective_stage(), GtdStage::Inbox);
//! ```

pub mod counts;
pub mod filters;
pub mod item;
pub mod stage;


pub use counts::StageCounts;
pub use filters::ItemFilter;
pub use item::WorkItem;
pub use stage::{GtdStage, ItemType};
