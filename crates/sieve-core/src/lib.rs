//! Core library for the sieve GTD capture tool.
//!
//! Pages are captured into a single persisted collection of work items and
//! then moved through the Getting Things Done stages (inbox, next actions,
//! waiting for, someday, reference, completed, ...) one decision at a time.
//!
//! # Architecture
//!
//! - [`store`]: the [`ItemStore`], sole owner of the persisted collection,
//!   announcing every write on an [`events::EventBus`]
//! - [`stage_model`]: pure mapping from capture types and workflow decisions
//!   to stages and system tags
//! - [`capture`]: turning the current page into a new item
//! - [`workflow`]: the processing questions, the processor writing decisions
//!   and the inbox session
//! - [`completion`]: follow-up questions for completed items
//! - [`display`]: markdown `Display` wrappers for every interface
//!
//! # Quick Start
//!
//! ```rust
//! use sieve_core::{
//!     capture::{capture, CapturedTab},
//!     models::{GtdStage, ItemFilter, ItemType},
//!     params::CaptureItem,
//!     stage_model::Decision,
//!     workflow::Processor,
//!     ItemStoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ItemStoreBuilder::new().in_memory().build().await?;
//!
//! let tab = CapturedTab {
//!     url: "https://example.com".to_string(),
//!     title: "Example".to_string(),
//!     screenshot: None,
//! };
//! let params = CaptureItem { item_type: ItemType::Todo, text: None, tags: vec![] };
//! let item = capture(&store, &tab, &params).await?;
//!
//! let processor = Processor::new(store.clone());
//! processor.apply(&item, &Decision::Someday).await?;
//!
//! let someday = store.get_all_items(&ItemFilter::for_stage(GtdStage::Someday)).await?;
//! assert_eq!(someday.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod completion;
pub mod db;
pub mod display;
pub mod error;
pub mod events;
pub mod models;
pub mod params;
pub mod stage_model;
pub mod storage;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, DeleteResult, Items, Notice, Tags, UpdateResult};
pub use error::{Result, SieveError};
pub use events::{EventBus, HandlerId, Subscription, ITEMS_CHANGED};
pub use models::{GtdStage, ItemFilter, ItemType, StageCounts, WorkItem};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use store::{ItemStore, ItemStoreBuilder};
pub use workflow::{InboxSession, Processor};
