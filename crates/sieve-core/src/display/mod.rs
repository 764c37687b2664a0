//! Display wrappers and `Display` implementations.
//!
//! Domain models implement `Display` directly (see [`models`]); lists and
//! operation outcomes are wrapped in newtypes so every interface prints them
//! the same way. All output is markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Markdown      │
//! │ (WorkItem, ...) │───▶│ (Items, Notice) │───▶│  (termimad)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use sieve_core::display::{Notice, Tags};
//!
//! let tags = Tags(vec!["reading".to_string()]);
//! assert_eq!(tags.to_string(), "- reading\n");
//!
//! let notice = Notice::success("Item saved as Reference");
//! assert_eq!(notice.to_string(), "Success: Item saved as Reference\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Items, Tags};
pub use datetime::{LocalDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, SplitResult, UpdateResult};
pub use status::{Notice, Severity};
