//! GTD processing: moving items out of the inbox one decision at a time.
//!
//! ```text
//! ┌──────────────┐  Answer  ┌──────────────┐ Decision ┌──────────────┐
//! │ InboxSession │─────────▶│ DecisionTree │─────────▶│  Processor   │
//! │ (queue)      │          │ (questions)  │          │ (stage_model │
//! └──────────────┘          └──────────────┘          │  + ItemStore)│
//!                                                     └──────────────┘
//! ```
//!
//! The [`DecisionTree`] asks the questions, [`crate::stage_model`] computes
//! what a decision means for the item and the [`Processor`] writes it through
//! the store. [`InboxSession`] runs that loop over every inbox item.

pub mod processor;
pub mod session;
pub mod tree;

pub use processor::{Applied, Outcome, Processor};
pub use session::{InboxSession, Progress, SessionSummary};
pub use tree::{Answer, DecisionTree, Question, Step};
