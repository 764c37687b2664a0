//! Processing a queue of inbox items one decision at a time.

use log::{info, warn};

use super::{
    processor::Processor,
    tree::{Answer, DecisionTree, Question, Step},
};
use crate::{
    display::Notice,
    error::{Result, SieveError},
    models::{GtdStage, ItemFilter, WorkItem},
    stage_model::DelegationMode,
};

/// Result of answering a question in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// The same item needs another answer
    Asked(Question),
    /// The item is done; the session moved on
    Done(Notice),
}

/// Tally of a session so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// A queue of items walked through the decision tree.
///
/// The session moves to the next item after every written decision, every
/// skip and every failed write. An answer that does not fit the question, or
/// a decision missing required input, is returned as an error and the
/// session stays where it is.
pub struct InboxSession {
    processor: Processor,
    queue: Vec<WorkItem>,
    position: usize,
    tree: DecisionTree,
    summary: SessionSummary,
}

impl InboxSession {
    /// Starts a session over every item currently in the inbox, newest first.
    pub async fn start(processor: Processor, mode: DelegationMode) -> Result<Self> {
        let queue = processor
            .store()
            .get_all_items(&ItemFilter::for_stage(GtdStage::Inbox))
            .await?;
        info!("Starting inbox session with {} items", queue.len());
        Ok(Self::with_queue(processor, queue, mode))
    }

    /// Starts a session over the given items.
    pub fn with_queue(processor: Processor, queue: Vec<WorkItem>, mode: DelegationMode) -> Self {
        Self {
            processor,
            queue,
            position: 0,
            tree: DecisionTree::new(mode),
            summary: SessionSummary::default(),
        }
    }

    /// Item being processed, `None` once the queue is exhausted.
    pub fn current(&self) -> Option<&WorkItem> {
        self.queue.get(self.position)
    }

    /// Zero-based index of the current item.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Question awaiting an answer for the current item.
    pub fn question(&self) -> Question {
        self.tree.current()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Goes back one question for the current item.
    pub fn back(&mut self) -> Question {
        self.tree.back()
    }

    /// Leaves the current item unchanged and moves on.
    pub fn skip(&mut self) -> Notice {
        let Some(item) = self.current() else {
            return Notice::info("No items left to process");
        };
        let message = format!("Skipped '{}'", item.display_title());
        self.summary.skipped += 1;
        self.advance();
        Notice::info(message)
    }

    /// Answers the current question for the current item.
    ///
    /// # Errors
    ///
    /// `SieveError::InvalidInput` for an answer that does not fit, a decision
    /// missing required input, or a finished session. Storage failures are
    /// not errors here: they come back as an error [`Notice`] and the session
    /// moves on.
    pub async fn answer(&mut self, answer: Answer) -> Result<Progress> {
        let Some(item) = self.current().cloned() else {
            return Err(SieveError::invalid_input("session")
                .with_reason("No items left to process"));
        };

        let decision = match self.tree.answer(answer)? {
            Step::Ask(question) => return Ok(Progress::Asked(question)),
            Step::Decide(decision) => decision,
        };

        match self.processor.apply(&item, &decision).await {
            Ok(applied) => {
                self.summary.processed += 1;
                self.advance();
                Ok(Progress::Done(applied.notice()))
            }
            Err(e) if e.is_validation() => Err(e),
            Err(e) => {
                warn!("Processing item {} failed: {e}", item.id);
                self.summary.failed += 1;
                self.advance();
                Ok(Progress::Done(Notice::error(format!(
                    "Failed to process item: {e}"
                ))))
            }
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.tree.reset();
    }
}
