//! Persisting workflow decisions through the item store.

use std::fmt;

use jiff::Timestamp;
use log::info;

use crate::{
    display::{DeleteResult, Notice, SplitResult},
    error::Result,
    models::WorkItem,
    stage_model::{self, Decision, Transition},
    store::ItemStore,
};

/// What a decision did to the stored collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The item was removed; holds it as it was before deletion
    Deleted(WorkItem),
    /// The item was saved in its new stage
    Updated(WorkItem),
    /// The item was filed and next actions were created from it
    Split {
        source: WorkItem,
        next_actions: Vec<WorkItem>,
    },
}

/// A decision that has been written.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub decision: Decision,
    pub outcome: Outcome,
}

impl Applied {
    /// The confirmation to show the user.
    pub fn notice(&self) -> Notice {
        let message = match (&self.decision, &self.outcome) {
            (_, Outcome::Split { next_actions, .. }) => format!(
                "Created {} next actions from your brainstorm",
                next_actions.len()
            ),
            (Decision::Trash, _) => "Item moved to trash".to_string(),
            (Decision::Reference, _) => "Item saved as Reference".to_string(),
            (Decision::Someday, _) => "Item deferred to Someday/Maybe".to_string(),
            (Decision::MarkActionable, _) => "Item marked as actionable".to_string(),
            (Decision::DoNow, _) => "Item marked as completed".to_string(),
            (Decision::NextAction, _) => "Item moved to Next Actions".to_string(),
            (Decision::Delegate(delegation), _) => {
                format!("Item delegated to {}", delegation.to.trim())
            }
            (Decision::Brainstorm { .. }, Outcome::Updated(item))
                if item.brainstorm_notes.is_some() =>
            {
                "Item saved to Brainstorm with your notes".to_string()
            }
            (Decision::Brainstorm { .. } | Decision::ConvertBrainstorm { .. }, _) => {
                "Item moved to Brainstorm".to_string()
            }
        };
        Notice::success(message)
    }
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notice())?;
        writeln!(f)?;
        match &self.outcome {
            Outcome::Deleted(item) => write!(f, "{}", DeleteResult::new(item.clone())),
            Outcome::Updated(item) => write!(f, "{item}"),
            Outcome::Split {
                source,
                next_actions,
            } => write!(
                f,
                "{}",
                SplitResult {
                    source: source.clone(),
                    next_actions: next_actions.clone(),
                }
            ),
        }
    }
}

/// Applies decisions to items. Every write goes through the [`ItemStore`].
#[derive(Clone)]
pub struct Processor {
    store: ItemStore,
}

impl Processor {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Writes the effect of `decision` on `item`.
    ///
    /// A brainstorm conversion saves the filed source item first and then
    /// each next action; a failure part way leaves the earlier writes in
    /// place.
    ///
    /// # Errors
    ///
    /// `SieveError::InvalidInput` when the decision is incomplete, in which
    /// case nothing is written, or the store's error for a failed write.
    pub async fn apply(&self, item: &WorkItem, decision: &Decision) -> Result<Applied> {
        let id_seed = match decision {
            Decision::ConvertBrainstorm { .. } => self.store.next_id_seed().await?,
            _ => WorkItem::UNASSIGNED_ID,
        };
        let transition = stage_model::plan_transition(item, decision, Timestamp::now(), id_seed)?;

        let outcome = match transition {
            Transition::Delete { id } => {
                self.store.delete_item(id).await?;
                Outcome::Deleted(item.clone())
            }
            Transition::Update(updated) => Outcome::Updated(self.store.save_item(&updated).await?),
            Transition::Split {
                source,
                next_actions,
            } => {
                let source = self.store.save_item(&source).await?;
                let mut created = Vec::with_capacity(next_actions.len());
                for action in &next_actions {
                    created.push(self.store.save_item(action).await?);
                }
                Outcome::Split {
                    source,
                    next_actions: created,
                }
            }
        };

        info!("Applied '{}' to item {}", decision.name(), item.id);
        Ok(Applied {
            decision: decision.clone(),
            outcome,
        })
    }

    /// Looks up item `id` and applies `decision` to it.
    ///
    /// # Errors
    ///
    /// `SieveError::ItemNotFound` for an unknown ID, otherwise as
    /// [`Processor::apply`].
    pub async fn file(&self, id: u64, decision: &Decision) -> Result<Applied> {
        let item = self.store.require_item(id).await?;
        self.apply(&item, decision).await
    }
}
