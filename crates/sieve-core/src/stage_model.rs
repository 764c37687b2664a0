//! Pure stage mapping.
//!
//! Nothing in this module touches storage. [`default_stage`] picks the stage
//! of an item saved without one, and [`plan_transition`] turns a workflow
//! [`Decision`] about an item into the [`Transition`] the workflow then
//! persists through the store.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SieveError},
    models::{GtdStage, ItemType, WorkItem},
};

/// Marker appended when an item is finished under the two-minute rule.
pub const TWO_MINUTE_RULE_TAG: &str = "gtd:two-minute-rule";
/// Marker on an item whose brainstorm was split into next actions.
pub const BRAINSTORM_SOURCE_TAG: &str = "brainstorm-source";
/// Marker on next actions created from a brainstorm.
pub const FROM_BRAINSTORM_TAG: &str = "from-brainstorm";

const NEXT_ACTION_TITLE_CHARS: usize = 50;

/// Stage given to an item saved without one, based on its capture type.
///
/// ```rust
/// use sieve_core::{models::{GtdStage, ItemType}, stage_model::default_stage};
///
/// assert_eq!(default_stage(Some(ItemType::Completed)), GtdStage::Completed);
/// assert_eq!(default_stage(Some(ItemType::Waiting)), GtdStage::WaitingFor);
/// assert_eq!(default_stage(Some(ItemType::InProgress)), GtdStage::Inbox);
/// assert_eq!(default_stage(None), GtdStage::Inbox);
/// ```
pub fn default_stage(item_type: Option<ItemType>) -> GtdStage {
    match item_type {
        Some(ItemType::Completed) => GtdStage::Completed,
        Some(ItemType::Waiting) => GtdStage::WaitingFor,
        Some(ItemType::Todo | ItemType::InProgress) | None => GtdStage::Inbox,
    }
}

/// Which stage a delegated item lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DelegationMode {
    /// Already handed off; record who it waits on (`waiting-for`)
    WaitingFor,
    /// Still has to be handed off (`to-delegate`)
    #[default]
    ToDelegate,
}

/// Details captured by the delegation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    /// Person the work goes to; required
    pub to: String,
    /// Follow-up date
    pub follow_up: Option<Date>,
    /// Free-form notes appended to the item text
    pub notes: Option<String>,
    pub mode: DelegationMode,
}

/// A terminal answer to the processing questions for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum Decision {
    /// Not actionable, not needed: delete the item
    Trash,
    /// Not actionable, keep for information
    Reference,
    /// Not actionable now, maybe later
    Someday,
    /// Actionable, the next step is decided later
    MarkActionable,
    /// Takes under two minutes and was done right away
    DoNow,
    /// The user will do it
    NextAction,
    /// Someone else will do it
    Delegate(Delegation),
    /// Needs more thought; keep the notes so far
    Brainstorm { notes: Option<String> },
    /// Thought through: file the item as reference and split out next actions
    ConvertBrainstorm {
        notes: Option<String>,
        next_actions: Vec<String>,
    },
}

impl Decision {
    /// Stage the decided item ends up in; `None` for trash.
    pub fn target_stage(&self) -> Option<GtdStage> {
        match self {
            Decision::Trash => None,
            Decision::Reference | Decision::ConvertBrainstorm { .. } => Some(GtdStage::Reference),
            Decision::Someday => Some(GtdStage::Someday),
            Decision::MarkActionable => Some(GtdStage::Actionable),
            Decision::DoNow => Some(GtdStage::Completed),
            Decision::NextAction => Some(GtdStage::NextActions),
            Decision::Delegate(delegation) => Some(match delegation.mode {
                DelegationMode::WaitingFor => GtdStage::WaitingFor,
                DelegationMode::ToDelegate => GtdStage::ToDelegate,
            }),
            Decision::Brainstorm { .. } => Some(GtdStage::Brainstorm),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Decision::Trash => "trash",
            Decision::Reference => "reference",
            Decision::Someday => "someday",
            Decision::MarkActionable => "actionable",
            Decision::DoNow => "do-now",
            Decision::NextAction => "next-action",
            Decision::Delegate(_) => "delegate",
            Decision::Brainstorm { .. } => "brainstorm",
            Decision::ConvertBrainstorm { .. } => "convert-brainstorm",
        }
    }
}

/// What the workflow has to write for a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Permanently remove the item
    Delete { id: u64 },
    /// Save the updated item
    Update(WorkItem),
    /// Save the updated source item, then each derived next action
    Split {
        source: WorkItem,
        next_actions: Vec<WorkItem>,
    },
}

/// Computes the result of applying `decision` to `item`.
///
/// `now` stamps `reviewed_at` and the timestamps of derived items. Derived
/// items get the IDs `id_seed`, `id_seed + 1`, ... in input order.
///
/// # Errors
///
/// `SieveError::InvalidInput` when a delegation has no delegate name or a
/// brainstorm conversion has no non-empty next action. Nothing is written in
/// that case.
pub fn plan_transition(
    item: &WorkItem,
    decision: &Decision,
    now: Timestamp,
    id_seed: u64,
) -> Result<Transition> {
    let mut updated = item.clone();
    updated.reviewed_at = Some(now);

    match decision {
        Decision::Trash => return Ok(Transition::Delete { id: item.id }),
        Decision::Reference => move_to(&mut updated, GtdStage::Reference),
        Decision::Someday => move_to(&mut updated, GtdStage::Someday),
        Decision::MarkActionable => move_to(&mut updated, GtdStage::Actionable),
        Decision::DoNow => {
            move_to(&mut updated, GtdStage::Completed);
            updated.item_type = Some(ItemType::Completed);
            updated.push_system_tag(TWO_MINUTE_RULE_TAG);
        }
        Decision::NextAction => {
            move_to(&mut updated, GtdStage::NextActions);
            updated.item_type = Some(ItemType::InProgress);
        }
        Decision::Delegate(delegation) => apply_delegation(&mut updated, delegation)?,
        Decision::Brainstorm { notes } => {
            move_to(&mut updated, GtdStage::Brainstorm);
            updated.item_type = Some(ItemType::InProgress);
            if let Some(notes) = non_empty(notes.as_deref()) {
                updated.brainstorm_notes = Some(notes.to_string());
                updated.append_text(&format!("--- Brainstorm Notes ---\n{notes}"));
            }
        }
        Decision::ConvertBrainstorm {
            notes,
            next_actions,
        } => {
            let actions: Vec<&str> = next_actions
                .iter()
                .filter_map(|action| non_empty(Some(action)))
                .collect();
            if actions.is_empty() {
                return Err(SieveError::invalid_input("next_actions")
                    .with_reason("At least one next action is required to convert a brainstorm"));
            }

            move_to(&mut updated, GtdStage::Reference);
            updated.push_system_tag(BRAINSTORM_SOURCE_TAG);
            if let Some(notes) = non_empty(notes.as_deref()) {
                updated.brainstorm_notes = Some(notes.to_string());
                updated.append_text(&format!("--- Brainstorm Notes ---\n{notes}"));
            }

            let last_offset = actions.len() as u64 - 1;
            if id_seed.checked_add(last_offset).is_none() {
                return Err(SieveError::storage(format!(
                    "No free IDs left for {} next actions",
                    actions.len()
                )));
            }
            let next_actions = actions
                .into_iter()
                .enumerate()
                .map(|(offset, action)| {
                    derived_next_action(item, action, id_seed + offset as u64, now)
                })
                .collect();

            return Ok(Transition::Split {
                source: updated,
                next_actions,
            });
        }
    }

    Ok(Transition::Update(updated))
}

/// Sets the stage and records the visit in the system tag log.
fn move_to(item: &mut WorkItem, stage: GtdStage) {
    item.gtd_stage = Some(stage);
    item.push_system_tag(stage.system_tag());
}

fn apply_delegation(item: &mut WorkItem, delegation: &Delegation) -> Result<()> {
    let Some(person) = non_empty(Some(&delegation.to)) else {
        return Err(SieveError::invalid_input("delegate_to")
            .with_reason("Please enter who this should be delegated to"));
    };
    let follow_up = delegation
        .follow_up
        .map_or_else(|| "not set".to_string(), |date| date.to_string());
    let notes = non_empty(delegation.notes.as_deref());

    item.item_type = Some(ItemType::Waiting);
    match delegation.mode {
        DelegationMode::WaitingFor => {
            move_to(item, GtdStage::WaitingFor);
            item.waiting_for = Some(person.to_string());
            item.waiting_until = delegation.follow_up;
            if let Some(notes) = notes {
                item.append_text(&format!(
                    "Waiting for: {person}\nFollow up: {follow_up}\nNotes: {notes}"
                ));
            }
        }
        DelegationMode::ToDelegate => {
            move_to(item, GtdStage::ToDelegate);
            item.delegate_to = Some(person.to_string());
            item.delegate_date = delegation.follow_up;
            if let Some(notes) = notes {
                item.append_text(&format!("--- Delegation Notes ---\n{notes}"));
            }
        }
    }
    Ok(())
}

fn derived_next_action(source: &WorkItem, action: &str, id: u64, now: Timestamp) -> WorkItem {
    let mut title: String = action.chars().take(NEXT_ACTION_TITLE_CHARS).collect();
    if action.chars().count() > NEXT_ACTION_TITLE_CHARS {
        title.push_str("...");
    }

    WorkItem {
        id,
        item_type: Some(ItemType::InProgress),
        gtd_stage: Some(GtdStage::NextActions),
        title: Some(format!("Next Action: {title}")),
        text: Some(action.to_string()),
        url: source.url.clone(),
        screenshot: source.screenshot.clone(),
        system_tags: vec![
            GtdStage::NextActions.system_tag(),
            FROM_BRAINSTORM_TAG.to_string(),
        ],
        source_item_id: Some(source.id),
        created_at: Some(now),
        updated_at: Some(now),
        ..Default::default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
