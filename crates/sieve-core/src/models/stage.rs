//! Stage and capture-type enumerations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of a work item in the GTD workflow.
///
/// Declaration order is the order stages are listed in counts and menus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum GtdStage {
    /// Captured but not yet processed
    Inbox,
    /// Judged actionable, next step not decided yet
    Actionable,
    /// Something the user will do personally
    NextActions,
    /// Handed to someone else, waiting on them
    WaitingFor,
    /// Should be handed to someone else
    ToDelegate,
    /// Handed off, no follow-up recorded
    Delegated,
    /// Needs more thought before it can be acted on
    Brainstorm,
    /// Might be done later
    Someday,
    /// Kept for information only
    Reference,
    /// Done
    Completed,
}

impl GtdStage {
    /// Every stage, in display order.
    pub const ALL: [GtdStage; 10] = [
        GtdStage::Inbox,
        GtdStage::Actionable,
        GtdStage::NextActions,
        GtdStage::WaitingFor,
        GtdStage::ToDelegate,
        GtdStage::Delegated,
        GtdStage::Brainstorm,
        GtdStage::Someday,
        GtdStage::Reference,
        GtdStage::Completed,
    ];

    /// Stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GtdStage::Inbox => "inbox",
            GtdStage::Actionable => "actionable",
            GtdStage::NextActions => "next-actions",
            GtdStage::WaitingFor => "waiting-for",
            GtdStage::ToDelegate => "to-delegate",
            GtdStage::Delegated => "delegated",
            GtdStage::Brainstorm => "brainstorm",
            GtdStage::Someday => "someday",
            GtdStage::Reference => "reference",
            GtdStage::Completed => "completed",
        }
    }

    /// Human readable name used in headings and notices.
    pub fn label(&self) -> &'static str {
        match self {
            GtdStage::Inbox => "Inbox",
            GtdStage::Actionable => "Actionable",
            GtdStage::NextActions => "Next Actions",
            GtdStage::WaitingFor => "Waiting For",
            GtdStage::ToDelegate => "To Delegate",
            GtdStage::Delegated => "Delegated",
            GtdStage::Brainstorm => "Brainstorm",
            GtdStage::Someday => "Someday/Maybe",
            GtdStage::Reference => "Reference",
            GtdStage::Completed => "Completed",
        }
    }

    /// The `gtd:<stage>` system tag recording a visit to this stage.
    ///
    /// ```rust
    /// use sieve_core::models::GtdStage;
    ///
    /// assert_eq!(GtdStage::NextActions.system_tag(), "gtd:next-actions");
    /// ```
    pub fn system_tag(&self) -> String {
        format!("gtd:{}", self.as_str())
    }
}

impl FromStr for GtdStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        GtdStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| format!("Invalid GTD stage: {s}"))
    }
}

/// Coarse capture classification chosen when the page is captured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Todo,
    InProgress,
    Waiting,
    Completed,
}

impl ItemType {
    /// Stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Todo => "todo",
            ItemType::InProgress => "inprogress",
            ItemType::Waiting => "waiting",
            ItemType::Completed => "completed",
        }
    }

    /// The `status:<type>` system tag applied at capture time.
    pub fn status_tag(&self) -> String {
        format!("status:{}", self.as_str())
    }

    /// Type with a leading icon for list output.
    ///
    /// ```rust
    /// use sieve_core::models::ItemType;
    ///
    /// assert_eq!(ItemType::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(ItemType::Todo.with_icon(), "○ Todo");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ItemType::Todo => "○ Todo",
            ItemType::InProgress => "➤ In Progress",
            ItemType::Waiting => "⧗ Waiting",
            ItemType::Completed => "✓ Completed",
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(ItemType::Todo),
            "inprogress" | "in_progress" | "in-progress" => Ok(ItemType::InProgress),
            "waiting" => Ok(ItemType::Waiting),
            "completed" | "done" => Ok(ItemType::Completed),
            _ => Err(format!("Invalid item type: {s}")),
        }
    }
}
