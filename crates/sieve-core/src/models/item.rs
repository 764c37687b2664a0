//! Work item model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{GtdStage, ItemType};

/// A captured page moving through the GTD workflow.
///
/// Items are values: callers clone an item, mutate the clone and hand it back
/// to the store, which persists it wholesale. Optional fields that are `None`
/// are left out of the stored JSON, so saving a partially filled item never
/// erases fields already stored for the same ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Unique identifier, [`WorkItem::UNASSIGNED_ID`] until first saved
    #[serde(default)]
    pub id: u64,

    /// Capture classification
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,

    /// Workflow stage; a missing stage reads as [`GtdStage::Inbox`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtd_stage: Option<GtdStage>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Source page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Screenshot as a `data:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,

    /// User-defined tags, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,

    /// Machine-applied labels, append-only
    #[serde(default)]
    pub system_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    /// Last time a workflow decision was applied to the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<Timestamp>,

    /// Person the item is waiting on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<String>,

    /// Follow-up date while waiting
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub waiting_until: Option<Date>,

    /// Person the item should be handed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_to: Option<String>,

    /// Follow-up date for the hand-off
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub delegate_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brainstorm_notes: Option<String>,

    /// ID of the item this next action was split from. Lookup only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_item_id: Option<u64>,

    /// Structured extras such as completion follow-up answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Stored fields this version does not know about, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads a follow-up date. Blank or unparseable values read as unset.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

impl WorkItem {
    /// ID value meaning "let the store assign one".
    pub const UNASSIGNED_ID: u64 = 0;

    /// Stage as every reader sees it: a missing stage is the inbox.
    pub fn effective_stage(&self) -> GtdStage {
        self.gtd_stage.unwrap_or(GtdStage::Inbox)
    }

    /// Whether the item carries `tag` as a user tag or a system tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag) || self.system_tags.iter().any(|t| t == tag)
    }

    /// Adds a user tag. Returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a user tag. Returns `false` if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Appends a system tag. System tags are a log, so repeats are kept.
    pub fn push_system_tag(&mut self, tag: impl Into<String>) {
        self.system_tags.push(tag.into());
    }

    /// Appends the tag for the current stage unless one is already present.
    pub fn ensure_stage_tag(&mut self) {
        let tag = self.effective_stage().system_tag();
        if !self.system_tags.contains(&tag) {
            self.system_tags.push(tag);
        }
    }

    /// Drops repeated user tags, keeping the first occurrence.
    pub fn dedup_tags(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.tags.retain(|tag| seen.insert(tag.clone()));
    }

    /// Title for display, falling back to the URL and then the ID.
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.url.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("Item {}", self.id))
    }

    /// Appends a paragraph to the description, separated by a blank line.
    pub fn append_text(&mut self, paragraph: &str) {
        self.text = Some(match self.text.take().filter(|t| !t.is_empty()) {
            Some(existing) => format!("{existing}\n\n{paragraph}"),
            None => paragraph.to_string(),
        });
    }
}
