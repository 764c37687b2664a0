//! Command-line argument wrappers.
//!
//! Each clap structure here converts into a core parameter or decision type,
//! so clap attributes never leak into `sieve-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ItemStore / Processor
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use sieve_core::{
    completion::{CompletionAnswers, FollowUp},
    models::{GtdStage, ItemType},
    params::{CaptureItem, DeleteItem, Id, ListItems, TagItem, UpdateItem},
    stage_model::{Decision, Delegation, DelegationMode},
};

/// Capture a page
#[derive(Args)]
pub struct CaptureArgs {
    /// How to file the capture
    #[arg(value_enum)]
    pub item_type: ItemTypeArg,
    /// URL of the page
    #[arg(long)]
    pub url: String,
    /// Title of the page
    #[arg(long)]
    pub title: String,
    /// Optional description
    #[arg(short, long)]
    pub text: Option<String>,
    /// Tags as a comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Image file to attach as the page screenshot
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
}

impl From<&CaptureArgs> for CaptureItem {
    fn from(val: &CaptureArgs) -> Self {
        CaptureItem {
            item_type: val.item_type.into(),
            text: val.text.clone(),
            tags: val.tags.clone(),
        }
    }
}

/// List items
#[derive(Args, Default)]
pub struct ListItemsArgs {
    /// Only items captured with this type
    #[arg(long = "type", value_enum)]
    pub item_type: Option<ItemTypeArg>,
    /// Only items carrying this tag (user or system tag)
    #[arg(long)]
    pub tag: Option<String>,
    /// Only items in this stage
    #[arg(long, value_enum)]
    pub stage: Option<StageArg>,
    /// Only items whose title, text or a tag contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

impl From<ListItemsArgs> for ListItems {
    fn from(val: ListItemsArgs) -> Self {
        ListItems {
            item_type: val.item_type.map(Into::into),
            tag: val.tag,
            stage: val.stage.map(Into::into),
            search: val.search,
        }
    }
}

/// Show one item
#[derive(Args)]
pub struct ShowItemArgs {
    /// ID of the item
    pub id: u64,
}

impl From<ShowItemArgs> for Id {
    fn from(val: ShowItemArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit an item
#[derive(Args)]
pub struct EditItemArgs {
    /// ID of the item
    pub id: u64,
    /// Replace the description
    #[arg(short, long)]
    pub text: Option<String>,
    /// Change the capture type
    #[arg(long = "type", value_enum)]
    pub item_type: Option<ItemTypeArg>,
    /// File directly into a stage without processing questions
    #[arg(long, value_enum)]
    pub stage: Option<StageArg>,
    /// Replace the tags with this comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

impl From<EditItemArgs> for UpdateItem {
    fn from(val: EditItemArgs) -> Self {
        UpdateItem {
            id: val.id,
            text: val.text,
            item_type: val.item_type.map(Into::into),
            stage: val.stage.map(Into::into),
            tags: val.tags,
        }
    }
}

/// Delete an item permanently
#[derive(Args)]
pub struct DeleteItemArgs {
    /// ID of the item
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteItemArgs> for DeleteItem {
    fn from(val: DeleteItemArgs) -> Self {
        DeleteItem {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Tag operations on a single item
#[derive(Subcommand)]
pub enum TagCommands {
    /// Add a tag
    Add(TagArgs),
    /// Remove a tag
    #[command(alias = "rm")]
    Remove(TagArgs),
}

#[derive(Args)]
pub struct TagArgs {
    /// ID of the item
    pub id: u64,
    /// Tag name
    pub tag: String,
}

impl From<TagArgs> for TagItem {
    fn from(val: TagArgs) -> Self {
        TagItem {
            id: val.id,
            tag: val.tag,
        }
    }
}

/// File one item with a single decision
#[derive(Args)]
pub struct FileItemArgs {
    /// ID of the item
    pub id: u64,
    /// Where the item goes
    #[arg(value_enum)]
    pub decision: DecisionArg,
    /// Person to delegate to (delegate)
    #[arg(long)]
    pub to: Option<String>,
    /// Follow-up date as YYYY-MM-DD (delegate)
    #[arg(long)]
    pub follow_up: Option<Date>,
    /// Notes to keep with the item (delegate, brainstorm, convert)
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Record the delegation as already handed off (waiting-for)
    #[arg(long)]
    pub waiting: bool,
    /// A next action to create; repeat for several (convert)
    #[arg(short, long = "action")]
    pub actions: Vec<String>,
}

impl From<FileItemArgs> for Decision {
    fn from(val: FileItemArgs) -> Self {
        match val.decision {
            DecisionArg::Trash => Decision::Trash,
            DecisionArg::Reference => Decision::Reference,
            DecisionArg::Someday => Decision::Someday,
            DecisionArg::Actionable => Decision::MarkActionable,
            DecisionArg::DoNow => Decision::DoNow,
            DecisionArg::NextAction => Decision::NextAction,
            DecisionArg::Delegate => Decision::Delegate(Delegation {
                to: val.to.unwrap_or_default(),
                follow_up: val.follow_up,
                notes: val.notes,
                mode: delegation_mode(val.waiting),
            }),
            DecisionArg::Brainstorm => Decision::Brainstorm { notes: val.notes },
            DecisionArg::Convert => Decision::ConvertBrainstorm {
                notes: val.notes,
                next_actions: val.actions,
            },
        }
    }
}

/// Work through the inbox
#[derive(Args)]
pub struct ProcessArgs {
    /// Record delegations as already handed off (waiting-for) instead of
    /// still to delegate
    #[arg(long)]
    pub waiting: bool,
}

impl ProcessArgs {
    pub fn delegation_mode(&self) -> DelegationMode {
        delegation_mode(self.waiting)
    }
}

/// Answer the follow-up questions for a completed item
#[derive(Args)]
pub struct AnnounceArgs {
    /// ID of the completed item
    pub id: u64,
    /// Questions answered yes, comma-separated
    #[arg(long, value_enum, value_delimiter = ',')]
    pub yes: Vec<FollowUpArg>,
    /// Questions answered no, comma-separated
    #[arg(long, value_enum, value_delimiter = ',')]
    pub no: Vec<FollowUpArg>,
}

impl AnnounceArgs {
    pub fn answers(&self) -> CompletionAnswers {
        let no = self.no.iter().map(|q| (FollowUp::from(*q), false));
        let yes = self.yes.iter().map(|q| (FollowUp::from(*q), true));
        no.chain(yes).collect()
    }
}

fn delegation_mode(waiting: bool) -> DelegationMode {
    if waiting {
        DelegationMode::WaitingFor
    } else {
        DelegationMode::ToDelegate
    }
}

/// Capture types as command-line values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ItemTypeArg {
    Todo,
    #[value(name = "inprogress", alias = "in-progress")]
    InProgress,
    Waiting,
    #[value(alias = "done")]
    Completed,
}

impl From<ItemTypeArg> for ItemType {
    fn from(val: ItemTypeArg) -> Self {
        match val {
            ItemTypeArg::Todo => ItemType::Todo,
            ItemTypeArg::InProgress => ItemType::InProgress,
            ItemTypeArg::Waiting => ItemType::Waiting,
            ItemTypeArg::Completed => ItemType::Completed,
        }
    }
}

/// Workflow stages as command-line values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Inbox,
    Actionable,
    NextActions,
    WaitingFor,
    ToDelegate,
    Delegated,
    Brainstorm,
    Someday,
    Reference,
    Completed,
}

impl From<StageArg> for GtdStage {
    fn from(val: StageArg) -> Self {
        match val {
            StageArg::Inbox => GtdStage::Inbox,
            StageArg::Actionable => GtdStage::Actionable,
            StageArg::NextActions => GtdStage::NextActions,
            StageArg::WaitingFor => GtdStage::WaitingFor,
            StageArg::ToDelegate => GtdStage::ToDelegate,
            StageArg::Delegated => GtdStage::Delegated,
            StageArg::Brainstorm => GtdStage::Brainstorm,
            StageArg::Someday => GtdStage::Someday,
            StageArg::Reference => GtdStage::Reference,
            StageArg::Completed => GtdStage::Completed,
        }
    }
}

/// Terminal decisions for `file`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DecisionArg {
    /// Not actionable: delete it
    Trash,
    /// Not actionable: keep as reference material
    Reference,
    /// Not actionable now: someday/maybe
    Someday,
    /// Actionable, decide the next step later
    Actionable,
    /// Done on the spot under the two-minute rule
    DoNow,
    /// Yours to do next
    NextAction,
    /// Someone else does it (needs --to)
    Delegate,
    /// Needs more thought
    Brainstorm,
    /// Split a brainstorm into next actions (needs --action)
    Convert,
}

/// Completion follow-up questions as command-line values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FollowUpArg {
    #[value(alias = "investor")]
    Investors,
    Users,
    Ad,
    Email,
    Blog,
    Changelog,
    Team,
}

impl From<FollowUpArg> for FollowUp {
    fn from(val: FollowUpArg) -> Self {
        match val {
            FollowUpArg::Investors => FollowUp::Investors,
            FollowUpArg::Users => FollowUp::Users,
            FollowUpArg::Ad => FollowUp::Ad,
            FollowUpArg::Email => FollowUp::Email,
            FollowUpArg::Blog => FollowUp::Blog,
            FollowUpArg::Changelog => FollowUp::Changelog,
            FollowUpArg::Team => FollowUp::Team,
        }
    }
}
