use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AnnounceArgs, CaptureArgs, DeleteItemArgs, EditItemArgs, FileItemArgs, ListItemsArgs,
    ProcessArgs, ShowItemArgs, TagCommands,
};

/// Capture web pages and sort them with Getting Things Done
///
/// Sieve keeps every captured page in one local collection. New captures land
/// in the inbox; processing asks a few questions per item and files it as a
/// next action, a delegation, reference material, someday/maybe, or trash.
#[derive(Parser)]
#[command(version, about, name = "sieve")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sieve/sieve.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command, all items are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Capture a page as a new item
    #[command(alias = "c")]
    Capture(CaptureArgs),
    /// List items, newest first
    #[command(alias = "ls")]
    List(ListItemsArgs),
    /// Show one item in full
    Show(ShowItemArgs),
    /// Edit an item's text, type, stage or tags
    #[command(alias = "e")]
    Edit(EditItemArgs),
    /// Delete an item permanently
    #[command(alias = "rm")]
    Delete(DeleteItemArgs),
    /// List every tag in use
    Tags,
    /// Add or remove a tag on one item
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Count items per stage
    Counts,
    /// File one item with a single decision
    #[command(alias = "f")]
    File(FileItemArgs),
    /// Work through the inbox interactively
    #[command(alias = "p")]
    Process(ProcessArgs),
    /// Answer the follow-up questions for a completed item
    Announce(AnnounceArgs),
}
