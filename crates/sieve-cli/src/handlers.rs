//! Command handlers: run one command against the store and render the result.

use std::io;

use anyhow::{Context, Result};
use log::info;
use sieve_core::{
    capture::capture,
    completion,
    display::{CreateResult, DeleteResult, Notice, Tags},
    params::{CaptureItem, DeleteItem, Id, ListItems, TagItem, UpdateItem},
    stage_model::Decision,
    workflow::{InboxSession, Processor},
    ItemStore,
};

use crate::{
    cli::{AnnounceArgs, CaptureArgs, FileItemArgs, ProcessArgs, TagCommands},
    process,
    renderer::TerminalRenderer,
    tab::PageSource,
};

pub struct Cli {
    store: ItemStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: ItemStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub async fn capture(&self, args: CaptureArgs) -> Result<()> {
        let params: CaptureItem = (&args).into();
        let source = PageSource {
            url: args.url,
            title: args.title,
            screenshot: args.screenshot,
        };

        let item = capture(&self.store, &source, &params).await?;
        self.renderer.render(&CreateResult::new(item).to_string())
    }

    pub async fn list(&self, params: &ListItems) -> Result<()> {
        let items = self
            .store
            .list_items(params)
            .await
            .context("Failed to list items")?;
        self.renderer.render(&items.to_string())
    }

    pub async fn show(&self, params: &Id) -> Result<()> {
        let item = self.store.show_item(params).await?;
        self.renderer.render(&item.to_string())
    }

    pub async fn edit(&self, params: &UpdateItem) -> Result<()> {
        let result = self.store.update_item(params).await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn delete(&self, params: &DeleteItem) -> Result<()> {
        match self.store.delete_item_confirmed(params).await? {
            Some(item) => self.renderer.render(&DeleteResult::new(item).to_string()),
            None => self
                .renderer
                .notice(&Notice::info(format!("No item with ID {}", params.id))),
        }
    }

    pub async fn tags(&self) -> Result<()> {
        let tags = self.store.get_all_tags().await?;
        self.renderer.render(&Tags(tags).to_string())
    }

    pub async fn tag(&self, command: TagCommands) -> Result<()> {
        let (params, added): (TagItem, bool) = match command {
            TagCommands::Add(args) => (args.into(), true),
            TagCommands::Remove(args) => (args.into(), false),
        };

        let item = if added {
            self.store.add_tag(&params).await?
        } else {
            self.store.remove_tag(&params).await?
        };

        let message = if added {
            format!("Item {} tagged '{}'", item.id, params.tag.trim())
        } else {
            format!("Removed tag '{}' from item {}", params.tag.trim(), item.id)
        };
        self.renderer.notice(&Notice::success(message))
    }

    pub async fn counts(&self) -> Result<()> {
        let counts = self.store.stage_counts().await?;
        self.renderer.render(&counts.to_string())
    }

    pub async fn file(&self, args: FileItemArgs) -> Result<()> {
        let id = args.id;
        let decision = Decision::from(args);
        let applied = Processor::new(self.store.clone())
            .file(id, &decision)
            .await?;
        self.renderer.render(&applied.to_string())
    }

    pub async fn process(&self, args: &ProcessArgs) -> Result<()> {
        let processor = Processor::new(self.store.clone());
        let mut session = InboxSession::start(processor, args.delegation_mode()).await?;
        info!("Processing {} inbox items", session.len());

        let mut input = io::stdin().lock();
        process::run(&mut session, &mut input, &self.renderer).await
    }

    pub async fn announce(&self, args: &AnnounceArgs) -> Result<()> {
        let answers = args.answers();
        if answers.is_empty() {
            return self.renderer.notice(&Notice::info(
                "Nothing to record; pass --yes and/or --no with question names",
            ));
        }

        let item = completion::record_answers(&self.store, args.id, &answers).await?;
        self.renderer.notice(&Notice::success(format!(
            "Recorded {} follow-up answers for item {}",
            answers.len(),
            item.id
        )))?;
        self.renderer.render(&item.to_string())
    }
}
