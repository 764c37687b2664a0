//! Capturing the current page as a new work item.
//!
//! A [`TabSource`] supplies the page being looked at (URL, title and a
//! screenshot) and [`capture`] combines it with the user's choices into a
//! stored [`WorkItem`].

use jiff::Timestamp;
use log::{error, info};

use crate::{
    error::{Result, SieveError},
    models::WorkItem,
    params::CaptureItem,
    store::{item_handlers::normalize_tag, ItemStore},
};

/// The page a capture is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedTab {
    pub url: String,
    pub title: String,
    /// Screenshot of the visible page as a `data:` URL
    pub screenshot: Option<String>,
}

/// Anything that can report the page currently being looked at.
pub trait TabSource {
    /// Captures the active page.
    ///
    /// # Errors
    ///
    /// Any failure to read the page or take the screenshot.
    fn capture_active_tab(&self) -> Result<CapturedTab>;
}

impl TabSource for CapturedTab {
    fn capture_active_tab(&self) -> Result<CapturedTab> {
        Ok(self.clone())
    }
}

/// Captures the active page as a new item of the requested type.
///
/// The item gets a fresh ID, the trimmed non-empty user tags (repeats
/// dropped) and the `status:<type>` system tag. Its stage follows from the
/// type: completed captures go straight to `completed`, waiting captures to
/// `waiting-for` and everything else to the inbox.
///
/// # Errors
///
/// `SieveError::CaptureFailed` wrapping whatever failed, be it the tab source
/// or the save. Nothing is stored in either case.
///
/// # Examples
///
/// ```rust
/// use sieve_core::{
///     capture::{capture, CapturedTab},
///     models::{GtdStage, ItemType},
///     params::CaptureItem,
///     ItemStoreBuilder,
/// };
///
/// # async fn example() -> sieve_core::Result<()> {
/// let store = ItemStoreBuilder::new().in_memory().build().await?;
/// let tab = CapturedTab {
///     url: "https://example.com".to_string(),
///     title: "Example".to_string(),
///     screenshot: None,
/// };
/// let params = CaptureItem {
///     item_type: ItemType::Todo,
///     text: Some("read later".to_string()),
///     tags: vec!["reading".to_string()],
/// };
///
/// let item = capture(&store, &tab, &params).await?;
/// assert_eq!(item.gtd_stage, Some(GtdStage::Inbox));
/// # Ok(())
/// # }
/// ```
pub async fn capture(
    store: &ItemStore,
    source: &dyn TabSource,
    params: &CaptureItem,
) -> Result<WorkItem> {
    let item = match source.capture_active_tab() {
        Ok(tab) => build_item(tab, params, Timestamp::now()),
        Err(e) => {
            error!("Could not capture the active tab: {e}");
            return Err(SieveError::capture_failed(e));
        }
    };

    let saved = store
        .save_item(&item)
        .await
        .map_err(SieveError::capture_failed)?;

    info!("Captured item {} as {}", saved.id, params.item_type.as_str());
    Ok(saved)
}

fn build_item(tab: CapturedTab, params: &CaptureItem, now: Timestamp) -> WorkItem {
    let mut item = WorkItem {
        id: WorkItem::UNASSIGNED_ID,
        item_type: Some(params.item_type),
        text: params
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from),
        url: Some(tab.url),
        title: Some(tab.title),
        screenshot: tab.screenshot,
        tags: params.tags.iter().filter_map(|t| normalize_tag(t)).collect(),
        system_tags: vec![params.item_type.status_tag()],
        created_at: Some(now),
        updated_at: Some(now),
        ..Default::default()
    };
    item.dedup_tags();
    item
}
