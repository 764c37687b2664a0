//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::WorkItem;

/// Wrapper for a newly captured item.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<WorkItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Captured item with ID: {} ({})",
            self.resource.id,
            self.resource.effective_stage()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for an edited item, listing what changed.
///
/// # Examples
///
/// ```rust
/// use sieve_core::{display::UpdateResult, models::WorkItem};
///
/// let item = WorkItem { id: 4, ..Default::default() };
/// let result = UpdateResult::with_changes(item, vec!["Updated text".to_string()]);
/// let output = result.to_string();
/// assert!(output.starts_with("Updated item with ID: 4"));
/// assert!(output.contains("- Updated text"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<WorkItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated item with ID: {}", self.resource.id)?;

        if self.changes.is_empty() {
            writeln!(f, "\nNothing to change.")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for a permanently deleted item.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<WorkItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted item '{}' (ID: {})",
            self.resource.display_title(),
            self.resource.id
        )
    }
}

/// Wrapper for a brainstorm split into next actions.
pub struct SplitResult {
    pub source: WorkItem,
    pub next_actions: Vec<WorkItem>,
}

impl fmt::Display for SplitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Filed item {} as {} and created {} next actions:",
            self.source.id,
            self.source.effective_stage(),
            self.next_actions.len()
        )?;
        writeln!(f)?;
        for action in &self.next_actions {
            action.fmt_list_entry(f)?;
        }
        Ok(())
    }
}
