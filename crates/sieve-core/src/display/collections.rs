//! Collection wrapper types for displaying groups of items and tags.

use std::{fmt, ops::Index};

use crate::models::WorkItem;

/// Newtype wrapper for displaying a list of items, one entry per item.
///
/// # Examples
///
/// ```rust
/// use sieve_core::{display::Items, models::WorkItem};
///
/// let items = Items(vec![WorkItem {
///     id: 1,
///     title: Some("Rust book".to_string()),
///     ..Default::default()
/// }]);
/// assert!(items.to_string().contains("**Rust book** (ID: 1)"));
/// assert_eq!(Items(vec![]).to_string(), "No items found.\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Items(pub Vec<WorkItem>);

impl Items {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkItem> {
        self.0.iter()
    }
}

impl Index<usize> for Items {
    type Output = WorkItem;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Items {
    type Item = WorkItem;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = &'a WorkItem;
    type IntoIter = std::slice::Iter<'a, WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Items {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No items found.");
        }
        for item in &self.0 {
            item.fmt_list_entry(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the distinct user tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags(pub Vec<String>);

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tags found.");
        }
        for tag in &self.0 {
            writeln!(f, "- {tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GtdStage, ItemType};

    #[test]
    fn test_items_list_entries() {
        let items = Items(vec![
            WorkItem {
                id: 1,
                item_type: Some(ItemType::Todo),
                url: Some("https://example.com".to_string()),
                tags: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            },
            WorkItem {
                id: 2,
                title: Some("Plan trip".to_string()),
                gtd_stage: Some(GtdStage::NextActions),
                ..Default::default()
            },
        ]);

        let output = items.to_string();
        assert!(output.contains("- **https://example.com** (ID: 1) Inbox / ○ Todo"));
        assert!(output.contains("  - Tags: a, b"));
        assert!(output.contains("- **Plan trip** (ID: 2) Next Actions"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_tags_display() {
        assert_eq!(Tags(vec![]).to_string(), "No tags found.\n");
        assert_eq!(
            Tags(vec!["home".to_string(), "work".to_string()]).to_string(),
            "- home\n- work\n"
        );
    }
}
