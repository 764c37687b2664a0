//! Display implementations for domain models.
//!
//! Output is markdown, rendered by the CLI with termimad.

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::models::{GtdStage, ItemType, StageCounts, WorkItem};

impl fmt::Display for GtdStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.display_title())?;
        writeln!(f)?;

        if let Some(item_type) = self.item_type {
            writeln!(f, "- Type: {}", item_type.with_icon())?;
        }
        writeln!(f, "- Stage: {}", self.effective_stage())?;
        if let Some(url) = &self.url {
            writeln!(f, "- URL: {url}")?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        if !self.system_tags.is_empty() {
            writeln!(f, "- System tags: {}", self.system_tags.join(", "))?;
        }
        if let Some(person) = &self.waiting_for {
            match &self.waiting_until {
                Some(date) => writeln!(f, "- Waiting for: {person} (follow up {date})")?,
                None => writeln!(f, "- Waiting for: {person}")?,
            }
        }
        if let Some(person) = &self.delegate_to {
            match &self.delegate_date {
                Some(date) => writeln!(f, "- Delegate to: {person} (by {date})")?,
                None => writeln!(f, "- Delegate to: {person}")?,
            }
        }
        if let Some(source) = self.source_item_id {
            writeln!(f, "- From item: {source}")?;
        }
        if self.screenshot.is_some() {
            writeln!(f, "- Screenshot: attached")?;
        }
        if let Some(created) = &self.created_at {
            writeln!(f, "- Captured: {}", LocalDateTime(created))?;
        }
        if let Some(reviewed) = &self.reviewed_at {
            writeln!(f, "- Reviewed: {}", LocalDateTime(reviewed))?;
        }

        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            writeln!(f)?;
            writeln!(f, "{text}")?;
        }

        if let Some(notes) = &self.brainstorm_notes {
            writeln!(f, "\n## Brainstorm notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        Ok(())
    }
}

impl WorkItem {
    /// One list entry: title, ID, stage and type, then tags.
    pub(crate) fn fmt_list_entry(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** (ID: {}) {}",
            self.display_title(),
            self.id,
            self.effective_stage()
        )?;
        if let Some(item_type) = self.item_type {
            write!(f, " / {}", item_type.with_icon())?;
        }
        if let Some(created) = &self.created_at {
            write!(f, " / {}", LocalDate(created))?;
        }
        writeln!(f)?;

        if !self.tags.is_empty() {
            writeln!(f, "  - Tags: {}", self.tags.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for StageCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Stage | Items |")?;
        writeln!(f, "|:-|-:|")?;
        for (stage, count) in self.iter() {
            writeln!(f, "| {stage} | {count} |")?;
        }
        writeln!(f, "| **Total** | {} |", self.total())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_item_detail() {
        let item = WorkItem {
            id: 12,
            item_type: Some(ItemType::Waiting),
            gtd_stage: Some(GtdStage::WaitingFor),
            title: Some("Contract".to_string()),
            url: Some("https://example.com/contract".to_string()),
            tags: vec!["legal".to_string()],
            waiting_for: Some("Alex".to_string()),
            waiting_until: Some(date(2025, 3, 14)),
            text: Some("Signed copy pending".to_string()),
            ..Default::default()
        };

        let output = item.to_string();
        assert!(output.starts_with("# 12. Contract\n"));
        assert!(output.contains("- Type: ⧗ Waiting"));
        assert!(output.contains("- Stage: Waiting For"));
        assert!(output.contains("- Tags: legal"));
        assert!(output.contains("- Waiting for: Alex (follow up 2025-03-14)"));
        assert!(output.contains("Signed copy pending"));
        assert!(!output.contains("Screenshot"));
    }

    #[test]
    fn test_stage_counts_table() {
        let items = vec![
            WorkItem::default(),
            WorkItem {
                gtd_stage: Some(GtdStage::Someday),
                ..Default::default()
            },
        ];
        let output = StageCounts::from_items(&items).to_string();

        assert!(output.contains("| Inbox | 1 |"));
        assert!(output.contains("| Someday/Maybe | 1 |"));
        assert!(output.contains("| **Total** | 2 |"));
    }
}
