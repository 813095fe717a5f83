//! One-line terminal summaries of checkpoint document sections.
//!
//! Resume output has to fit a glance: each section collapses to a single
//! bounded line, with the full document available via `--format json`.

use crate::core::document::{CompletedEntry, ContextEntry, RemainingEntry};

const MAX_ITEMS: usize = 4;
const ITEM_WIDTH: usize = 60;

/// Collapse whitespace runs and bound the result for a terminal line.
pub fn clip(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let clipped: String = collapsed.chars().take(max_chars).collect();
    format!("{}...", clipped)
}

fn summarize(lines: impl Iterator<Item = String>, total: usize) -> String {
    let shown = lines
        .take(MAX_ITEMS)
        .map(|line| clip(&line, ITEM_WIDTH))
        .collect::<Vec<_>>()
        .join(" | ");
    if total > MAX_ITEMS {
        format!("{} (+{} more)", shown, total - MAX_ITEMS)
    } else {
        shown
    }
}

/// `reference (role)` pairs from the architectural context.
pub fn context_summary(entries: &[ContextEntry]) -> String {
    summarize(
        entries
            .iter()
            .map(|e| format!("{} ({})", e.reference, e.role)),
        entries.len(),
    )
}

pub fn completed_summary(entries: &[CompletedEntry]) -> String {
    summarize(entries.iter().map(|e| e.what.clone()), entries.len())
}

/// Remaining tasks, with blocked ones flagged. The explicit-empty sentinel
/// renders as "none recorded" rather than as a task.
pub fn remaining_summary(entries: &[RemainingEntry]) -> String {
    let tasks: Vec<&RemainingEntry> = entries
        .iter()
        .filter(|e| !e.is_none_sentinel())
        .collect();
    if tasks.is_empty() {
        return "none recorded".to_string();
    }
    summarize(
        tasks.iter().map(|e| {
            if e.blockers.is_empty() {
                e.task.clone()
            } else {
                format!("{} [{} blocker(s)]", e.task, e.blockers.len())
            }
        }),
        tasks.len(),
    )
}

pub fn questions_summary(questions: &[String]) -> String {
    summarize(questions.iter().cloned(), questions.len())
}
