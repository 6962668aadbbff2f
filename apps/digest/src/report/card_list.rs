//! Report Formatter — the human-readable card list.
//!
//! Output is a pure function of the records: no timestamps or other
//! run-dependent content, so identical input always renders identically.

use chrono::{DateTime, Utc};

use crate::snapshot::models::{CardRecord, ResolvedChecklist};

pub const NO_CARDS_MESSAGE: &str = "No cards found for this member.";
pub const SEPARATOR: &str = "--------------------------------------------------";

const COMPLETE_MARKER: &str = "[x]";
const INCOMPLETE_MARKER: &str = "[ ]";

/// Renders one numbered section per record, each closed by `SEPARATOR`.
pub fn format_card_list(records: &[CardRecord]) -> String {
    if records.is_empty() {
        return format!("{NO_CARDS_MESSAGE}\n");
    }

    let mut out = String::new();
    for (idx, record) in records.iter().enumerate() {
        render_record(&mut out, idx + 1, record);
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

fn render_record(out: &mut String, index: usize, record: &CardRecord) {
    out.push_str(&format!("{}. {}\n", index, record.name));

    if let Some(due) = &record.due {
        out.push_str(&format!("   Due: {}\n", format_due(due)));
    }
    if let Some(url) = &record.url {
        out.push_str(&format!("   URL: {url}\n"));
    }
    if let Some(description) = &record.description {
        out.push_str("   Description:\n");
        for line in description.lines() {
            out.push_str(&format!("     {line}\n"));
        }
    }
    if !record.labels.is_empty() {
        out.push_str(&format!("   Labels: {}\n", record.labels.join(", ")));
    }
    for checklist in &record.checklists {
        render_checklist(out, checklist);
    }
}

fn render_checklist(out: &mut String, checklist: &ResolvedChecklist) {
    out.push_str(&format!("   Checklist: {}\n", checklist.name));
    if checklist.items.is_empty() {
        out.push_str("     (no items)\n");
        return;
    }
    for item in &checklist.items {
        let marker = if item.complete {
            COMPLETE_MARKER
        } else {
            INCOMPLETE_MARKER
        };
        out.push_str(&format!("     {} {}\n", marker, item.name));
    }
}

/// RFC 3339 timestamps are normalized to UTC minutes; anything else is shown as-is.
fn format_due(due: &str) -> String {
    match DateTime::parse_from_rfc3339(due) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
        Err(_) => due.to_string(),
    }
}
