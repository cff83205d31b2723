//! Per-recipient daily digest built from the outcomes of one sync run.

use chrono::NaiveDate;

use crate::constants::limits::DIGEST_SNIPPET_CHARS;
use crate::db::TrackedCase;
use crate::domain::SyncOutcome;
use crate::domain::movement::truncate_chars;

const DIGEST_HEADER: &str = "Summary of today's check:";

/// Digest lines grouped by recipient, in the order recipients first appear.
#[derive(Debug, Default)]
pub struct DigestBook {
    entries: Vec<(String, Vec<String>)>,
}

impl DigestBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, recipient: &str, line: String) {
        if let Some((_, lines)) = self.entries.iter_mut().find(|(r, _)| r == recipient) {
            lines.push(line);
        } else {
            self.entries.push((recipient.to_string(), vec![line]));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(recipient, lines)| (recipient.as_str(), lines.as_slice()))
    }
}

fn prefix(outcome: &SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Changed(_) => "🟡 CHANGED",
        SyncOutcome::Unchanged(_) => "✅ No changes",
        SyncOutcome::NoHits => "⚪ No data (DataJud)",
        SyncOutcome::NoMovements => "⚪ No movements (DataJud)",
        SyncOutcome::Failed(_) => "🔴 ERROR",
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

/// Renders one case's outcome as a digest entry.
#[must_use]
pub fn digest_line(case: &TrackedCase, outcome: &SyncOutcome) -> String {
    let mut line = format!(
        "{} — {} {}",
        prefix(outcome),
        case.tribunal_alias,
        case.case_number
    );

    if outcome.error().is_some() {
        line.push_str(" (sync failed)");
        return line;
    }

    if let Some(movement) = outcome.latest() {
        if !movement.date.is_empty() || !movement.title.is_empty() {
            line.push_str(&format!(
                "\n   Latest: {} | {}",
                or_dash(&movement.date),
                or_dash(&movement.title)
            ));
        }
        if let Some(snippet) = description_snippet(&movement.description) {
            line.push_str("\n   ");
            line.push_str(&snippet);
        }
    }

    line
}

/// Single-line description cut to the snippet width, or `None` when blank.
#[must_use]
pub fn description_snippet(description: &str) -> Option<String> {
    let flat = description.replace('\n', " ");
    let flat = flat.trim();
    if flat.is_empty() {
        return None;
    }

    if flat.chars().count() > DIGEST_SNIPPET_CHARS {
        Some(format!("{}...", truncate_chars(flat, DIGEST_SNIPPET_CHARS)))
    } else {
        Some(flat.to_string())
    }
}

#[must_use]
pub fn digest_subject(date: NaiveDate, changed: usize) -> String {
    format!(
        "[DAILY REPORT] Case Monitor — {} (changed: {changed})",
        date.format("%d/%m/%Y")
    )
}

#[must_use]
pub fn digest_body(lines: &[String]) -> String {
    format!("{DIGEST_HEADER}\n\n{}", lines.join("\n\n"))
}
