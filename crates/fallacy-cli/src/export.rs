use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fallacy_schema::HistoryEntry;

pub const CSV_HEADER: &str = "text,fallacy,confidence";

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// History rows as CSV, header first, in recording order.
pub fn history_csv(entries: &[HistoryEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&entry.text_snippet),
            csv_field(&entry.category_display_name),
            entry.confidence
        ));
    }
    out
}

pub fn write_history_csv(path: &Path, entries: &[HistoryEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }
    fs::write(path, history_csv(entries))
        .with_context(|| format!("failed to write history export: {}", path.display()))
}
