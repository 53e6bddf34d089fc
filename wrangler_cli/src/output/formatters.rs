use super::OutputFormatter;
use crate::progress::format_bytes;
use anyhow::Result;
use colored::*;
use wrangler_core::MediaRecord;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, record: &MediaRecord) -> Result<String> {
        let mut details = Vec::new();

        let tag = match (record.frame_count, record.start_frame, record.end_frame) {
            (Some(count), Some(start), Some(end)) => {
                details.push(format!("{count} frames, {start}-{end}"));
                self.colorize("SEQ ", |s| s.green())
            }
            _ => self.colorize("FILE", |s| s.blue()),
        };

        details.push(record.media_type.to_string());
        details.push(format_bytes(record.size));

        let name = self.colorize(&record.display_name, |s| s.bold());
        let folder = record
            .path
            .as_deref()
            .and_then(|path| path.parent())
            .map(|parent| parent.display().to_string())
            .unwrap_or_default();

        Ok(format!(
            "{tag} {name}  ({})  {}",
            details.join(", "),
            self.colorize(&folder, |s| s.dimmed())
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, record: &MediaRecord) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(record)?)
        } else {
            Ok(serde_json::to_string(record)?)
        }
    }

    fn format_batch(&self, records: &[MediaRecord]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(records)?)
        } else {
            Ok(serde_json::to_string(records)?)
        }
    }
}
