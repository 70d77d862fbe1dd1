//! Terminal rendering. Each `render_*` builds the full text so it can be tested;
//! the `print_*` wrappers only write it out.

use certz::api::{CmdMessage, DatasetStatus, MessageLevel};
use certz::config::{CertzConfig, CONFIG_KEYS};
use certz::model::Record;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

const LABEL_GAP: usize = 2;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_record(record: &Record) {
    print!("{}", render_record(record));
}

pub fn print_entries(entries: &[String]) {
    print!("{}", render_entries(entries));
}

pub fn print_status(status: &DatasetStatus) {
    print!("{}", render_status(status));
}

pub fn print_config(config: &CertzConfig) {
    print!("{}", render_config(config));
}

/// Every present field, labels padded to a common display width.
pub fn render_record(record: &Record) -> String {
    let fields = record.display_fields();
    if fields.is_empty() {
        return format!("{}\n", "Record has no values.".dimmed());
    }
    render_pairs(
        fields
            .iter()
            .map(|(label, value)| (label.as_str(), value.clone())),
    )
}

pub fn render_entries(entries: &[String]) -> String {
    if entries.is_empty() {
        return format!("{}\n", "No entries found.".dimmed());
    }
    let number_width = entries.len().to_string().len();
    entries
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let number = format!("{:>width$}.", i + 1, width = number_width);
            format!("{} {}\n", number.yellow(), name)
        })
        .collect()
}

pub fn render_status(status: &DatasetStatus) -> String {
    let loaded = status
        .loaded_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "not loaded".to_string());
    let columns = if status.columns.is_empty() {
        "-".to_string()
    } else {
        status.columns.join(", ")
    };

    render_pairs(
        [
            ("Dataset", status.source.clone()),
            ("Records", status.records.to_string()),
            ("Columns", columns),
            ("Loaded", loaded),
            (
                "Sample ID",
                status
                    .sample_identifier
                    .clone()
                    .unwrap_or_else(|| "Not found".to_string()),
            ),
            (
                "Archive",
                status
                    .archive
                    .clone()
                    .unwrap_or_else(|| "not configured".to_string()),
            ),
        ]
        .into_iter(),
    )
}

pub fn render_config(config: &CertzConfig) -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| {
            let value = config.get(key).unwrap_or_default();
            format!("{} = {}\n", key, value)
        })
        .collect()
}

fn render_pairs<'a>(pairs: impl Iterator<Item = (&'a str, String)> + Clone) -> String {
    let label_width = pairs
        .clone()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);

    pairs
        .map(|(label, value)| {
            let padding = " ".repeat(label_width - label.width() + LABEL_GAP);
            format!("{}:{}{}\n", label.bold(), padding, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use certz::model::{Column, Scalar};

    fn strip(s: &str) -> String {
        // Drop ANSI escapes so assertions see plain text
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_render_record_aligns_labels() {
        let record = Record::new()
            .with(Column::StudentId, "A1")
            .with(Column::Name, "Jane Doe")
            .with(Column::ReferenceNumber, Scalar::Float(42.0))
            .with(Column::Course, Scalar::Empty);

        let text = strip(&render_record(&record));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Student ID:        A1",
                "Name:              Jane Doe",
                "Reference Number:  42",
            ]
        );
    }

    #[test]
    fn test_render_entries_numbers_lines() {
        let entries: Vec<String> = (1..=10).map(|i| format!("cert_{}.png", i)).collect();
        let text = strip(&render_entries(&entries));
        assert!(text.starts_with(" 1. cert_1.png\n"));
        assert!(text.ends_with("10. cert_10.png\n"));
        assert!(strip(&render_entries(&[])).contains("No entries found."));
    }

    #[test]
    fn test_render_status_unloaded() {
        let status = DatasetStatus {
            source: "roster.xlsx".to_string(),
            records: 0,
            columns: vec![],
            loaded_at: None,
            sample_identifier: None,
            archive: None,
        };
        let text = strip(&render_status(&status));
        assert!(text.contains("Records:    0"));
        assert!(text.contains("not loaded"));
        assert!(text.contains("not configured"));
    }

    #[test]
    fn test_render_config_lists_all_keys() {
        let text = render_config(&CertzConfig::default());
        assert!(text.contains("header-offset = 0\n"));
        assert!(text.contains("download-prefix = OJT_Certificate\n"));
        assert_eq!(text.lines().count(), CONFIG_KEYS.len());
    }
}
