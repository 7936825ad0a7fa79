//! Event records for the `midicsv` intermediate text format.
//!
//! `midicsv` renders a Standard MIDI File as one comma-separated line per
//! event: track, time, event kind, then kind-specific parameters. This crate
//! parses those lines into [`EventRecord`]s and serializes them back, so the
//! rest of the pipeline never has to touch raw text.
//!
//! # Example
//!
//! ```
//! use midicsv::{parse_document, to_document, EventKind};
//!
//! let text = "0, 0, Header, 1, 1, 480\n\
//!             1, 0, Start_track\n\
//!             1, 0, Note_on_c, 3, 60, 90\n\
//!             1, 480, End_track\n\
//!             0, 0, End_of_file\n";
//!
//! let records = parse_document(text).unwrap();
//! assert_eq!(records[2].kind, EventKind::NoteOn);
//! assert_eq!(records[2].channel, Some(3));
//! assert_eq!(to_document(&records), text);
//! ```

pub mod error;
mod fields;
pub mod kind;
pub mod record;
pub mod text;

pub use error::{Error, RecordError, Result};
pub use fields::split_fields;
pub use kind::{EventKind, Scope};
pub use record::EventRecord;
pub use text::{decode_bytes, encode_text};

/// Parse a complete `midicsv` document.
///
/// Blank lines and comment lines (starting with `#` or `;`, which `csvmidi`
/// also ignores) are skipped. Parsing stops at the first malformed line.
pub fn parse_document(text: &str) -> Result<Vec<EventRecord>> {
    parse_lines(text.lines())
}

/// Parse a sequence of lines, numbering them from 1 for error reporting.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<EventRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        if is_skippable(line) {
            continue;
        }

        let record = EventRecord::parse_line(line).map_err(|reason| Error::MalformedRecord {
            line: index + 1,
            content: line.to_string(),
            reason,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Serialize records back to text, one newline-terminated line each.
pub fn to_document(records: &[EventRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';')
}
