//! Track layout of split streams.
//!
//! Track 0 holds the file-level `Header` and `End_of_file` records and is
//! never renumbered.

use midicsv::{EventKind, EventRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackLayout {
    /// Keep the source track structure, renumbering tracks densely from 1
    /// in order of first appearance. Identity for well-formed input.
    #[default]
    Renumber,
    /// Fold every track onto track 1 and rewrite the header as format 0.
    Collapse,
}

impl TrackLayout {
    pub fn apply(&self, records: Vec<EventRecord>) -> Vec<EventRecord> {
        match self {
            TrackLayout::Renumber => renumber(records),
            TrackLayout::Collapse => collapse(records),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackLayout::Renumber => "renumber",
            TrackLayout::Collapse => "collapse",
        }
    }
}

impl FromStr for TrackLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "renumber" | "preserve" => Ok(TrackLayout::Renumber),
            "collapse" | "single" => Ok(TrackLayout::Collapse),
            other => Err(format!(
                "unknown track layout '{}' (expected 'renumber' or 'collapse')",
                other
            )),
        }
    }
}

impl std::fmt::Display for TrackLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn renumber(records: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut mapping: HashMap<u32, u32> = HashMap::new();
    let mut next = 1u32;

    records
        .into_iter()
        .map(|mut record| {
            if record.track != 0 {
                record.track = *mapping.entry(record.track).or_insert_with(|| {
                    next += 1;
                    next - 1
                });
            }
            record
        })
        .collect()
}

fn collapse(records: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut head = Vec::new();
    let mut body = Vec::new();
    let mut tail = Vec::new();
    let mut seen_track = false;
    let mut end_time = 0u64;

    for record in records {
        if record.track == 0 {
            if seen_track {
                tail.push(record);
            } else {
                head.push(record);
            }
            continue;
        }

        seen_track = true;
        end_time = end_time.max(record.time);
        if !matches!(record.kind, EventKind::StartTrack | EventKind::EndTrack) {
            body.push(record.with_track(1));
        }
    }

    // Stable: per-track order survives, tracks interleave by time.
    body.sort_by_key(|r| r.time);

    let track_count = if seen_track { "1" } else { "0" };
    let mut out: Vec<EventRecord> = head
        .into_iter()
        .map(|mut record| {
            if record.kind == EventKind::Header && record.params.len() >= 2 {
                record.params[0] = "0".to_string();
                record.params[1] = track_count.to_string();
            }
            record
        })
        .collect();

    if seen_track {
        out.push(structural(EventKind::StartTrack, 0));
        out.extend(body);
        out.push(structural(EventKind::EndTrack, end_time));
    }
    out.extend(tail);
    out
}

fn structural(kind: EventKind, time: u64) -> EventRecord {
    EventRecord::new(1, time, kind, None, Vec::new())
}
