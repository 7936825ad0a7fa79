//! A single parsed event line.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::fields::split_fields;
use crate::kind::{EventKind, Scope};

/// Separator written between fields, matching `midicsv` output.
const SEPARATOR: &str = ", ";

/// One line of `midicsv` text.
///
/// `params` holds the fields after the kind tag (and after the channel for
/// channel-scoped kinds) exactly as they appeared, quotes included. The
/// numeric fields remember their source text too (`01`, `+1`), which
/// [`to_line`](Self::to_line) reuses as long as the value is unchanged.
/// Equality compares values only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub track: u32,
    pub time: u64,
    pub kind: EventKind,
    pub channel: Option<u8>,
    pub params: Vec<String>,
    #[serde(skip)]
    spelling: Spelling,
}

/// Source text of the numeric fields of a parsed line.
#[derive(Debug, Clone, Default)]
struct Spelling {
    track: Option<String>,
    time: Option<String>,
    channel: Option<String>,
}

impl PartialEq for EventRecord {
    fn eq(&self, other: &Self) -> bool {
        self.track == other.track
            && self.time == other.time
            && self.kind == other.kind
            && self.channel == other.channel
            && self.params == other.params
    }
}

impl Eq for EventRecord {}

impl EventRecord {
    /// Build a record with canonical number formatting.
    pub fn new(
        track: u32,
        time: u64,
        kind: EventKind,
        channel: Option<u8>,
        params: Vec<String>,
    ) -> Self {
        EventRecord {
            track,
            time,
            kind,
            channel,
            params,
            spelling: Spelling::default(),
        }
    }

    /// Parse a single line (without its terminator).
    pub fn parse_line(line: &str) -> Result<Self, RecordError> {
        let fields = split_fields(line)?;
        if fields.len() < 3 {
            return Err(RecordError::MissingFields {
                found: fields.len(),
            });
        }

        let mut fields = fields.into_iter();
        let track_field = fields.next().unwrap_or_default();
        let time_field = fields.next().unwrap_or_default();
        let kind = EventKind::from_tag(&fields.next().unwrap_or_default());

        let track = track_field
            .parse::<u32>()
            .map_err(|_| RecordError::InvalidTrack(track_field.clone()))?;
        let time = time_field
            .parse::<u64>()
            .map_err(|_| RecordError::InvalidTime(time_field.clone()))?;

        let (channel, channel_text) = if kind.is_channel_scoped() {
            let value = fields.next().ok_or_else(|| RecordError::MissingChannel {
                kind: kind.tag().to_string(),
            })?;
            (Some(parse_channel(&kind, &value)?), Some(value))
        } else {
            (None, None)
        };

        let params: Vec<String> = fields.collect();
        if params.len() < kind.min_params() {
            return Err(RecordError::TooFewParams {
                kind: kind.tag().to_string(),
                expected: kind.min_params(),
                found: params.len(),
            });
        }

        Ok(EventRecord {
            track,
            time,
            kind,
            channel,
            params,
            spelling: Spelling {
                track: Some(track_field),
                time: Some(time_field),
                channel: channel_text,
            },
        })
    }

    /// Serialize back to a `midicsv` line (without terminator).
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            spelled(self.spelling.track.as_deref(), self.track),
            spelled(self.spelling.time.as_deref(), self.time),
            self.kind.tag()
        );
        if let Some(channel) = self.channel {
            line.push_str(SEPARATOR);
            line.push_str(&spelled(self.spelling.channel.as_deref(), channel));
        }
        for param in &self.params {
            line.push_str(SEPARATOR);
            line.push_str(param);
        }
        line
    }

    pub fn scope(&self) -> Scope {
        self.kind.scope()
    }

    /// True for records with no channel: file-level, meta and unrecognized.
    pub fn is_global(&self) -> bool {
        self.channel.is_none()
    }

    /// Copy of this record moved onto another track.
    pub fn with_track(&self, track: u32) -> Self {
        EventRecord {
            track,
            ..self.clone()
        }
    }
}

/// The source text when it still denotes `value`, else the canonical form.
fn spelled<T>(raw: Option<&str>, value: T) -> String
where
    T: std::str::FromStr + PartialEq + ToString,
{
    match raw {
        Some(raw) if raw.parse::<T>().ok().as_ref() == Some(&value) => raw.to_string(),
        _ => value.to_string(),
    }
}

fn parse_channel(kind: &EventKind, value: &str) -> Result<u8, RecordError> {
    match value.parse::<u8>() {
        Ok(channel) if channel <= 15 => Ok(channel),
        _ => Err(RecordError::InvalidChannel {
            kind: kind.tag().to_string(),
            value: value.to_string(),
        }),
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}
