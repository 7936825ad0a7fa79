//! The `midicsv` event vocabulary.

use serde::{Deserialize, Serialize};

/// Where an event applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// File-level records on track 0 (`Header`, `End_of_file`)
    File,
    /// Track structure and meta events shared by every channel
    Global,
    /// Events carrying a MIDI channel
    Channel,
}

/// The kind tag of an event line.
///
/// Tags outside the known vocabulary are kept as [`EventKind::Unrecognized`]
/// and treated as global, so newer `midicsv` output never gets dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Header,
    EndOfFile,
    StartTrack,
    EndTrack,

    NoteOn,
    NoteOff,
    PolyAftertouch,
    ControlChange,
    ProgramChange,
    ChannelAftertouch,
    PitchBend,

    Title,
    Copyright,
    InstrumentName,
    Marker,
    CuePoint,
    Lyric,
    Text,
    SequenceNumber,
    MidiPort,
    ChannelPrefix,
    Tempo,
    TimeSignature,
    KeySignature,
    SmpteOffset,
    SystemExclusive,
    SystemExclusivePacket,
    SequencerSpecific,
    UnknownMetaEvent,

    Unrecognized(String),
}

/// Tag, kind, scope and minimum parameter count (not counting the channel).
static VOCABULARY: &[(&str, EventKind, Scope, usize)] = &[
    ("Header", EventKind::Header, Scope::File, 3),
    ("End_of_file", EventKind::EndOfFile, Scope::File, 0),
    ("Start_track", EventKind::StartTrack, Scope::Global, 0),
    ("End_track", EventKind::EndTrack, Scope::Global, 0),
    ("Note_on_c", EventKind::NoteOn, Scope::Channel, 2),
    ("Note_off_c", EventKind::NoteOff, Scope::Channel, 2),
    ("Poly_aftertouch_c", EventKind::PolyAftertouch, Scope::Channel, 2),
    ("Control_c", EventKind::ControlChange, Scope::Channel, 2),
    ("Program_c", EventKind::ProgramChange, Scope::Channel, 1),
    ("Channel_aftertouch_c", EventKind::ChannelAftertouch, Scope::Channel, 1),
    ("Pitch_bend_c", EventKind::PitchBend, Scope::Channel, 1),
    ("Title_t", EventKind::Title, Scope::Global, 1),
    ("Copyright_t", EventKind::Copyright, Scope::Global, 1),
    ("Instrument_name_t", EventKind::InstrumentName, Scope::Global, 1),
    ("Marker_t", EventKind::Marker, Scope::Global, 1),
    ("Cue_point_t", EventKind::CuePoint, Scope::Global, 1),
    ("Lyric_t", EventKind::Lyric, Scope::Global, 1),
    ("Text_t", EventKind::Text, Scope::Global, 1),
    ("Sequence_number", EventKind::SequenceNumber, Scope::Global, 1),
    ("MIDI_port", EventKind::MidiPort, Scope::Global, 1),
    ("Channel_prefix", EventKind::ChannelPrefix, Scope::Global, 1),
    ("Tempo", EventKind::Tempo, Scope::Global, 1),
    ("Time_signature", EventKind::TimeSignature, Scope::Global, 4),
    ("Key_signature", EventKind::KeySignature, Scope::Global, 2),
    ("SMPTE_offset", EventKind::SmpteOffset, Scope::Global, 5),
    ("System_exclusive", EventKind::SystemExclusive, Scope::Global, 1),
    (
        "System_exclusive_packet",
        EventKind::SystemExclusivePacket,
        Scope::Global,
        1,
    ),
    ("Sequencer_specific", EventKind::SequencerSpecific, Scope::Global, 1),
    ("Unknown_meta_event", EventKind::UnknownMetaEvent, Scope::Global, 1),
];

impl EventKind {
    /// Look up a tag. Unknown tags map to [`EventKind::Unrecognized`].
    pub fn from_tag(tag: &str) -> Self {
        VOCABULARY
            .iter()
            .find(|(name, ..)| *name == tag)
            .map(|(_, kind, ..)| kind.clone())
            .unwrap_or_else(|| EventKind::Unrecognized(tag.to_string()))
    }

    /// The tag as written in `midicsv` text.
    pub fn tag(&self) -> &str {
        match self {
            EventKind::Unrecognized(tag) => tag,
            known => Self::entry(known).map(|(name, ..)| *name).unwrap_or(""),
        }
    }

    pub fn scope(&self) -> Scope {
        Self::entry(self)
            .map(|(_, _, scope, _)| *scope)
            .unwrap_or(Scope::Global)
    }

    pub fn is_channel_scoped(&self) -> bool {
        self.scope() == Scope::Channel
    }

    /// Minimum number of parameters after the channel field (if any).
    pub fn min_params(&self) -> usize {
        Self::entry(self).map(|(.., min)| *min).unwrap_or(0)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, EventKind::Unrecognized(_))
    }

    fn entry(kind: &EventKind) -> Option<&'static (&'static str, EventKind, Scope, usize)> {
        VOCABULARY.iter().find(|(_, known, ..)| known == kind)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
