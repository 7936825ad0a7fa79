use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// What kind of file the user handed us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Standard MIDI file, decoded through the converter.
    Midi,
    /// `midicsv` text, parsed directly.
    Csv,
}

impl InputFormat {
    /// Classify an input by extension, falling back to sniffing its contents.
    ///
    /// A `.mid`/`.midi` extension wins outright. Otherwise the bytes are
    /// offered to `midly`; anything it cannot read as an SMF header is
    /// treated as text.
    pub fn detect(path: &Path, contents: &[u8]) -> Self {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"))
            .unwrap_or(false);

        if by_extension || midly::parse(contents).is_ok() {
            InputFormat::Midi
        } else {
            InputFormat::Csv
        }
    }

    pub fn is_midi(self) -> bool {
        matches!(self, InputFormat::Midi)
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Midi => f.write_str("midi"),
            InputFormat::Csv => f.write_str("csv"),
        }
    }
}
