//! Split a multi-channel MIDI file into one MIDI file per channel.
//!
//! The input is converted to `midicsv` text (or read as such), parsed into
//! event records, partitioned per channel by [`chansplit`], and each channel
//! is encoded back to MIDI through a [`Converter`]. Outputs are staged and
//! only moved into `split_channels/` once every channel has been encoded.
//!
//! ```no_run
//! use midisplit::{ExternalTools, Orchestrator, RunOptions};
//! use std::path::Path;
//!
//! # async fn demo() -> Result<(), midisplit::SplitError> {
//! let orchestrator = Orchestrator::new(ExternalTools::default(), RunOptions::default());
//! let report = orchestrator.run(Path::new("song.mid")).await?;
//! for channel in &report.channels {
//!     println!("channel {} -> {}", channel.channel, channel.midi.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod converter;
pub mod detect;
pub mod error;
pub mod orchestrator;
pub mod staging;

pub use converter::{ConvertError, Converter, ExternalTools};
pub use detect::InputFormat;
pub use error::{ErrorKind, SplitError};
pub use orchestrator::{ChannelOutput, Orchestrator, RunOptions, RunReport};
pub use staging::StagingArea;
