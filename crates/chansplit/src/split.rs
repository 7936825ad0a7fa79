use crate::layout::TrackLayout;
use crate::stream::{ChannelSplit, ChannelStream};
use midicsv::EventRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters controlling how split streams are laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOptions {
    pub layout: TrackLayout,
}

/// Running state of the single pass over an input's records.
///
/// `globals` holds every global record seen so far so that a channel first
/// seen late still starts with the full header and tempo context.
#[derive(Debug, Clone, Default)]
pub struct SplitAccumulator {
    globals: Vec<EventRecord>,
    channels: BTreeMap<u8, Vec<EventRecord>>,
}

impl SplitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the accumulator.
    pub fn absorb(mut self, record: &EventRecord) -> Self {
        match record.channel {
            Some(channel) => {
                let globals = &self.globals;
                self.channels
                    .entry(channel)
                    .or_insert_with(|| globals.clone())
                    .push(record.clone());
            }
            None => {
                for stream in self.channels.values_mut() {
                    stream.push(record.clone());
                }
                self.globals.push(record.clone());
            }
        }
        self
    }

    pub fn finish(self, options: &SplitOptions) -> ChannelSplit {
        let streams = self
            .channels
            .into_iter()
            .map(|(channel, records)| {
                let records = options.layout.apply(records);
                (channel, ChannelStream { channel, records })
            })
            .collect();

        ChannelSplit {
            streams,
            global_count: self.globals.len(),
        }
    }
}

/// Partition records into one stream per discovered channel.
///
/// Channel-scoped records go to their own channel only; global records go to
/// every channel, in their original position. Channels are discovered from
/// the data, not assumed to be contiguous or to start at 0.
pub fn split_channels(records: &[EventRecord], options: &SplitOptions) -> ChannelSplit {
    records
        .iter()
        .fold(SplitAccumulator::new(), SplitAccumulator::absorb)
        .finish(options)
}
