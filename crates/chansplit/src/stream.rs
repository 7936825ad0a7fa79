use midicsv::EventRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The records destined for one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStream {
    pub channel: u8,
    pub records: Vec<EventRecord>,
}

impl ChannelStream {
    /// Number of records that belong to this channel (as opposed to shared globals).
    pub fn channel_event_count(&self) -> usize {
        self.records.iter().filter(|r| r.channel.is_some()).count()
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.records.iter().map(EventRecord::to_line).collect()
    }

    pub fn to_document(&self) -> String {
        midicsv::to_document(&self.records)
    }
}

/// Result of splitting one input, ordered by ascending channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSplit {
    pub(crate) streams: BTreeMap<u8, ChannelStream>,
    pub(crate) global_count: usize,
}

impl ChannelSplit {
    pub fn streams(&self) -> impl Iterator<Item = &ChannelStream> {
        self.streams.values()
    }

    pub fn into_streams(self) -> Vec<ChannelStream> {
        self.streams.into_values().collect()
    }

    pub fn channels(&self) -> Vec<u8> {
        self.streams.keys().copied().collect()
    }

    pub fn get(&self, channel: u8) -> Option<&ChannelStream> {
        self.streams.get(&channel)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// True when the input had no channel-scoped records at all.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Number of global records in the input, shared by every stream.
    pub fn global_count(&self) -> usize {
        self.global_count
    }
}
