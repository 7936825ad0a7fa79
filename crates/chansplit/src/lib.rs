pub mod layout;
pub mod split;
pub mod stream;

pub use layout::TrackLayout;
pub use split::{split_channels, SplitAccumulator, SplitOptions};
pub use stream::{ChannelSplit, ChannelStream};
