//! Fragment sources and offline completion providers.

mod channel;
mod replay;

pub use channel::{ChannelFragmentSource, FragmentSender};
pub use replay::{ReplayProvider, split_fragments};
