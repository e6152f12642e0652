//! UI dispatcher adapters.

mod channel;
mod inline;

pub use channel::{ChannelDispatcher, UiLoop};
pub use inline::InlineDispatcher;
