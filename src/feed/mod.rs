//! Payloads pushed by the sentiment dashboard backend.
//!
//! The backend broadcasts JSON envelopes of the form
//! `{"event": "<name>", "data": <payload>}` on a fixed schedule:
//!
//! - `results`: per-channel sentiment averages for the current hour
//! - `messages`: per-channel recent chat messages with their scores
//!
//! [`parse_event`] decodes one frame into a [`LiveEvent`]. With the `ws`
//! feature, [`LiveEventParser`] plugs the same decoding into
//! [`ParsingSink`](crate::ws::ParsingSink).

pub mod parser;
pub mod types;

#[cfg(feature = "ws")]
pub use parser::LiveEventParser;
pub use parser::parse_event;
pub use types::{ChannelMessages, ChannelResults, ChatMessage, LiveEvent, SentimentSample};
