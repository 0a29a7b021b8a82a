use std::collections::BTreeMap;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-minute average sentiment for one channel.
///
/// Scores are nominally in `[0, 1]`; the range is not enforced and values
/// travel into chart output unchanged.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct SentimentSample {
    /// Start of the minute the averages cover
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "avg_sentiment_positive")]
    pub positive: f64,
    #[serde(rename = "avg_sentiment_neutral")]
    pub neutral: f64,
    #[serde(rename = "avg_sentiment_negative")]
    pub negative: f64,
}

/// A single classified chat message.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct ChatMessage {
    #[builder(into)]
    pub user: String,
    #[builder(into)]
    pub message: String,
    #[builder(into)]
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "sentiment_positive")]
    pub positive: f64,
    #[serde(rename = "sentiment_neutral")]
    pub neutral: f64,
    #[serde(rename = "sentiment_negative")]
    pub negative: f64,
}

/// Per-channel sentiment history, keyed by channel name.
pub type ChannelResults = BTreeMap<String, Vec<SentimentSample>>;

/// Per-channel recent messages, keyed by channel name.
pub type ChannelMessages = BTreeMap<String, Vec<ChatMessage>>;

/// An event pushed by the dashboard backend.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    /// Sentiment averages for the current hour, oldest first
    Results(ChannelResults),
    /// Most recent classified messages, newest first
    Messages(ChannelMessages),
}

impl LiveEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Results(_) => "results",
            Self::Messages(_) => "messages",
        }
    }

    #[must_use]
    pub fn as_results(&self) -> Option<&ChannelResults> {
        match self {
            Self::Results(results) => Some(results),
            Self::Messages(_) => None,
        }
    }

    #[must_use]
    pub fn as_messages(&self) -> Option<&ChannelMessages> {
        match self {
            Self::Messages(messages) => Some(messages),
            Self::Results(_) => None,
        }
    }
}
