#![expect(
    clippy::module_name_repetitions,
    reason = "Schema types mirror the chart configuration they describe"
)]

//! Chart.js configuration schema for sentiment line charts.
//!
//! Field names serialize in camelCase so the value can be handed to Chart.js
//! as-is. Only the subset of the schema these charts use is modelled.

use serde::Serialize;

use crate::feed::SentimentSample;

/// Full configuration for one chart.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Values of one sentiment series, aligned with [`ChartData::labels`].
    #[must_use]
    pub fn series(&self, sentiment: Sentiment) -> &[f64] {
        self.data
            .datasets
            .iter()
            .find(|dataset| dataset.label == sentiment.label())
            .map_or(&[][..], |dataset| dataset.data.as_slice())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
}

impl Dataset {
    pub(crate) fn new(sentiment: Sentiment, data: Vec<f64>) -> Self {
        Self {
            label: sentiment.label().to_owned(),
            data,
            border_color: sentiment.border_color().to_owned(),
            background_color: sentiment.background_color().to_owned(),
            border_width: 1,
            fill: true,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

impl ChartOptions {
    pub(crate) fn for_channel(channel: &str) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                tooltip: Interaction::index(),
                hover: Interaction::index(),
                title: Title {
                    display: false,
                    text: format!("Channel: {channel}"),
                },
            },
            scales: Scales {
                x: Axis {
                    title: Title::shown("Timestamp"),
                    begin_at_zero: None,
                    max: None,
                },
                y: Axis {
                    title: Title::shown("Average Sentiment"),
                    begin_at_zero: Some(true),
                    max: Some(1.0),
                },
            },
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub tooltip: Interaction,
    pub hover: Interaction,
    pub title: Title,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub intersect: bool,
}

impl Interaction {
    const fn index() -> Self {
        Self {
            mode: InteractionMode::Index,
            intersect: false,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_owned(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// The three plotted sentiment series, in dataset order.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive Sentiment",
            Self::Neutral => "Neutral Sentiment",
            Self::Negative => "Negative Sentiment",
        }
    }

    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Self::Positive => "rgba(75, 192, 192, 1)",
            Self::Neutral => "rgba(255, 206, 86, 1)",
            Self::Negative => "rgba(255, 99, 132, 1)",
        }
    }

    #[must_use]
    pub const fn background_color(self) -> &'static str {
        match self {
            Self::Positive => "rgba(75, 192, 192, 0.2)",
            Self::Neutral => "rgba(255, 206, 86, 0.2)",
            Self::Negative => "rgba(255, 99, 132, 0.2)",
        }
    }

    /// The score of this series in `sample`.
    #[must_use]
    pub const fn value(self, sample: &SentimentSample) -> f64 {
        match self {
            Self::Positive => sample.positive,
            Self::Neutral => sample.neutral,
            Self::Negative => sample.negative,
        }
    }
}
