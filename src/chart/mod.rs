//! Sentiment series to Chart.js line chart configuration.
//!
//! [`ChartAdapter`] is a pure transform: one [`ChartConfig`] per channel, with
//! one x-axis label and one point per series for every input sample, in input
//! order. Display options are fixed; only the labels, the series values and the
//! (hidden) chart title depend on the input.
//!
//! # Example
//!
//! ```
//! use sentiment_live::chart::{ChartAdapter, Sentiment};
//! use sentiment_live::feed::SentimentSample;
//! use sentiment_live::types::{DateTime, Utc};
//!
//! let sample = SentimentSample::builder()
//!     .timestamp(DateTime::<Utc>::from_timestamp(1_730_642_700, 0).unwrap())
//!     .positive(0.7)
//!     .neutral(0.2)
//!     .negative(0.1)
//!     .build();
//!
//! let chart = ChartAdapter::default().render("xqc", &[sample]);
//!
//! assert_eq!(chart.data.labels, ["03/11, 14:05"]);
//! assert_eq!(chart.series(Sentiment::Positive), [0.7]);
//! ```

pub mod config;
pub mod label;

use std::collections::BTreeMap;

pub use config::{ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, Sentiment};
pub use label::{HourCycle, LabelFormat, Locale};

use crate::feed::SentimentSample;

/// Renders sentiment samples into chart configurations.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartAdapter {
    pub labels: LabelFormat,
}

impl ChartAdapter {
    #[must_use]
    pub const fn new(labels: LabelFormat) -> Self {
        Self { labels }
    }

    /// Build the line chart for `channel` from `samples`.
    ///
    /// Values are copied without validation, so out-of-range or NaN scores
    /// reach the output unchanged (NaN serializes as `null`).
    #[must_use]
    pub fn render(&self, channel: &str, samples: &[SentimentSample]) -> ChartConfig {
        let labels = samples
            .iter()
            .map(|sample| self.labels.format(&sample.timestamp))
            .collect();

        let datasets = Sentiment::ALL
            .into_iter()
            .map(|sentiment| {
                let values = samples.iter().map(|s| sentiment.value(s)).collect();
                Dataset::new(sentiment, values)
            })
            .collect();

        ChartConfig {
            kind: ChartKind::Line,
            data: ChartData { labels, datasets },
            options: ChartOptions::for_channel(channel),
        }
    }

    /// Render every channel of a `results` event.
    #[must_use]
    pub fn render_channels(
        &self,
        channels: &BTreeMap<String, Vec<SentimentSample>>,
    ) -> BTreeMap<String, ChartConfig> {
        channels
            .iter()
            .map(|(channel, samples)| (channel.clone(), self.render(channel, samples)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;

    fn sample(minute: u32, positive: f64, neutral: f64, negative: f64) -> SentimentSample {
        SentimentSample::builder()
            .timestamp(Utc.with_ymd_and_hms(2024, 11, 3, 14, minute, 0).unwrap())
            .positive(positive)
            .neutral(neutral)
            .negative(negative)
            .build()
    }

    #[test]
    fn series_follow_input_order() {
        let samples = [
            sample(7, 0.1, 0.2, 0.7),
            sample(5, 0.5, 0.3, 0.2),
            sample(6, 0.9, 0.0, 0.1),
        ];

        let chart = ChartAdapter::default().render("xqc", &samples);

        assert_eq!(
            chart.data.labels,
            ["03/11, 14:07", "03/11, 14:05", "03/11, 14:06"]
        );
        assert_eq!(chart.series(Sentiment::Positive), [0.1, 0.5, 0.9]);
        assert_eq!(chart.series(Sentiment::Neutral), [0.2, 0.3, 0.0]);
        assert_eq!(chart.series(Sentiment::Negative), [0.7, 0.2, 0.1]);
    }

    #[test]
    fn duplicates_are_kept() {
        let samples = [sample(5, 0.5, 0.3, 0.2), sample(5, 0.5, 0.3, 0.2)];

        let chart = ChartAdapter::default().render("xqc", &samples);

        assert_eq!(chart.data.labels.len(), 2);
        assert_eq!(chart.data.labels[0], chart.data.labels[1]);
    }

    #[test]
    fn datasets_are_positive_neutral_negative() {
        let chart = ChartAdapter::default().render("xqc", &[]);

        let labels: Vec<_> = chart.data.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Positive Sentiment", "Neutral Sentiment", "Negative Sentiment"]
        );
    }

    #[test]
    fn title_names_channel() {
        let chart = ChartAdapter::default().render("shroud", &[]);

        assert_eq!(chart.options.plugins.title.text, "Channel: shroud");
        assert!(!chart.options.plugins.title.display, "title hidden");
    }

    #[test]
    fn render_channels_keys_by_channel() {
        let mut channels = BTreeMap::new();
        channels.insert("a".to_owned(), vec![sample(1, 0.1, 0.1, 0.8)]);
        channels.insert("b".to_owned(), Vec::new());

        let charts = ChartAdapter::default().render_channels(&channels);

        assert_eq!(charts.len(), 2);
        assert_eq!(charts["a"].data.labels.len(), 1);
        assert!(charts["b"].data.labels.is_empty(), "empty channel");
        assert_eq!(charts["b"].options.plugins.title.text, "Channel: b");
    }
}
