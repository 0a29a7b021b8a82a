//! Connects to the live sentiment feed and renders a chart per channel for
//! every `results` event.
//!
//! Debug builds connect to `ws://localhost:8080/ws`. Release builds read the
//! endpoint from `SENTIMENT_WEBSOCKET_URL`.
//!
//! Run with tracing enabled:
//! ```sh
//! RUST_LOG=info cargo run --example live_chart
//! ```

use std::time::Duration;

use sentiment_live::chart::{ChartAdapter, Sentiment};
use sentiment_live::feed::{LiveEvent, LiveEventParser};
use sentiment_live::ws::config::Config;
use sentiment_live::ws::{ParsingSink, ReconnectingSocket};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let adapter = ChartAdapter::default();
    let sink = ParsingSink::new(LiveEventParser::default(), move |event: LiveEvent| match event {
        LiveEvent::Results(results) => {
            for (channel, chart) in adapter.render_channels(&results) {
                info!(
                    channel = %channel,
                    points = chart.data.labels.len(),
                    latest_label = ?chart.data.labels.last(),
                    latest_positive = ?chart.series(Sentiment::Positive).last(),
                    "Rendered chart"
                );
                debug!(config = %serde_json::to_string(&chart).unwrap_or_default());
            }
        }
        LiveEvent::Messages(messages) => {
            for (channel, batch) in &messages {
                info!(channel = %channel, count = batch.len(), "Received chat messages");
            }
        }
        _ => {}
    });

    let socket = ReconnectingSocket::from_env(Config::default(), sink)?;
    info!(endpoint = %socket.endpoint(), "Starting live feed");
    socket.start();

    let mut states = socket.state_receiver();
    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                info!(state = ?*states.borrow_and_update(), "Connection state changed");
            }
            () = tokio::time::sleep(Duration::from_secs(60)) => {
                debug!(retry_pending = socket.has_pending_retry(), "Still running");
            }
        }
    }

    Ok(())
}
