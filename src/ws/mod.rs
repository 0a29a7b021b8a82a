//! Self-healing WebSocket client for the live feed.
//!
//! **Feature flag:** `ws` (enabled by default)
//!
//! # Architecture
//!
//! - [`ReconnectingSocket`]: owns one connection at a time and its reconnect timer
//! - [`EventSink`]: host-side receiver for messages, errors and closes
//! - [`Connector`]: opens transport connections; [`WsConnector`] uses `tokio-tungstenite`
//! - [`MessageParser`] and [`ParsingSink`]: typed decoding on top of raw frames
//!
//! # Example
//!
//! ```no_run
//! use sentiment_live::chart::ChartAdapter;
//! use sentiment_live::feed::{LiveEvent, LiveEventParser};
//! use sentiment_live::ws::{ParsingSink, ReconnectingSocket};
//! use sentiment_live::ws::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> sentiment_live::Result<()> {
//! let adapter = ChartAdapter::default();
//! let sink = ParsingSink::new(LiveEventParser::default(), move |event: LiveEvent| {
//!     if let Some(results) = event.as_results() {
//!         let charts = adapter.render_channels(results);
//!         println!("{} charts", charts.len());
//!     }
//! });
//!
//! let socket = ReconnectingSocket::from_env(Config::default(), sink)?;
//! socket.start();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod traits;
pub mod transport;

pub use connection::{ConnectionState, ReconnectingSocket};
#[expect(
    clippy::module_name_repetitions,
    reason = "WsError includes module name for clarity when used outside this module"
)]
pub use error::WsError;
pub use traits::{Connector, EventSink, MessageParser, ParsingSink, TransportEvent};
pub use transport::WsConnector;
