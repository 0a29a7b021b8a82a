#![expect(
    clippy::module_name_repetitions,
    reason = "Connection types expose their domain in the name for clarity"
)]

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff as _;
use futures::StreamExt as _;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use url::Url;

use super::config::{Config, endpoint_from_env};
use super::traits::{Connector, EventSink, TransportEvent};
use super::transport::WsConnector;
use crate::Result;

/// Connection state tracking.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected and not trying to
    Disconnected,
    /// Attempting to connect
    Connecting,
    /// Successfully connected
    Connected {
        /// When the connection was established
        since: Instant,
    },
    /// Waiting for the reconnect timer
    Reconnecting {
        /// Reconnection attempt the pending timer will start
        attempt: u32,
    },
}

impl ConnectionState {
    /// Check if the connection is currently active.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// A connection that re-establishes itself after errors and closes.
///
/// Inbound frames go to the [`EventSink`] unmodified and in order. Every
/// transport error and every close, clean or not, leads to a reconnect after
/// the configured delay (ten seconds by default, forever by default). Errors
/// are logged and reported to the sink, never returned.
///
/// At most one reconnect timer is pending at any time: a new close or a new
/// call to [`start`](Self::start) cancels the previous timer first.
///
/// Handles are cheap to clone and share one connection. Dropping the last
/// handle stops the connection and any pending reconnect. Must be used from
/// within a Tokio runtime.
///
/// # Example
///
/// ```no_run
/// use sentiment_live::ws::ReconnectingSocket;
/// use sentiment_live::ws::config::Config;
/// use sentiment_live::ws::traits::EventSink;
/// use tokio_tungstenite::tungstenite::Bytes;
///
/// # #[tokio::main]
/// # async fn main() -> sentiment_live::Result<()> {
/// let socket = ReconnectingSocket::from_env(Config::default(), |frame: Bytes| {
///     println!("{} bytes", frame.len());
/// })?;
/// socket.start();
/// # Ok(())
/// # }
/// ```
pub struct ReconnectingSocket<S, C = WsConnector>
where
    S: EventSink,
    C: Connector,
{
    inner: Arc<Inner<S, C>>,
}

struct Inner<S, C> {
    endpoint: Url,
    config: Config,
    sink: S,
    connector: Arc<C>,
    state_tx: watch::Sender<ConnectionState>,
    tasks: Mutex<Tasks>,
}

/// Mutable bookkeeping, only touched with the lock held and never across an await.
struct Tasks {
    /// Bumped for every connection; events from older connections are ignored
    connection_id: u64,
    connection: Option<JoinHandle<()>>,
    /// Bumped whenever a timer is armed or cancelled
    retry_id: u64,
    retry: Option<JoinHandle<()>>,
    retry_delay: Duration,
    /// Reconnect attempts since the last successful connect
    attempt: u32,
    backoff: ExponentialBackoff,
}

impl Tasks {
    fn new(config: &Config) -> Self {
        Self {
            connection_id: 0,
            connection: None,
            retry_id: 0,
            retry: None,
            retry_delay: config.reconnect.delay,
            attempt: 0,
            backoff: config.reconnect.clone().into(),
        }
    }

    /// Returns whether a timer was pending.
    fn cancel_retry(&mut self) -> bool {
        self.retry_id = self.retry_id.wrapping_add(1);
        match self.retry.take() {
            Some(pending) => {
                pending.abort();
                true
            }
            None => false,
        }
    }

    fn cancel_connection(&mut self) {
        self.connection_id = self.connection_id.wrapping_add(1);
        if let Some(connection) = self.connection.take() {
            connection.abort();
        }
    }
}

impl<S: EventSink> ReconnectingSocket<S> {
    /// Create a WebSocket-backed socket for `endpoint`. Nothing connects until
    /// [`start`](Self::start).
    pub fn new(endpoint: Url, config: Config, sink: S) -> Self {
        Self::with_connector(endpoint, config, sink, WsConnector)
    }

    /// Like [`new`](Self::new) with the endpoint resolved once from the build
    /// mode and environment (see [`endpoint_from_env`]).
    pub fn from_env(config: Config, sink: S) -> Result<Self> {
        Ok(Self::new(endpoint_from_env()?, config, sink))
    }
}

impl<S, C> ReconnectingSocket<S, C>
where
    S: EventSink,
    C: Connector,
{
    /// Create a socket that opens connections through `connector`.
    pub fn with_connector(endpoint: Url, config: Config, sink: S, connector: C) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        let tasks = Mutex::new(Tasks::new(&config));

        Self {
            inner: Arc::new(Inner {
                endpoint,
                config,
                sink,
                connector: Arc::new(connector),
                state_tx,
                tasks,
            }),
        }
    }

    /// Open a new connection, replacing any current one and cancelling any
    /// pending reconnect.
    pub fn start(&self) {
        self.inner.start();
    }

    /// Cancel the pending reconnect and drop the current connection.
    ///
    /// The socket stays [`ConnectionState::Disconnected`] until
    /// [`start`](Self::start) is called again.
    pub fn shutdown(&self) {
        let mut tasks = self.inner.tasks();
        tasks.cancel_retry();
        tasks.cancel_connection();
        self.inner.set_state(ConnectionState::Disconnected);

        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %self.inner.endpoint, "WebSocket shut down");
    }

    /// Get the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.inner.state_tx.borrow()
    }

    /// Subscribe to connection state changes.
    #[must_use]
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state_tx.subscribe()
    }

    /// Whether a reconnect timer is currently armed.
    #[must_use]
    pub fn has_pending_retry(&self) -> bool {
        self.inner
            .tasks()
            .retry
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    /// The endpoint every connection attempt uses.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// The sink receiving this socket's events.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.inner.sink
    }
}

impl<S, C> Inner<S, C>
where
    S: EventSink,
    C: Connector,
{
    fn tasks(&self) -> MutexGuard<'_, Tasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send_replace(state);
    }

    fn is_current(&self, connection_id: u64) -> bool {
        self.tasks().connection_id == connection_id
    }

    fn start(self: &Arc<Self>) {
        let mut tasks = self.tasks();
        tasks.cancel_retry();
        tasks.cancel_connection();
        let connection_id = tasks.connection_id;

        self.set_state(ConnectionState::Connecting);

        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %self.endpoint, "Opening WebSocket connection");

        tasks.connection = Some(tokio::spawn(Self::run_connection(
            Arc::downgrade(self),
            connection_id,
        )));
    }

    /// Drive one connection until it errors or closes.
    ///
    /// Holds only a weak reference across every await, including the connect,
    /// so dropping every handle ends it.
    async fn run_connection(this: Weak<Self>, connection_id: u64) {
        let Some((connector, endpoint)) = this
            .upgrade()
            .map(|inner| (Arc::clone(&inner.connector), inner.endpoint.clone()))
        else {
            return;
        };

        let connected = connector.connect(&endpoint).await;
        drop(connector);

        let Some(inner) = this.upgrade() else {
            return;
        };

        let mut events = match connected {
            Ok(events) => events,
            Err(e) => {
                inner.handle_error(connection_id, &e.to_string());
                return;
            }
        };

        if !inner.mark_connected(connection_id) {
            return;
        }
        drop(inner);

        loop {
            let event = events.next().await;
            let Some(inner) = this.upgrade() else {
                return;
            };

            match event {
                Some(TransportEvent::Message(message)) => {
                    if inner.is_current(connection_id) {
                        inner.sink.on_message(message);
                    }
                }
                Some(TransportEvent::Error(reason)) => {
                    drop(events);
                    inner.handle_error(connection_id, &reason);
                    return;
                }
                Some(TransportEvent::Close) | None => {
                    drop(events);
                    inner.handle_close(connection_id);
                    return;
                }
            }
        }
    }

    fn mark_connected(&self, connection_id: u64) -> bool {
        let mut tasks = self.tasks();
        if tasks.connection_id != connection_id {
            return false;
        }

        tasks.attempt = 0;
        tasks.backoff.reset();
        self.set_state(ConnectionState::Connected {
            since: Instant::now(),
        });

        #[cfg(feature = "tracing")]
        tracing::info!(endpoint = %self.endpoint, "WebSocket connected");

        true
    }

    fn handle_error(self: &Arc<Self>, connection_id: u64, reason: &str) {
        if !self.is_current(connection_id) {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::error!(endpoint = %self.endpoint, %reason, "WebSocket transport error");

        self.sink.on_error(reason);
        self.handle_close(connection_id);
    }

    fn handle_close(self: &Arc<Self>, connection_id: u64) {
        if !self.is_current(connection_id) {
            return;
        }

        self.sink.on_close();
        self.schedule_retry(connection_id);
    }

    fn schedule_retry(self: &Arc<Self>, connection_id: u64) {
        let mut tasks = self.tasks();
        if tasks.connection_id != connection_id {
            return;
        }

        // A superseded timer keeps its delay; only a fresh failure advances the backoff
        let delay = if tasks.cancel_retry() {
            tasks.retry_delay
        } else {
            if let Some(max) = self.config.reconnect.max_attempts
                && tasks.attempt >= max
            {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    endpoint = %self.endpoint,
                    attempts = tasks.attempt,
                    "Giving up reconnecting"
                );
                self.set_state(ConnectionState::Disconnected);
                return;
            }

            let Some(delay) = tasks.backoff.next_backoff() else {
                self.set_state(ConnectionState::Disconnected);
                return;
            };
            delay
        };

        let attempt = tasks.attempt.saturating_add(1);
        tasks.retry_delay = delay;
        let retry_id = tasks.retry_id;

        self.set_state(ConnectionState::Reconnecting { attempt });

        #[cfg(feature = "tracing")]
        tracing::warn!(
            endpoint = %self.endpoint,
            attempt,
            delay_ms = delay.as_millis(),
            "WebSocket disconnected, scheduling reconnect"
        );

        tasks.retry = Some(tokio::spawn(Self::fire_retry(
            Arc::downgrade(self),
            retry_id,
            delay,
        )));
    }

    async fn fire_retry(this: Weak<Self>, retry_id: u64, delay: Duration) {
        sleep(delay).await;

        let Some(inner) = this.upgrade() else {
            return;
        };
        {
            let mut tasks = inner.tasks();
            if tasks.retry_id != retry_id {
                return;
            }
            tasks.retry = None;
            tasks.attempt = tasks.attempt.saturating_add(1);
        }

        inner.start();
    }
}

impl<S, C> Drop for Inner<S, C> {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner);
        tasks.cancel_retry();
        tasks.cancel_connection();
    }
}

impl<S, C> Clone for ReconnectingSocket<S, C>
where
    S: EventSink,
    C: Connector,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, C> fmt::Debug for ReconnectingSocket<S, C>
where
    S: EventSink,
    C: Connector,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconnectingSocket")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
