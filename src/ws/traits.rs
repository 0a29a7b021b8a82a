//! Seams between the reconnecting socket, its transport, and the host.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio_tungstenite::tungstenite::Bytes;
use url::Url;

/// Receives everything a [`ReconnectingSocket`](super::ReconnectingSocket) observes.
///
/// Implemented by the host. Messages arrive verbatim and in transport order.
/// Errors and closes are notifications only; the socket recovers on its own.
///
/// Any `Fn(Bytes)` closure is a sink that ignores errors and closes.
pub trait EventSink: Send + Sync + 'static {
    /// An inbound frame, unmodified.
    fn on_message(&self, message: Bytes);

    /// The transport failed; `reason` is for diagnostics.
    fn on_error(&self, _reason: &str) {}

    /// The transport closed, cleanly or after an error.
    fn on_close(&self) {}
}

impl<F> EventSink for F
where
    F: Fn(Bytes) + Send + Sync + 'static,
{
    fn on_message(&self, message: Bytes) {
        self(message);
    }
}

/// What a transport reports while a connection is open.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text or binary frame
    Message(Bytes),
    /// The transport failed, with a description for diagnostics
    Error(String),
    /// The transport closed
    Close,
}

/// Opens transport connections.
///
/// A returned stream represents one open connection. Dropping it closes the
/// connection. A stream that ends without [`TransportEvent::Close`] is treated
/// as closed.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, endpoint: &Url) -> crate::Result<BoxStream<'static, TransportEvent>>;
}

/// Message parser trait for converting raw bytes to messages.
///
/// # Example
///
/// ```ignore
/// pub struct SimpleParser;
///
/// impl MessageParser<MyMessage> for SimpleParser {
///     fn parse(&self, bytes: &[u8]) -> crate::Result<Vec<MyMessage>> {
///         let msg: MyMessage = serde_json::from_slice(bytes)?;
///         Ok(vec![msg])
///     }
/// }
/// ```
pub trait MessageParser<M>: Send + Sync + 'static {
    /// Parse incoming bytes into messages.
    ///
    /// May return an empty vec for frames that carry nothing of interest.
    fn parse(&self, bytes: &[u8]) -> crate::Result<Vec<M>>;
}

/// [`EventSink`] that decodes each frame with a [`MessageParser`] and hands
/// the typed messages to a callback.
///
/// Frames that fail to parse are logged and dropped; the connection stays up.
pub struct ParsingSink<M, P, F> {
    parser: P,
    handler: F,
    _message: PhantomData<fn() -> M>,
}

impl<M, P, F> ParsingSink<M, P, F>
where
    M: 'static,
    P: MessageParser<M>,
    F: Fn(M) + Send + Sync + 'static,
{
    /// Decode frames with `parser` and pass each message to `handler`.
    pub fn new(parser: P, handler: F) -> Self {
        Self {
            parser,
            handler,
            _message: PhantomData,
        }
    }
}

impl<M, P, F> EventSink for ParsingSink<M, P, F>
where
    M: 'static,
    P: MessageParser<M>,
    F: Fn(M) + Send + Sync + 'static,
{
    #[cfg_attr(
        not(feature = "tracing"),
        expect(unused_variables, reason = "Parse errors are only logged")
    )]
    fn on_message(&self, message: Bytes) {
        match self.parser.parse(&message) {
            Ok(messages) => {
                for parsed in messages {
                    (self.handler)(parsed);
                }
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "Failed to parse WebSocket message");
            }
        }
    }
}

impl<M, P: fmt::Debug, F> fmt::Debug for ParsingSink<M, P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingSink")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
