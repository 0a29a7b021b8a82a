use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt as _, future};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use url::Url;

use super::error::WsError;
use super::traits::{Connector, TransportEvent};
use crate::Result;

/// [`Connector`] backed by `tokio-tungstenite`.
///
/// Text and binary frames become [`TransportEvent::Message`]; ping and pong
/// frames are handled by the protocol layer and not reported.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, endpoint: &Url) -> Result<BoxStream<'static, TransportEvent>> {
        let (stream, _response) = connect_async(endpoint.as_str())
            .await
            .map_err(WsError::Connection)?;

        Ok(stream
            .filter_map(|frame| future::ready(into_event(frame)))
            .boxed())
    }
}

fn into_event(frame: tungstenite::Result<Message>) -> Option<TransportEvent> {
    match frame {
        Ok(Message::Text(text)) => Some(TransportEvent::Message(text.into())),
        Ok(Message::Binary(data)) => Some(TransportEvent::Message(data)),
        Ok(Message::Close(_))
        | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
            Some(TransportEvent::Close)
        }
        Ok(_) => None,
        Err(e) => Some(TransportEvent::Error(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use tokio_tungstenite::tungstenite::Bytes;

    use super::*;

    #[test]
    fn text_and_binary_are_messages() {
        assert_eq!(
            into_event(Ok(Message::text("hello"))),
            Some(TransportEvent::Message(Bytes::from_static(b"hello")))
        );
        assert_eq!(
            into_event(Ok(Message::binary(vec![1_u8, 2, 3]))),
            Some(TransportEvent::Message(Bytes::from_static(&[1, 2, 3])))
        );
    }

    #[test]
    fn control_frames_are_skipped() {
        assert_eq!(into_event(Ok(Message::Ping(Bytes::new()))), None);
        assert_eq!(into_event(Ok(Message::Pong(Bytes::new()))), None);
    }

    #[test]
    fn close_frame_and_closed_errors_are_close() {
        assert_eq!(
            into_event(Ok(Message::Close(None))),
            Some(TransportEvent::Close)
        );
        assert_eq!(
            into_event(Err(tungstenite::Error::ConnectionClosed)),
            Some(TransportEvent::Close)
        );
    }

    #[test]
    fn other_errors_are_reported() {
        let event = into_event(Err(tungstenite::Error::Io(std::io::Error::other("reset"))));

        assert!(
            matches!(event, Some(TransportEvent::Error(_))),
            "got {event:?}"
        );
    }

    #[tokio::test]
    async fn connect_refused_is_websocket_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("ws://{addr}/ws")).unwrap();
        let err = WsConnector
            .connect(&endpoint)
            .await
            .err()
            .expect("nothing listens on the port");

        assert_eq!(err.kind(), crate::error::Kind::WebSocket);
    }
}
