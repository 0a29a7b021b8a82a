use serde::Deserialize;
use serde_json::Value;

use super::types::LiveEvent;
use crate::Result;
use crate::serde_helpers::deserialize_with_warnings;

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Decode one backend frame.
///
/// Returns `Ok(None)` for blank frames (keepalives) and for event names this
/// crate does not know, so newer backends do not break older dashboards.
/// Malformed JSON or a known event with a malformed payload is an error.
pub fn parse_event(bytes: &[u8]) -> Result<Option<LiveEvent>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let envelope: Envelope = serde_json::from_slice(bytes)?;

    let event = match envelope.event.as_str() {
        "results" => LiveEvent::Results(deserialize_with_warnings(envelope.data)?),
        "messages" => LiveEvent::Messages(deserialize_with_warnings(envelope.data)?),
        _ => {
            #[cfg(feature = "tracing")]
            tracing::debug!(event = %envelope.event, "ignoring unknown feed event");
            return Ok(None);
        }
    };

    Ok(Some(event))
}

/// [`MessageParser`](crate::ws::MessageParser) for the dashboard feed.
#[cfg(feature = "ws")]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveEventParser;

#[cfg(feature = "ws")]
impl crate::ws::traits::MessageParser<LiveEvent> for LiveEventParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<LiveEvent>> {
        Ok(parse_event(bytes)?.into_iter().collect())
    }
}
