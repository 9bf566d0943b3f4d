//! Codec trait and implementations.
//!
//! A codec converts between wire events and raw bytes. The rest of the
//! stack only sees the [`Codec`] trait, so a binary codec could slot in
//! later without touching the server or room layers. For now there is
//! [`JsonCodec`], which matches what browser clients speak.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is shared across every
/// connection task for the life of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] speaking JSON via `serde_json`.
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use deckhand_protocol::{ClientEvent, Codec, JsonCodec, RoomId};
///
/// let codec = JsonCodec;
/// let event = ClientEvent::EndTurn { room: RoomId::from("kitchen") };
///
/// let bytes = codec.encode(&event).unwrap();
/// let decoded: ClientEvent = codec.decode(&bytes).unwrap();
/// assert_eq!(event, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use crate::ServerEvent;

    use super::*;

    #[test]
    fn test_json_codec_round_trips_events() {
        let codec = JsonCodec;
        let event = ServerEvent::ActionRejected { reason: "nope".to_string() };
        let bytes = codec.encode(&event).unwrap();
        let back: ServerEvent = codec.decode(&bytes).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let codec = JsonCodec;
        let result: Result<ServerEvent, _> = codec.decode(b"{\"event\": ");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_rejects_wrong_shape() {
        let codec = JsonCodec;
        let result: Result<ServerEvent, _> = codec.decode(b"[1, 2, 3]");
        assert!(result.is_err());
    }
}
