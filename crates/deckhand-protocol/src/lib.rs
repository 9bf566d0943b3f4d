//! Wire protocol for Deckhand.
//!
//! This crate defines the language clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`RoomId`]) — the
//!   `{"event", "data"}` frames that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those frames are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing that.
//!
//! The protocol layer sits between transport (raw bytes) and rooms
//! (game state). It doesn't know about connections or turns — it only
//! knows how to name actions and serialize state.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientEvent, RoomId, ServerEvent};
