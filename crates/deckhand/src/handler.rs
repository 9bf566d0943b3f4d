//! Per-connection handler: decode, dispatch, push broadcasts.
//!
//! Each accepted connection gets two Tokio tasks: this handler, which
//! reads client events and routes them to room actors, and a writer
//! task, which drains the connection's event channel and pushes encoded
//! frames to the socket. Room broadcasts land on the same channel, so
//! the writer is the single egress path for a client.

use std::sync::Arc;

use deckhand_game::{Player, PlayerId};
use deckhand_protocol::{ClientEvent, Codec, RoomId, ServerEvent};
use deckhand_room::{EventSender, RoomError, RoomHandle};
use deckhand_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::DeckhandError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
///
/// There is no handshake: the connection id doubles as the player id,
/// and identity within a room comes from the pseudonym sent on join.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), DeckhandError> {
    let conn_id = conn.id();
    let player_id = PlayerId(conn_id.into_inner());
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    // Writer task: the only place that touches the socket's send half.
    // Rooms broadcast into the channel; we encode and push here.
    let writer = {
        let conn = conn.clone();
        let codec = state.codec;
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let bytes = match codec.encode(&event) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to encode server event");
                        continue;
                    }
                };
                if conn.send(&bytes).await.is_err() {
                    break;
                }
            }
        })
    };

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode client event");
                let _ = tx.send(ServerEvent::ActionRejected {
                    reason: format!("invalid event: {e}"),
                });
                continue;
            }
        };

        if let Err(e) = dispatch_event(&state, player_id, &tx, event).await {
            tracing::debug!(%conn_id, error = %e, "action refused");
            let _ = tx.send(rejection_event(&e));
        }
    }

    writer.abort();
    Ok(())
}

/// Routes one client event to its room actor.
async fn dispatch_event(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    sender: &EventSender,
    event: ClientEvent,
) -> Result<(), RoomError> {
    match event {
        ClientEvent::JoinRoom { room, pseudo } => {
            // A join is the only path that may create the room.
            let handle = state.rooms.lock().await.open(&room);
            handle.join(Player::new(player_id, pseudo), sender.clone()).await
        }
        ClientEvent::LeaveRoom { room, pseudo } => {
            room_handle(state, &room).await?.leave(pseudo).await
        }
        ClientEvent::StartGame { room } => room_handle(state, &room).await?.start().await,
        ClientEvent::PlayCard { pseudo, room, card_index } => {
            room_handle(state, &room).await?.play_card(pseudo, card_index).await
        }
        ClientEvent::PickCard { pseudo, room } => {
            room_handle(state, &room).await?.pick_card(pseudo).await
        }
        ClientEvent::EndTurn { room } => room_handle(state, &room).await?.end_turn().await,
        ClientEvent::SetColor { room, color } => {
            room_handle(state, &room).await?.set_color(color).await
        }
    }
}

/// Looks up an existing room. Everything except a join requires the
/// room to already exist.
async fn room_handle(state: &Arc<ServerState>, room: &RoomId) -> Result<RoomHandle, RoomError> {
    state.rooms.lock().await.get(room)
}

/// Maps a refused action to the event the client hears about it.
///
/// The three join rejections have dedicated bare events; everything
/// else becomes an `actionRejected` carrying the error's message.
fn rejection_event(err: &RoomError) -> ServerEvent {
    match err {
        RoomError::DuplicatePseudonym(_) => ServerEvent::UnavailablePseudo,
        RoomError::RoomFull(_) => ServerEvent::MaxPlayers,
        RoomError::AlreadyStarted(_) => ServerEvent::AlreadyStarted,
        other => ServerEvent::ActionRejected { reason: other.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_rejections_map_to_bare_events() {
        let full = RoomError::RoomFull("r".into());
        assert_eq!(rejection_event(&full), ServerEvent::MaxPlayers);

        let started = RoomError::AlreadyStarted("r".into());
        assert_eq!(rejection_event(&started), ServerEvent::AlreadyStarted);

        let taken = RoomError::DuplicatePseudonym("ana".into());
        assert_eq!(rejection_event(&taken), ServerEvent::UnavailablePseudo);
    }

    #[test]
    fn test_other_errors_become_action_rejected_with_reason() {
        let err = RoomError::NotFound("attic".into());
        match rejection_event(&err) {
            ServerEvent::ActionRejected { reason } => assert!(reason.contains("attic")),
            other => panic!("expected actionRejected, got {other:?}"),
        }

        let err = RoomError::Game(deckhand_game::GameError::NotStarted);
        assert!(matches!(rejection_event(&err), ServerEvent::ActionRejected { .. }));
    }
}
