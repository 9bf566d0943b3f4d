//! Integration tests for the Deckhand server over real WebSockets.
//!
//! Each test starts its own server on a random port and drives it with
//! raw `tokio-tungstenite` clients, the same way a browser client would
//! talk to it.

use std::time::Duration;

use deckhand::prelude::*;
use deckhand_game::DECK_SIZE;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let server = DeckhandServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

fn encode_event(event: &ClientEvent) -> Message {
    Message::Binary(serde_json::to_vec(event).expect("encode").into())
}

async fn send_event(ws: &mut ClientWs, event: &ClientEvent) {
    ws.send(encode_event(event)).await.expect("send event");
}

async fn recv_event(ws: &mut ClientWs) -> ServerEvent {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for a server event")
        .expect("stream ended")
        .expect("recv failed");
    serde_json::from_slice(&msg.into_data()).expect("decode server event")
}

/// Receives the next frame as raw JSON, for wire-shape assertions.
async fn recv_json(ws: &mut ClientWs) -> serde_json::Value {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for a frame")
        .expect("stream ended")
        .expect("recv failed");
    serde_json::from_slice(&msg.into_data()).expect("parse json")
}

/// Sends a join and returns the first event that comes back — the
/// membership broadcast on success, a rejection otherwise.
async fn join(ws: &mut ClientWs, room: &str, pseudo: &str) -> ServerEvent {
    send_event(ws, &ClientEvent::JoinRoom { room: room.into(), pseudo: pseudo.into() }).await;
    recv_event(ws).await
}

fn pseudos(event: &ServerEvent) -> Vec<String> {
    match event {
        ServerEvent::Joined(players) => players.iter().map(|p| p.pseudo.to_string()).collect(),
        other => panic!("expected joined, got {other:?}"),
    }
}

fn state_of(event: ServerEvent) -> GameState {
    match event {
        ServerEvent::LaunchGame(state) | ServerEvent::UpdateState(state) => state,
        other => panic!("expected a state event, got {other:?}"),
    }
}

/// Seats ana and bea in `room`, starts the game, and drains all setup
/// events. Returns both sockets plus the opening state.
async fn started_pair(addr: &str, room: &str) -> (ClientWs, ClientWs, GameState) {
    let mut ws1 = connect(addr).await;
    let mut ws2 = connect(addr).await;

    join(&mut ws1, room, "ana").await;
    join(&mut ws2, room, "bea").await;
    recv_event(&mut ws1).await; // ana's view of bea's join

    send_event(&mut ws1, &ClientEvent::StartGame { room: room.into() }).await;
    let opening = state_of(recv_event(&mut ws1).await);
    recv_event(&mut ws2).await; // bea's launchGame

    (ws1, ws2, opening)
}

// =========================================================================
// Joining
// =========================================================================

#[tokio::test]
async fn test_join_creates_room_and_broadcasts_membership() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;

    let first = join(&mut ws1, "kitchen", "ana").await;
    assert_eq!(pseudos(&first), ["ana"]);

    let second = join(&mut ws2, "kitchen", "bea").await;
    assert_eq!(pseudos(&second), ["ana", "bea"]);

    // The earlier member hears about the newcomer too.
    let update = recv_event(&mut ws1).await;
    assert_eq!(pseudos(&update), ["ana", "bea"]);

    // Connection-derived ids are distinct.
    if let ServerEvent::Joined(players) = update {
        assert_ne!(players[0].id, players[1].id);
    }
}

#[tokio::test]
async fn test_duplicate_pseudonym_rejected_case_insensitively() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;

    join(&mut ws1, "kitchen", "ana").await;

    let rejection = join(&mut ws2, "kitchen", "ANA").await;
    assert_eq!(rejection, ServerEvent::UnavailablePseudo);

    // The rejected socket stays usable.
    let retry = join(&mut ws2, "kitchen", "bea").await;
    assert_eq!(pseudos(&retry), ["ana", "bea"]);
}

#[tokio::test]
async fn test_full_room_rejects_sixth_player() {
    let addr = start_server().await;

    let mut seated = Vec::new();
    for name in ["p1", "p2", "p3", "p4", "p5"] {
        let mut ws = connect(&addr).await;
        join(&mut ws, "packed", name).await;
        seated.push(ws);
    }

    let mut late = connect(&addr).await;
    let rejection = join(&mut late, "packed", "p6").await;
    assert_eq!(rejection, ServerEvent::MaxPlayers);
}

#[tokio::test]
async fn test_join_after_start_rejected() {
    let addr = start_server().await;
    let (_ws1, _ws2, _) = started_pair(&addr, "kitchen").await;

    let mut late = connect(&addr).await;
    let rejection = join(&mut late, "kitchen", "carl").await;
    assert_eq!(rejection, ServerEvent::AlreadyStarted);
}

#[tokio::test]
async fn test_leave_room_updates_membership() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;

    join(&mut ws1, "kitchen", "ana").await;
    join(&mut ws2, "kitchen", "bea").await;
    recv_event(&mut ws1).await;

    // Leaving wants the exact pseudonym, not a case variant.
    send_event(&mut ws2, &ClientEvent::LeaveRoom { room: "kitchen".into(), pseudo: "BEA".into() })
        .await;
    match recv_event(&mut ws2).await {
        ServerEvent::ActionRejected { reason } => assert!(reason.contains("BEA")),
        other => panic!("expected actionRejected, got {other:?}"),
    }

    send_event(&mut ws2, &ClientEvent::LeaveRoom { room: "kitchen".into(), pseudo: "bea".into() })
        .await;
    let update = recv_event(&mut ws1).await;
    assert_eq!(pseudos(&update), ["ana"]);
}

// =========================================================================
// Playing
// =========================================================================

#[tokio::test]
async fn test_start_game_deals_fifteen_cards() {
    let addr = start_server().await;
    let (_ws1, _ws2, opening) = started_pair(&addr, "kitchen").await;

    assert!(opening.started);
    assert_eq!(opening.hands.len(), 2);
    assert_eq!(opening.hands[&Pseudonym::from("ana")].len(), 15);
    assert_eq!(opening.hands[&Pseudonym::from("bea")].len(), 15);
    assert_eq!(opening.pile.len(), DECK_SIZE - 2 * 15 - 1);
    assert!(opening.current_card.is_some());
    let holder = opening.turn.expect("someone holds the opening turn");
    assert!(matches!(holder.pseudo.as_str(), "ana" | "bea"));
}

#[tokio::test]
async fn test_play_card_broadcasts_new_state() {
    let addr = start_server().await;
    let (mut ws1, mut ws2, _) = started_pair(&addr, "kitchen").await;

    send_event(
        &mut ws1,
        &ClientEvent::PlayCard { pseudo: "ana".into(), room: "kitchen".into(), card_index: 0 },
    )
    .await;

    for ws in [&mut ws1, &mut ws2] {
        let state = state_of(recv_event(ws).await);
        assert_eq!(state.hands[&Pseudonym::from("ana")].len(), 14);
        assert_eq!(state.total_cards(), DECK_SIZE);
    }
}

#[tokio::test]
async fn test_pick_card_grows_hand() {
    let addr = start_server().await;
    let (mut ws1, mut ws2, _) = started_pair(&addr, "kitchen").await;

    send_event(&mut ws2, &ClientEvent::PickCard { pseudo: "bea".into(), room: "kitchen".into() })
        .await;

    let state = state_of(recv_event(&mut ws2).await);
    assert_eq!(state.hands[&Pseudonym::from("bea")].len(), 16);
    recv_event(&mut ws1).await;
}

#[tokio::test]
async fn test_set_color_rewrites_face_up_card() {
    let addr = start_server().await;
    let (mut ws1, mut ws2, _) = started_pair(&addr, "kitchen").await;

    send_event(&mut ws1, &ClientEvent::SetColor { room: "kitchen".into(), color: Color::Blue })
        .await;

    // Wire-level check: the marker card and active color as the client
    // sees them.
    let frame = recv_json(&mut ws2).await;
    assert_eq!(frame["event"], "updateState");
    assert_eq!(frame["data"]["currentCard"], "blue-color");
    assert_eq!(frame["data"]["activeColor"], "blue");
    recv_event(&mut ws1).await;
}

#[tokio::test]
async fn test_winner_flow_and_restart() {
    let addr = start_server().await;
    let (mut ws1, mut ws2, _) = started_pair(&addr, "final").await;

    let play = ClientEvent::PlayCard { pseudo: "ana".into(), room: "final".into(), card_index: 0 };
    for _ in 0..14 {
        send_event(&mut ws1, &play).await;
        recv_event(&mut ws1).await;
        recv_event(&mut ws2).await;
    }

    // The fifteenth card empties ana's hand: winner, no updateState.
    send_event(&mut ws1, &play).await;
    for ws in [&mut ws1, &mut ws2] {
        match recv_event(ws).await {
            ServerEvent::Winner { pseudo } => assert_eq!(pseudo.as_str(), "ana"),
            other => panic!("expected winner, got {other:?}"),
        }
    }

    // The same table can start over.
    send_event(&mut ws1, &ClientEvent::StartGame { room: "final".into() }).await;
    for ws in [&mut ws1, &mut ws2] {
        let state = state_of(recv_event(ws).await);
        assert_eq!(state.hands[&Pseudonym::from("ana")].len(), 15);
        assert_eq!(state.hands[&Pseudonym::from("bea")].len(), 15);
    }
}

// =========================================================================
// Rejections and wire shape
// =========================================================================

#[tokio::test]
async fn test_malformed_payload_gets_action_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text("definitely not json".into()))
        .await
        .expect("send garbage");

    assert!(matches!(recv_event(&mut ws).await, ServerEvent::ActionRejected { .. }));

    // The connection survives the bad frame.
    let joined = join(&mut ws, "kitchen", "ana").await;
    assert_eq!(pseudos(&joined), ["ana"]);
}

#[tokio::test]
async fn test_action_on_unknown_room_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send_event(&mut ws, &ClientEvent::EndTurn { room: "nowhere".into() }).await;

    match recv_event(&mut ws).await {
        ServerEvent::ActionRejected { reason } => assert!(reason.contains("nowhere")),
        other => panic!("expected actionRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_wire_shape() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    // Hand-written frame, exactly as a browser client would send it.
    ws.send(Message::Text(
        r#"{"event":"joinRoom","data":{"room":"wire","pseudo":"ana"}}"#.into(),
    ))
    .await
    .expect("send join");

    let frame = recv_json(&mut ws).await;
    assert_eq!(frame["event"], "joined");
    let members = frame["data"].as_array().expect("joined data is an array");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["pseudo"], "ana");
    assert!(members[0]["id"].is_u64());
}
