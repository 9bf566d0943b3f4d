//! `DeckhandServer` builder and server loop.
//!
//! This is the entry point for running a Deckhand game server. It ties
//! together all the layers: transport → protocol → room.

use std::net::SocketAddr;
use std::sync::Arc;

use deckhand_game::GameConfig;
use deckhand_protocol::JsonCodec;
use deckhand_room::{RoomConfig, RoomRegistry};
use deckhand_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::DeckhandError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry sits behind a `Mutex`; handlers lock it only long enough
/// to clone out a room handle.
pub(crate) struct ServerState {
    pub(crate) rooms: Mutex<RoomRegistry>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Deckhand server.
///
/// # Example
///
/// ```rust,ignore
/// use deckhand::prelude::*;
///
/// let server = DeckhandServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct DeckhandServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
    game_config: GameConfig,
}

impl DeckhandServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_config: RoomConfig::default(),
            game_config: GameConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the per-room capacity configuration.
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Sets the deal configuration for new games.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Builds the server, binding the WebSocket listener.
    pub async fn build(self) -> Result<DeckhandServer, DeckhandError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomRegistry::new(self.room_config, self.game_config)),
            codec: JsonCodec,
        });

        Ok(DeckhandServer { transport, state })
    }
}

impl Default for DeckhandServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Deckhand game server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DeckhandServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl DeckhandServer {
    /// Creates a new builder.
    pub fn builder() -> DeckhandServerBuilder {
        DeckhandServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, DeckhandError> {
        Ok(self.transport.local_addr()?)
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each
    /// one. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), DeckhandError> {
        tracing::info!("deckhand server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
