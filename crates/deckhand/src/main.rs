//! Deckhand server binary.
//!
//! Binds to `DECKHAND_ADDR` (default `127.0.0.1:8080`) and serves until
//! killed. Log verbosity comes from `RUST_LOG`.

use deckhand::{DeckhandError, DeckhandServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), DeckhandError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deckhand=info")),
        )
        .init();

    let addr =
        std::env::var("DECKHAND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = DeckhandServer::builder().bind(&addr).build().await?;
    tracing::info!(%addr, "deckhand listening");
    server.run().await
}
