//! Real-time multiplayer state-relay server.
//!
//! Assigns every WebSocket client an ID and a spawn state, relays each client
//! message to all other clients, and broadcasts the full player table on a
//! fixed interval.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin arena-relay-server
//! cargo run --bin arena-relay-server -- --host 0.0.0.0 --port 3000 --sync-interval-ms 50
//! ```

use std::time::Duration;

use arena_relay_server::{
    domain::SpawnArea,
    ui::{Server, ServerConfig},
};
use arena_relay_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "arena-relay-server")]
#[command(about = "WebSocket state-relay server for real-time multiplayer games", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = ServerConfig::DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// Interval between full-sync broadcasts, in milliseconds
    #[arg(long, default_value_t = ServerConfig::DEFAULT_SYNC_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    sync_interval_ms: u64,

    /// Messages buffered per connection before new ones are dropped for it
    #[arg(long, default_value_t = ServerConfig::DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,

    /// Longest a single socket write may take before the client is dropped, in milliseconds
    #[arg(long, default_value_t = ServerConfig::DEFAULT_WRITE_TIMEOUT_MS)]
    write_timeout_ms: u64,

    /// Lower bound of the spawn region (both axes)
    #[arg(long, default_value_t = 100.0)]
    spawn_min: f64,

    /// Upper bound of the spawn region (both axes, exclusive)
    #[arg(long, default_value_t = 600.0)]
    spawn_max: f64,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let config = ServerConfig {
            host: self.host,
            port: self.port,
            sync_interval: Duration::from_millis(self.sync_interval_ms),
            outbound_capacity: self.outbound_capacity,
            write_timeout: Duration::from_millis(self.write_timeout_ms),
            spawn_area: SpawnArea::square(self.spawn_min, self.spawn_max)?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::in_memory(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
