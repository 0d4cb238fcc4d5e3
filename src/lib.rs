//! # rconping
//!
//! Blocking clients for two game-server wire protocols:
//! - Remote console (RCON): password-authenticated administrative commands
//! - Server list ping (SLP): unauthenticated live status queries
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller (orchestration / CLI)                 │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//! ┌──────────────▼──────────────┐ ┌─────────────▼───────────────┐
//! │        RconClient           │ │        StatusClient         │
//! │  auth → command → reply     │ │  handshake → status → JSON  │
//! └──────────────┬──────────────┘ └─────────────┬───────────────┘
//!                │                              │
//!         ┌──────▼──────┐               ┌───────▼───────┐
//!         │ LE-size     │               │ varint frames │
//!         │ frames      │               │ + accumulator │
//!         └──────┬──────┘               └───────┬───────┘
//!                └──────────────┬───────────────┘
//!                       ┌───────▼───────┐
//!                       │ Stream reader │
//!                       │ (exact reads) │
//!                       └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rconping::{Config, RconClient, StatusClient};
//!
//! let config = Config::builder()
//!     .host("127.0.0.1")
//!     .rcon_password("secret")
//!     .build();
//!
//! let mut console = RconClient::new(config.clone());
//! let reply = console.command("list")?;
//! println!("{}", reply);
//!
//! if let Some(status) = StatusClient::new(config).probe().status() {
//!     println!("{}/{} online", status.players_online, status.players_max);
//! }
//! # Ok::<(), rconping::WireError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod stream;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ReadError, Result, WireError};
pub use config::Config;
pub use network::{ping, rcon_command, RconClient, RconState, SharedRconClient, StatusClient};
pub use protocol::{GameCommand, Probe, ServerStatus};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rconping
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
