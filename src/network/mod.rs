//! Network Module
//!
//! Blocking TCP clients for both protocols.
//!
//! ## Model
//! - One short-lived connection per call (per session for the console)
//! - One request in flight per connection
//! - Sockets are closed on every exit path

mod connection;
mod rcon;
mod shared;
mod status;

pub use connection::Connection;
pub use rcon::{rcon_command, RconClient, RconState};
pub use shared::SharedRconClient;
pub use status::{ping, StatusClient};
