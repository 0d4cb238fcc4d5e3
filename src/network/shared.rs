//! Shared console session
//!
//! Serializes commands from several threads onto one session.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::GameCommand;

use super::{RconClient, RconState};

/// Cloneable handle to a console session guarded by a mutex
///
/// Each command holds the lock for its whole request/response exchange, so
/// responses can never interleave.
#[derive(Clone)]
pub struct SharedRconClient {
    inner: Arc<Mutex<RconClient>>,
}

impl SharedRconClient {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RconClient::new(config))),
        }
    }

    pub fn connect(&self) -> Result<()> {
        self.inner.lock().connect()
    }

    pub fn command(&self, command: &str) -> Result<String> {
        self.inner.lock().command(command)
    }

    pub fn execute(&self, command: &GameCommand) -> Result<String> {
        self.inner.lock().execute(command)
    }

    pub fn disconnect(&self) {
        self.inner.lock().disconnect();
    }

    pub fn state(&self) -> RconState {
        self.inner.lock().state()
    }
}
