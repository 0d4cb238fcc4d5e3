//! Configuration for rconping
//!
//! Centralized client configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, WireError};

/// Main configuration shared by the console and status clients
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Target
    // -------------------------------------------------------------------------
    /// Server host name or IP address
    pub host: String,

    /// Remote console (RCON) TCP port
    pub rcon_port: u16,

    /// Remote console password
    pub rcon_password: String,

    /// Server list ping (game) TCP port
    pub status_port: u16,

    // -------------------------------------------------------------------------
    // Timeouts
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Per-read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Largest declared frame length accepted from a server (bytes)
    pub max_packet_size: usize,
}

// Password is redacted.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("rcon_port", &self.rcon_port)
            .field("rcon_password", &"<redacted>")
            .field("status_port", &self.status_port)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("max_packet_size", &self.max_packet_size)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            rcon_port: 25575,
            rcon_password: String::new(),
            status_port: 25565,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            max_packet_size: 1024 * 1024, // 1 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Write timeout as a Duration
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// `host:port` of the console endpoint
    pub fn rcon_addr(&self) -> String {
        self.endpoint(self.rcon_port)
    }

    /// `host:port` of the status endpoint
    pub fn status_addr(&self) -> String {
        self.endpoint(self.status_port)
    }

    /// IPv6 literals are bracketed so the port stays separable
    fn endpoint(&self, port: u16) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        }
    }

    /// Reject settings neither client could work with
    pub fn validate(&self) -> Result<()> {
        self.validate_rcon()?;
        self.validate_status()
    }

    /// Check the settings the console client uses
    pub fn validate_rcon(&self) -> Result<()> {
        self.validate_common()?;
        if self.rcon_port == 0 {
            return Err(WireError::Config("rcon_port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Check the settings the status client uses
    pub fn validate_status(&self) -> Result<()> {
        self.validate_common()?;
        if self.status_port == 0 {
            return Err(WireError::Config("status_port must be non-zero".to_string()));
        }
        Ok(())
    }

    fn validate_common(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(WireError::Config("host must not be empty".to_string()));
        }
        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 || self.write_timeout_ms == 0 {
            return Err(WireError::Config("timeouts must be non-zero".to_string()));
        }
        if self.max_packet_size < 10 {
            return Err(WireError::Config(format!(
                "max_packet_size too small: {}",
                self.max_packet_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the remote console port
    pub fn rcon_port(mut self, port: u16) -> Self {
        self.config.rcon_port = port;
        self
    }

    /// Set the remote console password
    pub fn rcon_password(mut self, password: impl Into<String>) -> Self {
        self.config.rcon_password = password.into();
        self
    }

    /// Set the server list ping port
    pub fn status_port(mut self, port: u16) -> Self {
        self.config.status_port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set connect, read and write timeouts together (in seconds)
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        let ms = secs.saturating_mul(1000);
        self.config.connect_timeout_ms = ms;
        self.config.read_timeout_ms = ms;
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the largest accepted frame length (in bytes)
    pub fn max_packet_size(mut self, size: usize) -> Self {
        self.config.max_packet_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
