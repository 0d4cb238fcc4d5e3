//! Stream Module
//!
//! Framed-stream reading shared by both protocol clients.
//!
//! ## Guarantees
//! - A read either yields exactly the requested byte count or fails
//! - Peer close, deadline expiry and other I/O failures stay distinct
//! - Partial deliveries from the transport are reassembled transparently
//!
//! ## Frame Layouts
//! ```text
//! Console:  ┌──────────────┬──────────────────────────┐
//!           │ Size (4, LE) │      Body (Size bytes)   │
//!           └──────────────┴──────────────────────────┘
//!
//! Status:   ┌──────────────┬──────────────────────────┐
//!           │ Len (varint) │      Body (Len bytes)    │
//!           └──────────────┴──────────────────────────┘
//! ```

mod reader;

pub use reader::{read_chunk, read_exact, read_le_frame, read_varint, read_varint_frame, TimedRead};

pub(crate) use reader::is_timeout;
