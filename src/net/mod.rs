//! Host-authoritative replication.
//!
//! - `message`: the three wire messages and their JSON framing
//! - `transport`: the injected frame channel
//! - `host`: applies commands and broadcasts snapshots
//! - `client`: forwards commands and mirrors the host's snapshot

pub mod client;
pub mod host;
pub mod message;
pub mod transport;

pub use client::ClientSession;
pub use host::{HostSession, GUEST_SEAT, HOST_SEAT};
pub use message::{Handshake, WireMessage};
pub use transport::{ChannelTransport, Transport};
