//! Transport abstraction layer for Vial keyboard communication
//!
//! This crate provides the device channel used by the configuration core:
//! a raw HID backend speaking fixed 32-byte VIA/Vial reports, behind a
//! trait so higher layers (and tests) can substitute their own channel.

pub mod error;
pub mod protocol;
pub mod types;

mod hid;

pub use error::TransportError;
pub use hid::{HidDiscovery, RawHidTransport};
pub use types::TransportDeviceInfo;

use async_trait::async_trait;
use std::sync::Arc;

/// The core transport trait - all backends implement this
///
/// The channel is a single shared, serialized resource: implementations
/// must not interleave byte traffic of concurrent calls, and callers issue
/// at most one outstanding request/response exchange at a time.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a command without expecting a specific response
    ///
    /// # Arguments
    /// * `cmd` - Command byte (e.g., `protocol::cmd::VIAL_PREFIX`)
    /// * `data` - Command data (without command byte)
    async fn send_command(&self, cmd: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Send a command and wait for its response report
    ///
    /// # Returns
    /// Response data (one 32-byte message, no report ID)
    async fn query_command(&self, cmd: u8, data: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Check if transport is still connected
    async fn is_connected(&self) -> bool;

    /// Close the transport gracefully
    async fn close(&self) -> Result<(), TransportError>;
}

/// Type alias for a boxed transport
pub type BoxedTransport = Arc<dyn Transport>;
