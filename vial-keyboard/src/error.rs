//! Keyboard configuration error types

use thiserror::Error;
use vial_transport::TransportError;

/// Errors from keyboard configuration operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport failure during a table fetch or record push
    #[error("Device sync error: {0}")]
    Sync(#[from] TransportError),

    /// Modifier name outside the fixed firmware set (programmer/config error)
    #[error("Unknown modifier: \"{0}\"")]
    UnknownModifier(String),

    /// Key identifier that is neither a canonical name nor a hex literal.
    ///
    /// Recoverable: callers degrade to the hexadecimal literal form instead
    /// of failing the surrounding workflow.
    #[error("Unknown key identifier: \"{0}\"")]
    UnknownKeyIdentifier(String),

    /// Device returned a response that does not match the wire layout
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
