//! Common types for the transport layer

/// Device identification information
#[derive(Debug, Clone)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Device path or identifier (transport-specific)
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Display label: product name when known, VID:PID otherwise
    pub fn label(&self) -> String {
        self.product_name
            .clone()
            .unwrap_or_else(|| format!("{:04X}:{:04X}", self.vid, self.pid))
    }
}
