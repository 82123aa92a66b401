//! Raw HID transport and device discovery
//!
//! VIA/Vial keyboards expose a dedicated raw HID interface (usage page
//! 0xFF60, usage 0x61). Every exchange is one fixed 32-byte report: write
//! a command report, then read the keyboard's 32-byte reply on the same
//! interface.

use std::sync::Mutex;

use async_trait::async_trait;
use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{self, device, timing, MSG_LEN};
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// Transport over the keyboard's raw HID interface
pub struct RawHidTransport {
    /// Raw HID interface handle; one outstanding exchange at a time
    device: Mutex<HidDevice>,
    /// Device information
    info: TransportDeviceInfo,
}

impl RawHidTransport {
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(device),
            info,
        }
    }

    /// Write one report
    fn write_report(&self, buf: &[u8]) -> Result<(), TransportError> {
        let device = self.device.lock().unwrap();
        device.write(buf)?;
        Ok(())
    }

    /// Write one report and read the reply for it
    fn exchange(&self, buf: &[u8]) -> Result<Vec<u8>, TransportError> {
        let device = self.device.lock().unwrap();
        device.write(buf)?;

        let mut resp = vec![0u8; MSG_LEN];
        let n = device.read_timeout(&mut resp, timing::READ_TIMEOUT_MS)?;
        if n == 0 {
            return Err(TransportError::Timeout);
        }
        resp.truncate(n);
        Ok(resp)
    }
}

#[async_trait]
impl Transport for RawHidTransport {
    async fn send_command(&self, cmd: u8, data: &[u8]) -> Result<(), TransportError> {
        let buf = protocol::build_report(cmd, data);
        debug!("Sending command 0x{:02X}: {:02X?}", cmd, &buf[1..13]);

        let mut last_err = TransportError::Timeout;
        for attempt in 0..timing::SEND_RETRIES {
            match self.write_report(&buf) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("Send attempt {} failed: {}", attempt, e);
                    last_err = e;
                    tokio::time::sleep(std::time::Duration::from_millis(timing::RETRY_DELAY_MS))
                        .await;
                }
            }
        }
        Err(last_err)
    }

    async fn query_command(&self, cmd: u8, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        let buf = protocol::build_report(cmd, data);
        debug!("Querying command 0x{:02X}: {:02X?}", cmd, &buf[1..13]);

        for attempt in 0..timing::QUERY_RETRIES {
            match self.exchange(&buf) {
                Ok(resp) => {
                    debug!("Got response for 0x{:02X}: {:02X?}", cmd, &resp[..12.min(resp.len())]);
                    return Ok(resp);
                }
                Err(e) => {
                    debug!("Query attempt {} failed: {}", attempt, e);
                    tokio::time::sleep(std::time::Duration::from_millis(timing::RETRY_DELAY_MS))
                        .await;
                }
            }
        }

        Err(TransportError::Timeout)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    async fn is_connected(&self) -> bool {
        let device = self.device.lock().unwrap();
        device.get_product_string().is_ok()
    }

    async fn close(&self) -> Result<(), TransportError> {
        // HidDevice drops automatically
        Ok(())
    }
}

/// HID device discovery for Vial keyboards
pub struct HidDiscovery;

impl Default for HidDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl HidDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Check if this is the raw HID interface (usage 0x61, page 0xFF60)
    fn is_raw_hid_interface(device_info: &hidapi::DeviceInfo) -> bool {
        device_info.usage_page() == device::USAGE_PAGE && device_info.usage() == device::USAGE
    }

    /// List all connected devices exposing a Vial raw HID interface
    pub fn list_devices(&self) -> Result<Vec<TransportDeviceInfo>, TransportError> {
        let api = HidApi::new()?;
        let mut devices = Vec::new();

        for dev in api.device_list() {
            if !Self::is_raw_hid_interface(dev) {
                continue;
            }
            devices.push(TransportDeviceInfo {
                vid: dev.vendor_id(),
                pid: dev.product_id(),
                device_path: dev.path().to_string_lossy().into_owned(),
                serial: dev.serial_number().map(String::from),
                product_name: dev.product_string().map(String::from),
            });
        }

        Ok(devices)
    }

    /// Open a specific device by its discovery record
    pub fn open_device(
        &self,
        info: &TransportDeviceInfo,
    ) -> Result<RawHidTransport, TransportError> {
        let api = HidApi::new()?;
        let path = std::ffi::CString::new(info.device_path.clone())
            .map_err(|e| TransportError::Internal(e.to_string()))?;
        let device = api.open_path(&path)?;
        debug!(
            "Opened raw HID device {:04X}:{:04X} at {}",
            info.vid, info.pid, info.device_path
        );
        Ok(RawHidTransport::new(device, info.clone()))
    }

    /// Open the first available keyboard
    pub fn open_first(&self) -> Result<RawHidTransport, TransportError> {
        let devices = self.list_devices()?;
        let info = devices
            .first()
            .ok_or_else(|| TransportError::DeviceNotFound("No Vial keyboard found".into()))?;
        self.open_device(info)
    }
}
