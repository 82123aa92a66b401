//! Protocol constants and report framing for VIA/Vial keyboard communication

/// VIA command bytes (first byte of a raw HID report)
pub mod cmd {
    pub const GET_PROTOCOL_VERSION: u8 = 0x01;
    pub const GET_KEYBOARD_VALUE: u8 = 0x02;
    pub const SET_KEYBOARD_VALUE: u8 = 0x03;
    pub const DYNAMIC_KEYMAP_GET_KEYCODE: u8 = 0x04;
    pub const DYNAMIC_KEYMAP_SET_KEYCODE: u8 = 0x05;
    pub const DYNAMIC_KEYMAP_GET_BUFFER: u8 = 0x12;
    pub const DYNAMIC_KEYMAP_SET_BUFFER: u8 = 0x13;

    /// All Vial-specific commands are tunneled behind this prefix byte.
    pub const VIAL_PREFIX: u8 = 0xFE;

    /// Get human-readable name for a command byte
    pub fn name(cmd: u8) -> &'static str {
        match cmd {
            GET_PROTOCOL_VERSION => "GET_PROTOCOL_VERSION",
            GET_KEYBOARD_VALUE => "GET_KEYBOARD_VALUE",
            SET_KEYBOARD_VALUE => "SET_KEYBOARD_VALUE",
            DYNAMIC_KEYMAP_GET_KEYCODE => "DYNAMIC_KEYMAP_GET_KEYCODE",
            DYNAMIC_KEYMAP_SET_KEYCODE => "DYNAMIC_KEYMAP_SET_KEYCODE",
            DYNAMIC_KEYMAP_GET_BUFFER => "DYNAMIC_KEYMAP_GET_BUFFER",
            DYNAMIC_KEYMAP_SET_BUFFER => "DYNAMIC_KEYMAP_SET_BUFFER",
            VIAL_PREFIX => "VIAL_PREFIX",
            _ => "UNKNOWN",
        }
    }
}

/// Vial sub-commands (the byte following [`cmd::VIAL_PREFIX`])
pub mod vial {
    pub const GET_KEYBOARD_ID: u8 = 0x00;
    pub const GET_SIZE: u8 = 0x01;
    pub const GET_DEFINITION: u8 = 0x02;
    pub const GET_ENCODER: u8 = 0x03;
    pub const SET_ENCODER: u8 = 0x04;
    pub const GET_UNLOCK_STATUS: u8 = 0x05;
    pub const UNLOCK_START: u8 = 0x06;
    pub const UNLOCK_POLL: u8 = 0x07;
    pub const LOCK: u8 = 0x08;
    pub const DYNAMIC_ENTRY_OP: u8 = 0x0D;

    /// Get human-readable name for a Vial sub-command
    pub fn name(sub: u8) -> &'static str {
        match sub {
            GET_KEYBOARD_ID => "GET_KEYBOARD_ID",
            GET_SIZE => "GET_SIZE",
            GET_DEFINITION => "GET_DEFINITION",
            GET_ENCODER => "GET_ENCODER",
            SET_ENCODER => "SET_ENCODER",
            GET_UNLOCK_STATUS => "GET_UNLOCK_STATUS",
            UNLOCK_START => "UNLOCK_START",
            UNLOCK_POLL => "UNLOCK_POLL",
            LOCK => "LOCK",
            DYNAMIC_ENTRY_OP => "DYNAMIC_ENTRY_OP",
            _ => "UNKNOWN",
        }
    }
}

/// Dynamic-entry operations (the byte following [`vial::DYNAMIC_ENTRY_OP`]).
///
/// Dynamic entries live in limited firmware runtime memory and are queried
/// or written one index at a time; there is no bulk read.
pub mod dynamic {
    pub const GET_NUMBER_OF_ENTRIES: u8 = 0x00;
    pub const TAP_DANCE_GET: u8 = 0x01;
    pub const TAP_DANCE_SET: u8 = 0x02;
    pub const COMBO_GET: u8 = 0x03;
    pub const COMBO_SET: u8 = 0x04;
    pub const KEY_OVERRIDE_GET: u8 = 0x05;
    pub const KEY_OVERRIDE_SET: u8 = 0x06;

    /// Get human-readable name for a dynamic-entry op
    pub fn name(op: u8) -> &'static str {
        match op {
            GET_NUMBER_OF_ENTRIES => "GET_NUMBER_OF_ENTRIES",
            TAP_DANCE_GET => "TAP_DANCE_GET",
            TAP_DANCE_SET => "TAP_DANCE_SET",
            COMBO_GET => "COMBO_GET",
            COMBO_SET => "COMBO_SET",
            KEY_OVERRIDE_GET => "KEY_OVERRIDE_GET",
            KEY_OVERRIDE_SET => "KEY_OVERRIDE_SET",
            _ => "UNKNOWN",
        }
    }
}

/// Raw HID message size (every exchange is one fixed-size report)
pub const MSG_LEN: usize = 32;
/// Write buffer size (report ID byte + message)
pub const REPORT_SIZE: usize = MSG_LEN + 1;

/// HID communication timing constants
pub mod timing {
    /// Number of retries for query operations
    pub const QUERY_RETRIES: usize = 5;
    /// Number of retries for send operations
    pub const SEND_RETRIES: usize = 3;
    /// Read timeout per attempt (ms)
    pub const READ_TIMEOUT_MS: i32 = 500;
    /// Delay between retries (ms)
    pub const RETRY_DELAY_MS: u64 = 50;
}

/// Device identification constants
pub mod device {
    /// Usage page of the VIA/Vial raw HID interface
    pub const USAGE_PAGE: u16 = 0xFF60;
    /// Usage of the VIA/Vial raw HID interface
    pub const USAGE: u16 = 0x61;
}

/// Build a raw HID write buffer.
///
/// Format: `[report_id=0] [cmd] [data...]` zero-padded to [`REPORT_SIZE`].
/// Data beyond the message size is truncated.
pub fn build_report(cmd: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; REPORT_SIZE];
    buf[0] = 0; // Report ID
    buf[1] = cmd;
    let len = std::cmp::min(data.len(), MSG_LEN - 1);
    buf[2..2 + len].copy_from_slice(&data[..len]);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_fixed_size_and_padded() {
        let buf = build_report(cmd::VIAL_PREFIX, &[vial::DYNAMIC_ENTRY_OP, 0x01, 3]);
        assert_eq!(buf.len(), REPORT_SIZE);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 0xFE);
        assert_eq!(&buf[2..5], &[0x0D, 0x01, 3]);
        assert!(buf[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn report_truncates_oversized_data() {
        let data = [0xAAu8; 64];
        let buf = build_report(0x01, &data);
        assert_eq!(buf.len(), REPORT_SIZE);
        assert_eq!(buf[REPORT_SIZE - 1], 0xAA);
    }

    #[test]
    fn command_names() {
        assert_eq!(cmd::name(cmd::VIAL_PREFIX), "VIAL_PREFIX");
        assert_eq!(vial::name(vial::DYNAMIC_ENTRY_OP), "DYNAMIC_ENTRY_OP");
        assert_eq!(dynamic::name(dynamic::TAP_DANCE_SET), "TAP_DANCE_SET");
        assert_eq!(dynamic::name(0x7F), "UNKNOWN");
    }
}
