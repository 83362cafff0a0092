//! Advertised device name.
//!
//! Every unit advertises as `<prefix>-XXXX`, where `XXXX` are four upper-case
//! hex digits taken from bits 32-47 of the factory hardware identifier (the
//! efuse MAC on ESP32 parts). Units stay recognizable by prefix and
//! distinguishable by suffix.
use core::fmt::Write;

use crate::error::DeviceNameError;

/// Longest name that fits in a legacy advertising payload.
pub const MAX_DEVICE_NAME_LEN: usize = 29;

/// Fixed-capacity advertised name.
pub type DeviceName = heapless::String<MAX_DEVICE_NAME_LEN>;

/// 16-bit chip identifier derived from the hardware identifier.
#[inline]
pub const fn chip_id(hardware_id: u64) -> u16 {
    (hardware_id >> 32) as u16
}

/// Build the advertised name for `prefix` and `hardware_id`.
pub fn device_name(prefix: &str, hardware_id: u64) -> Result<DeviceName, DeviceNameError> {
    let mut name = DeviceName::new();
    write!(name, "{}-{:04X}", prefix, chip_id(hardware_id)).map_err(|_| {
        DeviceNameError::TooLong {
            prefix_len: prefix.len(),
        }
    })?;
    Ok(name)
}
