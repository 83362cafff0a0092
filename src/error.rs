//! Error definitions shared across library modules.
//!
//! The bridge absorbs most runtime conditions (no peer, oversized dlc, remote
//! reboot). Only boot and the companion-side decoder report errors.
use thiserror_no_std::Error;

#[derive(Error, Debug)]
/// Failures while bringing the bridge up.
pub enum BootError<C: core::fmt::Debug, B: core::fmt::Debug> {
    /// The CAN controller refused to start. The device has already been
    /// asked to restart when this is returned.
    #[error("CAN controller failed to start: {0:?}")]
    CanInit(C),

    /// A BLE stack call failed while setting up the peripheral.
    #[error("BLE stack error: {0:?}")]
    Ble(B),

    /// The BLE stack was already borrowed when setup started.
    #[error("BLE stack re-entered during setup")]
    BleReentered,

    /// The advertised name could not be derived.
    #[error(transparent)]
    DeviceName(#[from] DeviceNameError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while deriving the advertised device name.
pub enum DeviceNameError {
    /// Prefix plus suffix do not fit in the advertising name buffer.
    #[error("Device name too long: prefix of {prefix_len} bytes")]
    TooLong { prefix_len: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while decoding a wire message back into a frame.
pub enum WireDecodeError {
    /// Fewer bytes than the 5-byte header.
    #[error("Truncated wire message: {len} bytes")]
    Truncated { len: usize },
    /// The dlc byte is above 8.
    #[error("Invalid dlc: {dlc}")]
    InvalidDlc { dlc: u8 },
    /// Buffer length is not `5 + dlc`.
    #[error("Length mismatch -> expected: {expected}, actual: {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
