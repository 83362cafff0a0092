//! Frame packer: turns a captured [`CanFrame`] into the compact
//! little-endian [`WireMessage`] and back.
//!
//! # Layout
//!
//! ```text
//! Bytes 0-3   : CAN identifier, little-endian
//! Byte  4     : dlc (0-8)
//! Bytes 5..   : exactly `dlc` data bytes, no padding
//! ```
//!
//! A dlc above 8 coming from upstream is clamped to 8. The trailing data is
//! lost but the fixed buffer is never overrun.
use crate::core::{CanFrame, WireMessage, MAX_DLC, MAX_WIRE_LEN, WIRE_HEADER_LEN};
use crate::error::WireDecodeError;

/// Pack a frame into its wire representation.
pub fn pack(frame: &CanFrame) -> WireMessage {
    let dlc = frame.len();
    let mut bytes = [0u8; MAX_WIRE_LEN];

    bytes[..4].copy_from_slice(&frame.id.to_le_bytes());
    bytes[4] = dlc as u8;
    bytes[WIRE_HEADER_LEN..WIRE_HEADER_LEN + dlc].copy_from_slice(&frame.data[..dlc]);

    WireMessage {
        len: WIRE_HEADER_LEN + dlc,
        bytes,
    }
}

/// Decode a wire message received by a peer.
///
/// Strict inverse of [`pack`]: the buffer must be exactly `5 + dlc` bytes long.
pub fn unpack(bytes: &[u8]) -> Result<CanFrame, WireDecodeError> {
    if bytes.len() < WIRE_HEADER_LEN {
        return Err(WireDecodeError::Truncated { len: bytes.len() });
    }

    let dlc = bytes[4];
    if dlc as usize > MAX_DLC {
        return Err(WireDecodeError::InvalidDlc { dlc });
    }

    let expected = WIRE_HEADER_LEN + dlc as usize;
    if bytes.len() != expected {
        return Err(WireDecodeError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    Ok(CanFrame::new(id, &bytes[WIRE_HEADER_LEN..]))
}

impl From<&CanFrame> for WireMessage {
    fn from(frame: &CanFrame) -> Self {
        pack(frame)
    }
}
