//! Plain data shared by every layer of the bridge: the captured CAN frame and
//! the compact wire message pushed to the BLE peer.

/// Maximum payload of a classic CAN frame.
pub const MAX_DLC: usize = 8;

/// Wire header: 4-byte little-endian identifier followed by the dlc byte.
pub const WIRE_HEADER_LEN: usize = 5;

/// Longest wire message (header + eight data bytes).
pub const MAX_WIRE_LEN: usize = WIRE_HEADER_LEN + MAX_DLC;

/// One frame captured on the bus.
///
/// `dlc` is kept exactly as reported by the driver. Consumers clamp it to
/// [`MAX_DLC`] before touching `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanFrame {
    /// Arbitration identifier (11 or 29 significant bits).
    pub id: u32,
    /// Data Length Code as reported upstream.
    pub dlc: u8,
    /// Payload buffer. Bytes past `dlc` are meaningless.
    pub data: [u8; MAX_DLC],
}

impl CanFrame {
    /// Build a frame from an identifier and a payload, keeping at most eight bytes.
    pub fn new(id: u32, payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_DLC);
        let mut data = [0u8; MAX_DLC];
        data[..len].copy_from_slice(&payload[..len]);
        Self {
            id,
            dlc: len as u8,
            data,
        }
    }

    /// Adapt a frame handed over by an `embedded-can` driver.
    ///
    /// Standard and extended identifiers are both kept as their raw numeric value.
    pub fn from_frame<F: embedded_can::Frame>(frame: &F) -> Self {
        let id = match frame.id() {
            embedded_can::Id::Standard(id) => id.as_raw() as u32,
            embedded_can::Id::Extended(id) => id.as_raw(),
        };
        let mut can_frame = Self::new(id, frame.data());
        // Remote frames carry a dlc without data.
        if frame.is_remote_frame() {
            can_frame.dlc = frame.dlc().min(MAX_DLC) as u8;
        }
        can_frame
    }

    /// Number of valid payload bytes once the dlc is clamped.
    #[inline]
    pub fn len(&self) -> usize {
        (self.dlc as usize).min(MAX_DLC)
    }

    /// Checks whether the frame carries no payload.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len()]
    }
}

/// Packed representation of a [`CanFrame`] as sent over the notify characteristic.
///
/// ```text
/// offset 0  size 4    CAN identifier, little-endian
/// offset 4  size 1    dlc (0-8)
/// offset 5  size dlc  data bytes
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireMessage {
    pub(crate) len: usize,
    pub(crate) bytes: [u8; MAX_WIRE_LEN],
}

impl WireMessage {
    /// Number of valid bytes, always `5 + dlc`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// A wire message always carries its header.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for WireMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
