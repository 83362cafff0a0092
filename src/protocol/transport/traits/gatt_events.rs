//! Events delivered by the BLE stack to the bridge.
use crate::protocol::transport::gatt::CharacteristicId;

/// Identity of the remote peer attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerInfo {
    /// Link handle assigned by the stack.
    pub conn_handle: u16,
    /// Peer device address.
    pub address: [u8; 6],
}

/// Capability interface the BLE stack calls into.
///
/// Every method takes `&self`: the stack may invoke them from its own
/// callback context while the run loop holds a shared reference.
pub trait GattEvents {
    /// A peer established a link.
    fn on_connect(&self, peer: PeerInfo);
    /// The link to `peer` went down.
    fn on_disconnect(&self, peer: PeerInfo, reason: u16);
    /// The peer wrote the CCCD of `characteristic`.
    fn on_subscribe(&self, peer: PeerInfo, characteristic: CharacteristicId, sub_value: u16);
    /// The peer wrote `payload` into `characteristic`.
    fn on_write(&self, peer: PeerInfo, characteristic: CharacteristicId, payload: &[u8]);
}
