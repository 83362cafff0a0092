//! Remote reboot command.
//!
//! The only signal is which characteristic was written: any payload,
//! including an empty one, written into the reboot characteristic asks the
//! device to drop the writer's link and restart. Nothing is answered first.
use crate::protocol::transport::gatt::CharacteristicId;
use crate::protocol::transport::traits::{
    ble_peripheral::BlePeripheral, gatt_events::PeerInfo, system_control::SystemControl,
};

/// Reboot request issued by a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RebootCommand {
    /// Link of the peer that wrote the command.
    pub conn_handle: u16,
}

impl RebootCommand {
    /// Interpret a characteristic write. Only the reboot characteristic yields a command.
    pub fn from_write(characteristic: CharacteristicId, peer: PeerInfo) -> Option<Self> {
        match characteristic {
            CharacteristicId::Reboot => Some(Self {
                conn_handle: peer.conn_handle,
            }),
            _ => None,
        }
    }

    /// Drop the writer's link. A refused disconnect does not stop the restart.
    pub fn disconnect_peer<B: BlePeripheral>(&self, ble: &mut B) {
        if let Err(_err) = ble.disconnect(self.conn_handle) {
            #[cfg(feature = "defmt")]
            defmt::warn!("disconnect before reboot failed: {}", defmt::Debug2Format(&_err));
        }
    }

    /// Restart the device.
    pub fn restart<S: SystemControl>(&self, system: &mut S) {
        #[cfg(feature = "defmt")]
        defmt::error!("reboot requested by peer {}", self.conn_handle);
        system.restart();
    }
}
