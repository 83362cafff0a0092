//! Subset of a BLE peripheral stack used by the bridge.
use crate::protocol::transport::gatt::{CharacteristicId, SecurityPolicy, ServiceLayout};
use crate::protocol::transport::traits::gatt_events::GattEvents;

/// Contract to set up and drive a BLE GATT server.
///
/// Calls are synchronous and must not block. A driver may dispatch
/// [`GattEvents`] from inside one of these calls: a nested notify is skipped
/// and a nested disconnect restarts advertising once the outer call returns.
pub trait BlePeripheral {
    type Error: core::fmt::Debug;

    /// Initialise the stack and set the advertised device name.
    fn init(&mut self, device_name: &str) -> Result<(), Self::Error>;

    /// Set the radio transmit power level.
    fn set_tx_power(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Configure pairing and bonding.
    fn configure_security(&mut self, policy: &SecurityPolicy) -> Result<(), Self::Error>;

    /// Register the handler for connection, subscription and write events.
    fn register_events(&mut self, handler: &'static dyn GattEvents);

    /// Create and start the service with its characteristics.
    fn create_service(&mut self, layout: &ServiceLayout) -> Result<(), Self::Error>;

    /// Replace the stored value of a characteristic.
    fn set_value(&mut self, characteristic: CharacteristicId, value: &[u8]);

    /// Push the stored value of a characteristic to the connected peer.
    fn notify(&mut self, characteristic: CharacteristicId) -> Result<(), Self::Error>;

    fn start_advertising(&mut self) -> Result<(), Self::Error>;

    fn stop_advertising(&mut self) -> Result<(), Self::Error>;

    /// Terminate the link identified by `conn_handle`.
    fn disconnect(&mut self, conn_handle: u16) -> Result<(), Self::Error>;
}
