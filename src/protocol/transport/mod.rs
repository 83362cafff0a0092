//! Transport surface of the bridge: the GATT layout exposed to the peer and
//! the traits implemented by the BLE stack, the CAN driver and the platform.
pub mod gatt;
pub mod traits;
