//! Abstraction traits for the external collaborators (BLE stack, CAN driver,
//! timer, system control) and the event interfaces the bridge implements.
pub mod ble_peripheral;
pub mod bridge_timer;
pub mod can_source;
pub mod gatt_events;
pub mod system_control;
