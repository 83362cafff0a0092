//! High-level components of the bridge: the controller owning shared state,
//! the reboot command, device identity, status LED, periodic scheduling, boot
//! wiring, and the transport surface towards the BLE and CAN drivers.
pub mod bridge;
pub mod command;
pub mod identity;
pub mod runtime;
pub mod scheduler;
pub mod status;
pub mod transport;
