//! `canble-bridge` library: core of a firmware that mirrors live CAN traffic
//! to a BLE peer in a `no_std` environment. The crate exposes the wire codec,
//! the bridge controller with its caches and connection state, the reboot
//! command channel, and the boot/run-loop wiring around driver traits.
#![cfg_attr(not(test), no_std)]
//==================================================================================
/// Frame and wire message types shared by every layer.
pub mod core;
/// Boot, identity and decoding errors.
pub mod error;
/// Compile-time defaults and the runtime bridge configuration.
pub mod config;
/// Driver-independent building blocks (wire codec).
pub mod infra;
/// Bridge logic: controller, command channel, identity, status LED,
/// scheduling, and the BLE/CAN transport abstractions.
pub mod protocol;
//==================================================================================
