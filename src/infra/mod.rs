//! Infrastructure building blocks with no knowledge of BLE or CAN drivers.
pub mod codec;
