//! Wire codec for frames pushed over the notify characteristic.
pub mod packer;
