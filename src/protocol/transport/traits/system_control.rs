//! Device-level control used by the reboot command and boot-fault recovery.

/// Restart capability of the host device.
pub trait SystemControl {
    /// Restart the device unconditionally.
    ///
    /// On hardware this resets the chip and never returns. Hosted builds
    /// implement it as a supervisory fault restart and return to the caller,
    /// which must not touch the bridge afterwards.
    fn restart(&mut self);
}
