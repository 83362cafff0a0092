//! Receive-only view of the CAN controller driver.
use crate::core::CanFrame;

/// Consumer of captured frames, invoked by the driver's receive callback.
///
/// May run in interrupt context: implementations must not block.
pub trait FrameSink {
    fn on_frame(&self, frame: CanFrame);
}

/// Contract the bridge needs from a CAN controller driver.
///
/// Driver frames are converted with [`CanFrame::from_frame`] before being
/// handed to the registered [`FrameSink`].
pub trait CanSource {
    type Error: core::fmt::Debug;

    /// Route the controller to the transceiver pins.
    fn set_pins(&mut self, rx: u8, tx: u8);

    /// Start the controller at `bitrate` bit/s.
    fn begin(&mut self, bitrate: u32) -> Result<(), Self::Error>;

    /// Switch to bus-monitor mode: no acknowledgement, no transmission.
    fn observe(&mut self);

    /// Register the sink receiving every frame from now on.
    fn on_receive(&mut self, sink: &'static dyn FrameSink);
}
