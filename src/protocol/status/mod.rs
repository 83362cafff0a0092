//! Liveness LED.
//!
//! Toggled by a periodic task regardless of connection or bus activity, and
//! driven through a rapid pattern when the CAN controller fails to start.
use embedded_hal::digital::OutputPin;

use crate::config::{BOOT_FAULT_BLINKS, BOOT_FAULT_BLINK_MS};
use crate::protocol::transport::traits::bridge_timer::BridgeTimer;

/// Boolean status output on top of a GPIO.
pub struct StatusIndicator<P: OutputPin> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusIndicator<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(pin: P) -> Self {
        let mut indicator = Self { pin, lit: false };
        indicator.apply();
        indicator
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Flip the output and return the new level.
    pub fn toggle(&mut self) -> bool {
        self.lit = !self.lit;
        self.apply();
        self.lit
    }

    /// Rapid blink pattern signalling a bus initialisation failure.
    pub async fn signal_boot_fault<T: BridgeTimer>(&mut self, timer: &mut T) {
        for _ in 0..BOOT_FAULT_BLINKS {
            self.toggle();
            timer.delay_ms(BOOT_FAULT_BLINK_MS).await;
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }

    fn apply(&mut self) {
        let result = if self.lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        // Cosmetic output: a failed write is dropped.
        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::trace!("status pin write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingPin {
        levels: Vec<bool>,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn starts_low() {
        let indicator = StatusIndicator::new(RecordingPin::default());
        assert!(!indicator.is_lit());
        assert_eq!(indicator.release().levels, [false]);
    }

    #[test]
    fn toggle_alternates_levels() {
        let mut indicator = StatusIndicator::new(RecordingPin::default());
        assert!(indicator.toggle());
        assert!(!indicator.toggle());
        assert!(indicator.toggle());
        assert_eq!(indicator.release().levels, [false, true, false, true]);
    }
}
