//! Ownership slot for a driver handle shared between the run loop and the
//! driver callbacks.
//!
//! The handle is checked out of its slot for the length of one call. The
//! critical section only covers the checkout and the return, so driver code
//! always runs with interrupts enabled and the CAN receive interrupt is never
//! held off by a BLE call.
use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

pub(crate) struct DriverSlot<T> {
    slot: Mutex<CriticalSectionRawMutex, Cell<Option<T>>>,
}

impl<T> DriverSlot<T> {
    pub(crate) const fn new(driver: T) -> Self {
        Self {
            slot: Mutex::new(Cell::new(Some(driver))),
        }
    }

    /// Run `f` on the checked-out driver. `None` while another call holds it.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut driver = self.slot.lock(|slot| slot.take())?;
        let result = f(&mut driver);
        self.slot.lock(|slot| slot.set(Some(driver)));
        Some(result)
    }
}
