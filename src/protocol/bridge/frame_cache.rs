//! Single-slot holder of the most recent frame of a stream.
//!
//! Written from the CAN receive callback (possibly an interrupt) and read by
//! both the immediate and the periodic send paths. Every access is one short
//! critical section, so a reader always sees a whole frame.
use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::core::{CanFrame, WireMessage};
use crate::infra::codec::packer::pack;

/// Last-write-wins frame slot. No history, no queue.
pub struct FrameCache {
    slot: Mutex<CriticalSectionRawMutex, Cell<Option<CanFrame>>>,
}

impl FrameCache {
    /// Empty cache: nothing is announced until the first frame arrives.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the cached frame.
    pub fn store(&self, frame: CanFrame) {
        self.slot.lock(|slot| slot.set(Some(frame)));
    }

    /// Copy of the cached frame, if any.
    pub fn latest(&self) -> Option<CanFrame> {
        self.slot.lock(|slot| slot.get())
    }

    /// Cached frame packed for the wire.
    pub fn latest_wire(&self) -> Option<WireMessage> {
        self.latest().map(|frame| pack(&frame))
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}
