//! Periodic task model used by the re-announcer and the status LED.
//!
//! A [`PeriodicTask`] carries what a cooperative task scheduler needs to
//! register a job: interval, repeat count (or forever) and whether it is
//! enabled at start. [`run_periodic`] executes one such task: the callback
//! fires as soon as the task starts, then once per interval.
use embassy_time::Duration;

use crate::protocol::transport::traits::bridge_timer::BridgeTimer;

/// How many times a task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Iterations {
    Forever,
    Count(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    pub interval: Duration,
    pub iterations: Iterations,
    pub enabled: bool,
}

impl PeriodicTask {
    /// Enabled task firing every `interval` until the device restarts.
    pub const fn forever(interval: Duration) -> Self {
        Self {
            interval,
            iterations: Iterations::Forever,
            enabled: true,
        }
    }

    /// Enabled task firing `count` times.
    pub const fn times(interval: Duration, count: u32) -> Self {
        Self {
            interval,
            iterations: Iterations::Count(count),
            enabled: true,
        }
    }

    /// Same task, registered disabled.
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn interval_ms(&self) -> u32 {
        self.interval.as_millis().min(u32::MAX as u64) as u32
    }
}

/// Drive `task`, calling `callback` on each tick.
///
/// Returns immediately for a disabled task and after the last iteration of a
/// counted one; a `Forever` task never returns.
pub async fn run_periodic<T: BridgeTimer, F: FnMut()>(
    timer: &mut T,
    task: PeriodicTask,
    mut callback: F,
) {
    if !task.enabled {
        return;
    }

    let interval_ms = task.interval_ms();
    let mut fired: u32 = 0;

    loop {
        if let Iterations::Count(count) = task.iterations {
            if fired >= count {
                return;
            }
        }
        if fired > 0 {
            timer.delay_ms(interval_ms).await;
        }
        callback();
        fired = fired.saturating_add(1);
    }
}
