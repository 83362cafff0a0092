//! Connection state of the single BLE peer.
//!
//! ```text
//!                 on_connect
//!  Disconnected ─────────────► Connected
//!       ▲                          │
//!       └──────────────────────────┘
//!                on_disconnect
//! ```
use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::protocol::transport::gatt::CharacteristicId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LinkState {
    conn_handle: Option<u16>,
    fast_subscribed: bool,
    slow_subscribed: bool,
    advertise_pending: bool,
}

/// Tracks whether a peer is connected and which data characteristics it subscribed to.
pub struct ConnectionTracker {
    state: Mutex<CriticalSectionRawMutex, Cell<LinkState>>,
}

impl ConnectionTracker {
    /// Initial state: disconnected, nothing subscribed.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(LinkState {
                conn_handle: None,
                fast_subscribed: false,
                slow_subscribed: false,
                advertise_pending: false,
            })),
        }
    }

    /// Record a new link. A pending advertising restart is dropped.
    pub fn connect(&self, conn_handle: u16) {
        self.update(|state| {
            *state = LinkState {
                conn_handle: Some(conn_handle),
                ..LinkState::default()
            };
        })
    }

    /// Drop the link identified by `conn_handle` and its subscriptions.
    ///
    /// Returns `true` only on the Connected -> Disconnected transition of
    /// that link; a repeated event or a handle other than the tracked one
    /// leaves the state untouched.
    pub fn disconnect(&self, conn_handle: u16) -> bool {
        self.update(|state| {
            if state.conn_handle != Some(conn_handle) {
                return false;
            }
            *state = LinkState {
                advertise_pending: state.advertise_pending,
                ..LinkState::default()
            };
            true
        })
    }

    /// Flag that advertising must be restarted.
    pub fn request_advertising(&self) {
        self.update(|state| state.advertise_pending = true)
    }

    /// Consume the advertising restart flag.
    pub fn take_advertising_request(&self) -> bool {
        self.update(|state| core::mem::take(&mut state.advertise_pending))
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock(|state| state.get().conn_handle.is_some())
    }

    /// Handle of the connected peer.
    pub fn conn_handle(&self) -> Option<u16> {
        self.state.lock(|state| state.get().conn_handle)
    }

    /// Record the notification bit of a data characteristic. Ignored while disconnected.
    pub fn set_subscribed(&self, characteristic: CharacteristicId, enabled: bool) {
        self.update(|state| {
            if state.conn_handle.is_none() {
                return;
            }
            match characteristic {
                CharacteristicId::FastData => state.fast_subscribed = enabled,
                CharacteristicId::SlowData => state.slow_subscribed = enabled,
                CharacteristicId::Reboot => {}
            }
        })
    }

    pub fn is_subscribed(&self, characteristic: CharacteristicId) -> bool {
        self.state.lock(|state| {
            let state = state.get();
            match characteristic {
                CharacteristicId::FastData => state.fast_subscribed,
                CharacteristicId::SlowData => state.slow_subscribed,
                CharacteristicId::Reboot => false,
            }
        })
    }

    fn update<R>(&self, f: impl FnOnce(&mut LinkState) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
