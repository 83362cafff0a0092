//! CAN-to-BLE bridge context.
//!
//! [`BridgeController`] owns every piece of shared state: the frame cache of
//! each stream, the connection state and the BLE/system handles. The CAN
//! receive callback, the BLE event callbacks and the periodic tasks all reach
//! it through a shared reference.
//!
//! The caches and the connection state live behind `embassy_sync`
//! critical-section mutexes, so a receive interrupt cannot tear a cache update
//! half-way through a read from the run loop. Driver handles are checked out
//! of a [`DriverSlot`] per call and run outside any critical section.
use crate::config::{BridgeConfig, BridgeVariant, NotifyGate};
use crate::core::CanFrame;
use crate::protocol::command::RebootCommand;
use crate::protocol::transport::gatt::{CharacteristicId, CCCD_NOTIFY};
use crate::protocol::transport::traits::{
    ble_peripheral::BlePeripheral,
    can_source::FrameSink,
    gatt_events::{GattEvents, PeerInfo},
    system_control::SystemControl,
};

pub mod connection;
mod driver_slot;
pub mod frame_cache;

use connection::ConnectionTracker;
use driver_slot::DriverSlot;
use frame_cache::FrameCache;

/// Logical stream of frames, each bound to one notify characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataStream {
    /// Every frame in raw passthrough, the fast identifiers in engine-data mode.
    Fast,
    /// Remaining identifiers in engine-data mode. Unused in raw passthrough.
    Slow,
}

impl DataStream {
    pub const fn characteristic(self) -> CharacteristicId {
        match self {
            Self::Fast => CharacteristicId::FastData,
            Self::Slow => CharacteristicId::SlowData,
        }
    }
}

/// Result of a notify attempt. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyOutcome {
    /// The value was updated and a notification emitted.
    Sent { len: usize },
    /// Nothing was handed to the BLE stack.
    Skipped(SkipReason),
    /// The BLE stack refused the notification.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SkipReason {
    /// No peer connected.
    Disconnected,
    /// Peer connected but notifications are not enabled (subscription gate only).
    NotSubscribed,
    /// No frame captured on this stream yet.
    NoFrame,
    /// Called from inside a BLE driver call.
    Busy,
}

/// The bridge context object.
pub struct BridgeController<B: BlePeripheral, S: SystemControl> {
    config: BridgeConfig,
    fast: FrameCache,
    slow: FrameCache,
    connection: ConnectionTracker,
    ble: DriverSlot<B>,
    system: DriverSlot<S>,
}

impl<B: BlePeripheral, S: SystemControl> BridgeController<B, S> {
    pub fn new(config: BridgeConfig, ble: B, system: S) -> Self {
        Self {
            config,
            fast: FrameCache::new(),
            slow: FrameCache::new(),
            connection: ConnectionTracker::new(),
            ble: DriverSlot::new(ble),
            system: DriverSlot::new(system),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn connection(&self) -> &ConnectionTracker {
        &self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Stream a frame belongs to under the configured variant.
    pub fn stream_for(&self, frame: &CanFrame) -> DataStream {
        match self.config.variant {
            BridgeVariant::RawPassthrough => DataStream::Fast,
            BridgeVariant::EngineData { fast_ids } => {
                if fast_ids.contains(&frame.id) {
                    DataStream::Fast
                } else {
                    DataStream::Slow
                }
            }
        }
    }

    /// Latest frame cached for `stream`.
    pub fn latest_frame(&self, stream: DataStream) -> Option<CanFrame> {
        self.cache(stream).latest()
    }

    /// Capture a frame from the bus.
    ///
    /// The frame always replaces the cached one. In raw passthrough it is also
    /// notified right away; engine-data streams wait for their periodic task
    /// and `None` is returned.
    pub fn receive(&self, frame: CanFrame) -> Option<NotifyOutcome> {
        let stream = self.stream_for(&frame);
        self.cache(stream).store(frame);

        if self.config.variant.pushes_on_receive() {
            Some(self.notify(stream))
        } else {
            None
        }
    }

    /// Send the cached frame of `stream` to the connected peer.
    ///
    /// Used by both the receive path and the periodic re-announcement. Without
    /// a peer this is a no-op; the cache is left untouched either way.
    pub fn notify(&self, stream: DataStream) -> NotifyOutcome {
        let characteristic = stream.characteristic();

        if !self.connection.is_connected() {
            return NotifyOutcome::Skipped(SkipReason::Disconnected);
        }
        if self.config.notify_gate == NotifyGate::Subscribed
            && !self.connection.is_subscribed(characteristic)
        {
            return NotifyOutcome::Skipped(SkipReason::NotSubscribed);
        }
        let Some(wire) = self.cache(stream).latest_wire() else {
            return NotifyOutcome::Skipped(SkipReason::NoFrame);
        };

        let sent = self.with_ble(|ble| {
            ble.set_value(characteristic, wire.as_slice());
            ble.notify(characteristic)
        });

        match sent {
            Some(Ok(())) => NotifyOutcome::Sent { len: wire.len() },
            Some(Err(_err)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("notify refused: {}", defmt::Debug2Format(&_err));
                NotifyOutcome::Rejected
            }
            None => NotifyOutcome::Skipped(SkipReason::Busy),
        }
    }

    /// Unconditional device restart through [`SystemControl`].
    pub fn restart(&self) {
        if self.with_system(|system| system.restart()).is_none() {
            #[cfg(feature = "defmt")]
            defmt::error!("restart re-entered, ignoring nested request");
        }
    }

    /// Run `f` on the BLE stack. `None` when a driver call is already in progress.
    ///
    /// An advertising restart requested while the stack was checked out runs
    /// once `f` has returned.
    pub(crate) fn with_ble<R>(&self, f: impl FnOnce(&mut B) -> R) -> Option<R> {
        let result = self.ble.with(f)?;
        self.restart_pending_advertising();
        Some(result)
    }

    fn with_system<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.system.with(f)
    }

    fn restart_pending_advertising(&self) {
        while self.connection.take_advertising_request() {
            match self.ble.with(|ble| ble.start_advertising()) {
                Some(Ok(())) => {}
                Some(Err(_err)) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("advertising restart failed: {}", defmt::Debug2Format(&_err));
                }
                None => {
                    // Still inside a driver call: the outermost `with_ble` picks it up.
                    self.connection.request_advertising();
                    return;
                }
            }
        }
    }

    fn cache(&self, stream: DataStream) -> &FrameCache {
        match stream {
            DataStream::Fast => &self.fast,
            DataStream::Slow => &self.slow,
        }
    }

    fn execute_reboot(&self, command: RebootCommand) {
        if self
            .with_ble(|ble| command.disconnect_peer(ble))
            .is_none()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("BLE busy, restarting without explicit disconnect");
        }
        if self
            .with_system(|system| command.restart(system))
            .is_none()
        {
            #[cfg(feature = "defmt")]
            defmt::error!("restart re-entered, ignoring nested request");
        }
    }
}

impl<B: BlePeripheral, S: SystemControl> FrameSink for BridgeController<B, S> {
    fn on_frame(&self, frame: CanFrame) {
        let _ = self.receive(frame);
    }
}

impl<B: BlePeripheral, S: SystemControl> GattEvents for BridgeController<B, S> {
    fn on_connect(&self, peer: PeerInfo) {
        self.connection.connect(peer.conn_handle);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "client connected: handle {}, address {}",
            peer.conn_handle,
            peer.address
        );
    }

    fn on_disconnect(&self, peer: PeerInfo, _reason: u16) {
        // Duplicate events and late events for an older link are dropped.
        if !self.connection.disconnect(peer.conn_handle) {
            #[cfg(feature = "defmt")]
            defmt::debug!("ignoring disconnect of untracked handle {}", peer.conn_handle);
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "client {} disconnected (reason {:#X}) - start advertising",
            peer.conn_handle,
            _reason
        );

        self.connection.request_advertising();
        self.restart_pending_advertising();
    }

    fn on_subscribe(&self, _peer: PeerInfo, characteristic: CharacteristicId, sub_value: u16) {
        let enabled = sub_value & CCCD_NOTIFY != 0;
        self.connection.set_subscribed(characteristic, enabled);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "peer {} subscription on {}: {:#X}",
            _peer.conn_handle,
            characteristic,
            sub_value
        );
    }

    fn on_write(&self, peer: PeerInfo, characteristic: CharacteristicId, _payload: &[u8]) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "characteristic {} written, {} bytes",
            characteristic,
            _payload.len()
        );

        if let Some(command) = RebootCommand::from_write(characteristic, peer) {
            self.execute_reboot(command);
        }
    }
}
