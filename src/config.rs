//! Compile-time defaults and the runtime [`BridgeConfig`] handed to the controller.
use embassy_time::Duration;

/// Prefix of the advertised name; a 4-digit hex suffix is appended per unit.
pub const DEVICE_ID_PREFIX: &str = "ESP32Can";

/// Static passkey requested during bonding.
///
/// Shared by every deployed unit, so it is not a per-device secret.
pub const BLE_SECURITY_PASSKEY: u32 = 123_456;

/// BLE transmit power level handed to the stack.
pub const BLE_TX_POWER: u8 = 9;

/// CAN bus bitrate (bit/s).
pub const CAN_BITRATE: u32 = 500_000;

/// Transceiver RX pin.
pub const CAN_RX_PIN: u8 = 18;

/// Transceiver TX pin.
pub const CAN_TX_PIN: u8 = 17;

/// Re-announcement period of the cached frame (slow stream in engine-data mode).
pub const REANNOUNCE_PERIOD_MS: u64 = 1000;

/// Update rate of the fast stream in engine-data mode.
pub const FAST_MESSAGES_FREQUENCY_HZ: u64 = 25;

/// Status LED toggle period.
pub const STATUS_BLINK_PERIOD_MS: u64 = 1000;

/// Toggles emitted when the CAN controller fails to start.
pub const BOOT_FAULT_BLINKS: u8 = 10;

/// Delay between two boot-fault toggles.
pub const BOOT_FAULT_BLINK_MS: u32 = 100;

/// Which bridge flavour the firmware runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeVariant {
    /// Every frame is pushed as soon as it arrives on the fast data
    /// characteristic, then re-announced every `reannounce_period`.
    RawPassthrough,
    /// Frames are sorted by identifier into a fast and a slow stream, each on
    /// its own characteristic, and only delivered by their periodic tasks.
    EngineData {
        /// Identifiers routed to the fast stream. Everything else is slow.
        fast_ids: &'static [u32],
    },
}

impl BridgeVariant {
    /// Whether a frame is pushed immediately from the receive callback.
    pub fn pushes_on_receive(&self) -> bool {
        matches!(self, Self::RawPassthrough)
    }
}

/// Condition under which a notification is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyGate {
    /// Any connected peer receives notifications.
    PeerConnected,
    /// The peer must also have enabled notifications on the characteristic.
    Subscribed,
}

/// Bridge settings. Defaults match the constants of this module.
#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    /// Advertised name prefix, see [`DEVICE_ID_PREFIX`].
    pub device_prefix: &'static str,
    /// Static bonding passkey.
    pub passkey: u32,
    /// BLE transmit power level.
    pub tx_power: u8,
    /// CAN bus bitrate in bit/s.
    pub can_bitrate: u32,
    /// Transceiver RX pin.
    pub can_rx_pin: u8,
    /// Transceiver TX pin.
    pub can_tx_pin: u8,
    /// Re-announcement period of the raw stream, and of the slow stream in engine-data mode.
    pub reannounce_period: Duration,
    /// Period of the fast stream in engine-data mode.
    pub fast_period: Duration,
    /// Status LED toggle period.
    pub status_period: Duration,
    /// Bridge flavour.
    pub variant: BridgeVariant,
    /// Condition for emitting a notification.
    pub notify_gate: NotifyGate,
}

impl BridgeConfig {
    /// Configuration built from the module defaults.
    pub const fn new() -> Self {
        Self {
            device_prefix: DEVICE_ID_PREFIX,
            passkey: BLE_SECURITY_PASSKEY,
            tx_power: BLE_TX_POWER,
            can_bitrate: CAN_BITRATE,
            can_rx_pin: CAN_RX_PIN,
            can_tx_pin: CAN_TX_PIN,
            reannounce_period: Duration::from_millis(REANNOUNCE_PERIOD_MS),
            fast_period: Duration::from_millis(1000 / FAST_MESSAGES_FREQUENCY_HZ),
            status_period: Duration::from_millis(STATUS_BLINK_PERIOD_MS),
            variant: BridgeVariant::RawPassthrough,
            notify_gate: NotifyGate::PeerConnected,
        }
    }

    pub const fn with_device_prefix(mut self, prefix: &'static str) -> Self {
        self.device_prefix = prefix;
        self
    }

    pub const fn with_variant(mut self, variant: BridgeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub const fn with_notify_gate(mut self, gate: NotifyGate) -> Self {
        self.notify_gate = gate;
        self
    }

    pub const fn with_can_bus(mut self, bitrate: u32, rx_pin: u8, tx_pin: u8) -> Self {
        self.can_bitrate = bitrate;
        self.can_rx_pin = rx_pin;
        self.can_tx_pin = tx_pin;
        self
    }

    pub const fn with_reannounce_period(mut self, period: Duration) -> Self {
        self.reannounce_period = period;
        self
    }

    pub const fn with_fast_period(mut self, period: Duration) -> Self {
        self.fast_period = period;
        self
    }

    pub const fn with_status_period(mut self, period: Duration) -> Self {
        self.status_period = period;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
