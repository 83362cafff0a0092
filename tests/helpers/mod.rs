/// Test doubles simulating the BLE stack, CAN driver, status pin, timer and
/// system control during integration tests.
use canble_bridge::core::CanFrame;
use canble_bridge::protocol::transport::{
    gatt::{CharacteristicId, SecurityPolicy, ServiceLayout},
    traits::{
        ble_peripheral::BlePeripheral,
        bridge_timer::BridgeTimer,
        can_source::{CanSource, FrameSink},
        gatt_events::{GattEvents, PeerInfo},
        system_control::SystemControl,
    },
};
use embedded_hal::digital::{ErrorType, OutputPin};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const PEER: PeerInfo = PeerInfo {
    conn_handle: 1,
    address: [0xC0, 0xFF, 0xEE, 0x00, 0x11, 0x22],
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
/// Everything the bridge asked of its collaborators, in order.
pub enum Event {
    Init(String),
    TxPower(u8),
    Security(SecurityPolicy),
    EventsRegistered,
    Service(ServiceLayout),
    SetValue(CharacteristicId, Vec<u8>),
    Notify(CharacteristicId),
    StartAdvertising,
    StopAdvertising,
    Disconnect(u16),
    Restart,
}

#[derive(Default)]
#[allow(dead_code)]
/// Journal shared between the doubles and the test body.
pub struct Journal {
    pub events: Vec<Event>,
    pub fail_init: bool,
}

#[allow(dead_code)]
pub type SharedJournal = Arc<Mutex<Journal>>;

#[allow(dead_code)]
pub fn journal() -> SharedJournal {
    Arc::new(Mutex::new(Journal::default()))
}

#[allow(dead_code)]
impl Journal {
    pub fn count(&self, wanted: &Event) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }

    pub fn notifications(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Notify(_)))
            .count()
    }

    pub fn values(&self, characteristic: CharacteristicId) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::SetValue(id, value) if *id == characteristic => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
}

/// In-memory BLE stack recording every call.
pub struct MockBle {
    journal: SharedJournal,
}

#[allow(dead_code)]
impl MockBle {
    pub fn new(journal: &SharedJournal) -> Self {
        Self {
            journal: Arc::clone(journal),
        }
    }

    fn record(&self, event: Event) {
        self.journal.lock().unwrap().events.push(event);
    }
}

impl BlePeripheral for MockBle {
    type Error = &'static str;

    fn init(&mut self, device_name: &str) -> Result<(), Self::Error> {
        if self.journal.lock().unwrap().fail_init {
            return Err("controller not responding");
        }
        self.record(Event::Init(device_name.to_string()));
        Ok(())
    }

    fn set_tx_power(&mut self, level: u8) -> Result<(), Self::Error> {
        self.record(Event::TxPower(level));
        Ok(())
    }

    fn configure_security(&mut self, policy: &SecurityPolicy) -> Result<(), Self::Error> {
        self.record(Event::Security(*policy));
        Ok(())
    }

    fn register_events(&mut self, _handler: &'static dyn GattEvents) {
        self.record(Event::EventsRegistered);
    }

    fn create_service(&mut self, layout: &ServiceLayout) -> Result<(), Self::Error> {
        self.record(Event::Service(*layout));
        Ok(())
    }

    fn set_value(&mut self, characteristic: CharacteristicId, value: &[u8]) {
        self.record(Event::SetValue(characteristic, value.to_vec()));
    }

    fn notify(&mut self, characteristic: CharacteristicId) -> Result<(), Self::Error> {
        self.record(Event::Notify(characteristic));
        Ok(())
    }

    fn start_advertising(&mut self) -> Result<(), Self::Error> {
        self.record(Event::StartAdvertising);
        Ok(())
    }

    fn stop_advertising(&mut self) -> Result<(), Self::Error> {
        self.record(Event::StopAdvertising);
        Ok(())
    }

    fn disconnect(&mut self, conn_handle: u16) -> Result<(), Self::Error> {
        self.record(Event::Disconnect(conn_handle));
        Ok(())
    }
}

/// Restart recorder standing in for a chip reset.
pub struct MockSystem {
    journal: SharedJournal,
}

#[allow(dead_code)]
impl MockSystem {
    pub fn new(journal: &SharedJournal) -> Self {
        Self {
            journal: Arc::clone(journal),
        }
    }
}

impl SystemControl for MockSystem {
    fn restart(&mut self) {
        self.journal.lock().unwrap().events.push(Event::Restart);
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// CAN driver double: records setup and lets the test fire receive "interrupts".
pub struct MockCan {
    pub pins: Option<(u8, u8)>,
    pub bitrate: Option<u32>,
    pub observing: bool,
    pub fail_begin: bool,
    sink: Option<&'static dyn FrameSink>,
}

#[allow(dead_code)]
impl MockCan {
    pub fn failing() -> Self {
        Self {
            fail_begin: true,
            ..Self::default()
        }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Simulate the receive interrupt for `frame`.
    pub fn deliver(&self, frame: CanFrame) {
        if let Some(sink) = self.sink {
            sink.on_frame(frame);
        }
    }
}

impl CanSource for MockCan {
    type Error = &'static str;

    fn set_pins(&mut self, rx: u8, tx: u8) {
        self.pins = Some((rx, tx));
    }

    fn begin(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        if self.fail_begin {
            return Err("transceiver missing");
        }
        self.bitrate = Some(bitrate);
        Ok(())
    }

    fn observe(&mut self) {
        self.observing = true;
    }

    fn on_receive(&mut self, sink: &'static dyn FrameSink) {
        self.sink = Some(sink);
    }
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Output pin remembering every level written.
pub struct MockPin {
    pub levels: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn toggles(&self) -> usize {
        self.levels.lock().unwrap().len().saturating_sub(1)
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.lock().unwrap().push(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Timer that records requested delays and only yields to the executor.
pub struct MockTimer {
    pub delays: Arc<Mutex<Vec<u32>>>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn recorded(&self) -> Vec<u32> {
        self.delays.lock().unwrap().clone()
    }
}

impl BridgeTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        self.delays.lock().unwrap().push(millis);
        tokio::task::yield_now().await;
    }
}
