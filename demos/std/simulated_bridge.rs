//! Host simulation of the bridge: a console BLE stack, a CAN driver fed by
//! hand, and a few seconds of the run loop.

use std::convert::Infallible;

use canble_bridge::{
    config::BridgeConfig,
    core::CanFrame,
    protocol::{
        bridge::{BridgeController, DataStream},
        runtime::{boot, BridgeRunner, Schedule},
        scheduler::PeriodicTask,
        status::StatusIndicator,
        transport::{
            gatt::{CharacteristicId, SecurityPolicy, ServiceLayout},
            traits::{
                ble_peripheral::BlePeripheral,
                bridge_timer::BridgeTimer,
                can_source::{CanSource, FrameSink},
                gatt_events::{GattEvents, PeerInfo},
                system_control::SystemControl,
            },
        },
    },
};
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin};

struct ConsoleBle;

impl BlePeripheral for ConsoleBle {
    type Error = Infallible;

    fn init(&mut self, device_name: &str) -> Result<(), Self::Error> {
        println!("  [ble] init as {}", device_name);
        Ok(())
    }

    fn set_tx_power(&mut self, level: u8) -> Result<(), Self::Error> {
        println!("  [ble] tx power level {}", level);
        Ok(())
    }

    fn configure_security(&mut self, policy: &SecurityPolicy) -> Result<(), Self::Error> {
        println!(
            "  [ble] bonding={} mitm={} sc={} passkey={:06}",
            policy.bonding, policy.mitm, policy.secure_connections, policy.passkey
        );
        Ok(())
    }

    fn register_events(&mut self, _handler: &'static dyn GattEvents) {
        println!("  [ble] event handler registered");
    }

    fn create_service(&mut self, layout: &ServiceLayout) -> Result<(), Self::Error> {
        println!("  [ble] service {:032x}", layout.uuid);
        for characteristic in layout.characteristics {
            println!(
                "        characteristic {:032x} properties {:#06x}",
                characteristic.uuid,
                characteristic.properties.bits()
            );
        }
        Ok(())
    }

    fn set_value(&mut self, characteristic: CharacteristicId, value: &[u8]) {
        println!("  [ble] {:?} <- {:02X?}", characteristic, value);
    }

    fn notify(&mut self, characteristic: CharacteristicId) -> Result<(), Self::Error> {
        println!("  [ble] notify {:?}", characteristic);
        Ok(())
    }

    fn start_advertising(&mut self) -> Result<(), Self::Error> {
        println!("  [ble] advertising");
        Ok(())
    }

    fn stop_advertising(&mut self) -> Result<(), Self::Error> {
        println!("  [ble] advertising stopped");
        Ok(())
    }

    fn disconnect(&mut self, conn_handle: u16) -> Result<(), Self::Error> {
        println!("  [ble] disconnect handle {}", conn_handle);
        Ok(())
    }
}

struct ConsoleSystem;

impl SystemControl for ConsoleSystem {
    fn restart(&mut self) {
        println!("  [sys] restart requested");
    }
}

#[derive(Default)]
struct ManualCan {
    sink: Option<&'static dyn FrameSink>,
}

impl ManualCan {
    fn inject(&self, frame: CanFrame) {
        println!("  [can] rx id={:#05X} data={:02X?}", frame.id, frame.payload());
        if let Some(sink) = self.sink {
            sink.on_frame(frame);
        }
    }
}

impl CanSource for ManualCan {
    type Error = Infallible;

    fn set_pins(&mut self, rx: u8, tx: u8) {
        println!("  [can] rx pin {}, tx pin {}", rx, tx);
    }

    fn begin(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        println!("  [can] started at {} bit/s", bitrate);
        Ok(())
    }

    fn observe(&mut self) {
        println!("  [can] bus-monitor mode");
    }

    fn on_receive(&mut self, sink: &'static dyn FrameSink) {
        self.sink = Some(sink);
    }
}

struct ConsoleLed;

impl ErrorType for ConsoleLed {
    type Error = Infallible;
}

impl OutputPin for ConsoleLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        println!("  [led] off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        println!("  [led] on");
        Ok(())
    }
}

#[derive(Clone)]
struct TokioTimer;

impl BridgeTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        tokio::time::sleep(std::time::Duration::from_millis(millis as u64)).await;
    }
}

#[tokio::main]
async fn main() {
    println!("=== CAN-to-BLE Bridge Simulation ===\n");

    let bridge: &'static BridgeController<ConsoleBle, ConsoleSystem> = Box::leak(Box::new(
        BridgeController::new(BridgeConfig::default(), ConsoleBle, ConsoleSystem),
    ));
    let mut can = ManualCan::default();
    let mut status = StatusIndicator::new(ConsoleLed);
    let mut timer = TokioTimer;

    println!("1. Boot:");
    match boot(bridge, &mut can, &mut status, &mut timer, 0x0000_BEEF_0000_0000).await {
        Ok(name) => println!("  advertising as {}\n", name),
        Err(err) => {
            println!("  boot failed: {}", err);
            return;
        }
    }

    let peer = PeerInfo {
        conn_handle: 1,
        address: [0xC0, 0xFF, 0xEE, 0x00, 0x11, 0x22],
    };

    println!("2. Frame with nobody connected (cached only):");
    can.inject(CanFrame::new(0x123, &[0xAA, 0xBB, 0xCC]));
    println!("  cached: {:?}\n", bridge.latest_frame(DataStream::Fast));

    println!("3. Peer connects, traffic is pushed:");
    bridge.on_connect(peer);
    can.inject(CanFrame::new(0x7E8, &[0x04, 0x41, 0x0C, 0x1A, 0xF8]));
    println!();

    println!("4. Three seconds of re-announcement and blinking:");
    let schedule = Schedule {
        fast: PeriodicTask::times(Duration::from_millis(1000), 3),
        slow: PeriodicTask::forever(Duration::from_millis(1000)).disabled(),
        status: PeriodicTask::times(Duration::from_millis(1000), 3),
    };
    let status = BridgeRunner::new(bridge, status, timer)
        .with_schedule(schedule)
        .drive()
        .await;
    println!("  led lit at end: {}\n", status.is_lit());

    println!("5. Peer drops, then reconnects and writes the reboot characteristic:");
    bridge.on_disconnect(peer, 0x13);
    bridge.on_connect(peer);
    bridge.on_write(peer, CharacteristicId::Reboot, &[]);
}
