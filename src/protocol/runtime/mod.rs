//! Boot sequence and run loop wiring.
//!
//! [`boot`] brings the BLE peripheral and the CAN controller up around a
//! `'static` [`BridgeController`]. [`BridgeRunner`] then drives the periodic
//! tasks: re-announcement of the cached frames and the status LED.
//!
//! ```rust,ignore
//! static BRIDGE: StaticCell<BridgeController<MyBle, MySystem>> = StaticCell::new();
//!
//! let bridge = BRIDGE.init(BridgeController::new(BridgeConfig::default(), ble, system));
//! let mut status = StatusIndicator::new(led);
//! boot(bridge, &mut can, &mut status, &mut timer, efuse_mac).await?;
//! BridgeRunner::new(bridge, status, timer).drive().await;
//! ```
use embedded_hal::digital::OutputPin;
use futures_util::future::join3;

use crate::config::{BridgeConfig, BridgeVariant};
use crate::error::BootError;
use crate::protocol::bridge::{BridgeController, DataStream};
use crate::protocol::identity::{device_name, DeviceName};
use crate::protocol::scheduler::{run_periodic, PeriodicTask};
use crate::protocol::status::StatusIndicator;
use crate::protocol::transport::gatt::{SecurityPolicy, ServiceLayout};
use crate::protocol::transport::traits::{
    ble_peripheral::BlePeripheral, bridge_timer::BridgeTimer, can_source::CanSource,
    system_control::SystemControl,
};

/// Bring the bridge up and return the advertised name.
///
/// Steps:
/// 1. Derive the device name from `hardware_id`.
/// 2. Initialise the BLE stack, pairing policy, event handler and service, then advertise.
/// 3. Start the CAN controller in bus-monitor mode and route received frames to the bridge.
///
/// If the CAN controller does not start, the status LED blinks the fault
/// pattern and the device restarts. Hosted targets get
/// [`BootError::CanInit`] back once the restart request returns.
pub async fn boot<C, B, S, P, T>(
    controller: &'static BridgeController<B, S>,
    can: &mut C,
    status: &mut StatusIndicator<P>,
    timer: &mut T,
    hardware_id: u64,
) -> Result<DeviceName, BootError<C::Error, B::Error>>
where
    C: CanSource,
    B: BlePeripheral + 'static,
    S: SystemControl + 'static,
    P: OutputPin,
    T: BridgeTimer,
{
    let config = *controller.config();
    let name = device_name(config.device_prefix, hardware_id)?;

    #[cfg(feature = "defmt")]
    defmt::info!("setting up {}", name.as_str());

    controller
        .with_ble(|ble| start_peripheral(ble, controller, &config, &name))
        .ok_or(BootError::BleReentered)?
        .map_err(BootError::Ble)?;

    can.set_pins(config.can_rx_pin, config.can_tx_pin);
    if let Err(err) = can.begin(config.can_bitrate) {
        #[cfg(feature = "defmt")]
        defmt::error!("starting CAN failed, restarting");

        status.signal_boot_fault(timer).await;
        controller.restart();
        return Err(BootError::CanInit(err));
    }
    can.observe();
    can.on_receive(controller);

    #[cfg(feature = "defmt")]
    defmt::info!("bridge up at {} bit/s", config.can_bitrate);

    Ok(name)
}

fn start_peripheral<B, S>(
    ble: &mut B,
    controller: &'static BridgeController<B, S>,
    config: &BridgeConfig,
    name: &DeviceName,
) -> Result<(), B::Error>
where
    B: BlePeripheral + 'static,
    S: SystemControl + 'static,
{
    ble.init(name.as_str())?;
    ble.set_tx_power(config.tx_power)?;
    ble.configure_security(&SecurityPolicy::from_config(config))?;
    ble.register_events(controller);
    ble.create_service(&ServiceLayout::for_variant(&config.variant))?;
    ble.start_advertising()
}

/// Periodic tasks driven by [`BridgeRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Re-announcement of the fast stream.
    pub fast: PeriodicTask,
    /// Re-announcement of the slow stream, disabled in raw passthrough.
    pub slow: PeriodicTask,
    /// Status LED toggle.
    pub status: PeriodicTask,
}

impl Schedule {
    pub fn from_config(config: &BridgeConfig) -> Self {
        let status = PeriodicTask::forever(config.status_period);
        match config.variant {
            BridgeVariant::RawPassthrough => Self {
                fast: PeriodicTask::forever(config.reannounce_period),
                slow: PeriodicTask::forever(config.reannounce_period).disabled(),
                status,
            },
            BridgeVariant::EngineData { .. } => Self {
                fast: PeriodicTask::forever(config.fast_period),
                slow: PeriodicTask::forever(config.reannounce_period),
                status,
            },
        }
    }
}

/// Cooperative run loop of the bridge.
pub struct BridgeRunner<'a, B, S, P, T>
where
    B: BlePeripheral,
    S: SystemControl,
    P: OutputPin,
    T: BridgeTimer + Clone,
{
    controller: &'a BridgeController<B, S>,
    status: StatusIndicator<P>,
    timer: T,
    schedule: Schedule,
}

impl<'a, B, S, P, T> BridgeRunner<'a, B, S, P, T>
where
    B: BlePeripheral,
    S: SystemControl,
    P: OutputPin,
    T: BridgeTimer + Clone,
{
    /// Runner with the schedule derived from the controller configuration.
    pub fn new(
        controller: &'a BridgeController<B, S>,
        status: StatusIndicator<P>,
        timer: T,
    ) -> Self {
        let schedule = Schedule::from_config(controller.config());
        Self {
            controller,
            status,
            timer,
            schedule,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Run every task until all of them complete, then hand the LED back.
    ///
    /// With the default schedule the tasks run forever.
    pub async fn drive(self) -> StatusIndicator<P> {
        let Self {
            controller,
            mut status,
            timer,
            schedule,
        } = self;

        let mut fast_timer = timer.clone();
        let mut slow_timer = timer.clone();
        let mut status_timer = timer;

        let fast = run_periodic(&mut fast_timer, schedule.fast, || {
            let _outcome = controller.notify(DataStream::Fast);
        });
        let slow = run_periodic(&mut slow_timer, schedule.slow, || {
            let _outcome = controller.notify(DataStream::Slow);
        });
        let blink = run_periodic(&mut status_timer, schedule.status, || {
            status.toggle();
        });

        join3(fast, slow, blink).await;
        status
    }
}
