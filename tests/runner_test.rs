//! Periodic tasks: iteration counting, re-announcement and status blinking.
mod helpers {
    include!("helpers/mod.rs");
}

use canble_bridge::config::{BridgeConfig, BridgeVariant};
use canble_bridge::core::CanFrame;
use canble_bridge::protocol::bridge::BridgeController;
use canble_bridge::protocol::runtime::{BridgeRunner, Schedule};
use canble_bridge::protocol::scheduler::{run_periodic, PeriodicTask};
use canble_bridge::protocol::status::StatusIndicator;
use canble_bridge::protocol::transport::gatt::CharacteristicId;
use canble_bridge::protocol::transport::traits::gatt_events::GattEvents;
use embassy_time::Duration;
use helpers::{journal, Event, MockBle, MockPin, MockSystem, MockTimer, PEER};

#[tokio::test]
async fn test_counted_task_fires_before_first_delay() {
    let mut timer = MockTimer::default();
    let mut fired = 0;

    run_periodic(
        &mut timer,
        PeriodicTask::times(Duration::from_millis(250), 3),
        || fired += 1,
    )
    .await;

    assert_eq!(fired, 3);
    assert_eq!(timer.recorded(), vec![250, 250]);
}

#[tokio::test]
async fn test_disabled_and_zero_count_tasks_never_fire() {
    let mut timer = MockTimer::default();
    let mut fired = 0;

    run_periodic(
        &mut timer,
        PeriodicTask::forever(Duration::from_millis(10)).disabled(),
        || fired += 1,
    )
    .await;
    run_periodic(
        &mut timer,
        PeriodicTask::times(Duration::from_millis(10), 0),
        || fired += 1,
    )
    .await;

    assert_eq!(fired, 0);
    assert!(timer.recorded().is_empty());
}

#[tokio::test]
async fn test_runner_reannounces_identical_buffer_and_blinks() {
    let journal = journal();
    let bridge = BridgeController::new(
        BridgeConfig::default(),
        MockBle::new(&journal),
        MockSystem::new(&journal),
    );
    bridge.on_connect(PEER);
    bridge.receive(CanFrame::new(0x7E8, &[0x02, 0x41, 0x0C]));

    let pin = MockPin::default();
    let timer = MockTimer::default();
    let schedule = Schedule {
        fast: PeriodicTask::times(Duration::from_millis(1000), 3),
        slow: PeriodicTask::forever(Duration::from_millis(1000)).disabled(),
        status: PeriodicTask::times(Duration::from_millis(1000), 4),
    };

    let status = BridgeRunner::new(&bridge, StatusIndicator::new(pin.clone()), timer.clone())
        .with_schedule(schedule)
        .drive()
        .await;

    let expected = vec![0xE8, 0x07, 0x00, 0x00, 0x03, 0x02, 0x41, 0x0C];
    let journal = journal.lock().unwrap();
    // One push from the receive callback, three re-announcements.
    assert_eq!(journal.values(CharacteristicId::FastData), vec![expected; 4]);
    assert_eq!(journal.notifications(), 4);
    assert_eq!(journal.count(&Event::Notify(CharacteristicId::SlowData)), 0);

    assert_eq!(pin.toggles(), 4);
    assert!(!status.is_lit());
    assert_eq!(timer.recorded().len(), 2 + 3);
}

#[tokio::test]
async fn test_runner_stays_quiet_without_peer() {
    let journal = journal();
    let bridge = BridgeController::new(
        BridgeConfig::default(),
        MockBle::new(&journal),
        MockSystem::new(&journal),
    );
    bridge.receive(CanFrame::new(0x100, &[1, 2]));

    let pin = MockPin::default();
    let schedule = Schedule {
        fast: PeriodicTask::times(Duration::from_millis(1000), 5),
        slow: PeriodicTask::forever(Duration::from_millis(1000)).disabled(),
        status: PeriodicTask::times(Duration::from_millis(1000), 2),
    };

    BridgeRunner::new(&bridge, StatusIndicator::new(pin.clone()), MockTimer::default())
        .with_schedule(schedule)
        .drive()
        .await;

    assert!(journal.lock().unwrap().events.is_empty());
    // The LED keeps blinking with nobody connected.
    assert_eq!(pin.toggles(), 2);
}

#[tokio::test]
async fn test_engine_data_runner_notifies_both_streams() {
    static FAST_IDS: [u32; 1] = [0x0C9];

    let journal = journal();
    let config = BridgeConfig::default().with_variant(BridgeVariant::EngineData {
        fast_ids: &FAST_IDS,
    });
    let bridge = BridgeController::new(config, MockBle::new(&journal), MockSystem::new(&journal));
    bridge.on_connect(PEER);

    // Engine-data frames wait for their periodic task.
    assert_eq!(bridge.receive(CanFrame::new(0x0C9, &[0x10, 0x20])), None);
    assert_eq!(bridge.receive(CanFrame::new(0x3E9, &[0x7F])), None);
    assert_eq!(journal.lock().unwrap().notifications(), 0);

    let schedule = Schedule {
        fast: PeriodicTask::times(Duration::from_millis(40), 5),
        slow: PeriodicTask::times(Duration::from_millis(1000), 1),
        status: PeriodicTask::times(Duration::from_millis(1000), 0),
    };
    let timer = MockTimer::default();

    BridgeRunner::new(&bridge, StatusIndicator::new(MockPin::default()), timer.clone())
        .with_schedule(schedule)
        .drive()
        .await;

    let journal = journal.lock().unwrap();
    assert_eq!(
        journal.values(CharacteristicId::FastData),
        vec![vec![0xC9, 0x00, 0x00, 0x00, 0x02, 0x10, 0x20]; 5]
    );
    assert_eq!(
        journal.values(CharacteristicId::SlowData),
        vec![vec![0xE9, 0x03, 0x00, 0x00, 0x01, 0x7F]]
    );
    assert_eq!(timer.recorded(), vec![40; 4]);
}

#[test]
fn test_default_schedule_matches_variant() {
    let raw = Schedule::from_config(&BridgeConfig::default());
    assert_eq!(raw.fast, PeriodicTask::forever(Duration::from_millis(1000)));
    assert!(!raw.slow.enabled);

    let engine = Schedule::from_config(
        &BridgeConfig::default().with_variant(BridgeVariant::EngineData { fast_ids: &[] }),
    );
    assert_eq!(engine.fast.interval, Duration::from_millis(40));
    assert_eq!(engine.slow.interval, Duration::from_millis(1000));
}
