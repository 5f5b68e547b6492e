//! Integration tests for the ArmController → FSM → servo pipeline.
//!
//! Each test drives the controller tick by tick against [`MockHardware`],
//! advancing a fake millisecond clock, and asserts on the recorded servo
//! and indicator calls plus the emitted events.

use armctl::adapters::config_store::ConfigStore;
use armctl::adapters::memory_storage::MemoryStorage;
use armctl::app::events::AppEvent;
use armctl::app::ports::ConfigPort;
use armctl::app::service::ArmController;
use armctl::config::SystemConfig;
use armctl::fsm::Mode;
use armctl::link::{self, CommandMailbox, GripperSelect};
use embedded_hal::digital::PinState;

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware};

/// Raw pot reading that maps to 90°.
const RAW_90: u16 = 511;

struct Rig<'m> {
    app: ArmController<'m>,
    hw: MockHardware,
    sink: LogSink,
    now: u32,
}

impl<'m> Rig<'m> {
    fn new(mailbox: &'m CommandMailbox) -> Self {
        Self::with_config(SystemConfig::default(), mailbox)
    }

    fn with_config(config: SystemConfig, mailbox: &'m CommandMailbox) -> Self {
        let mut rig = Self {
            app: ArmController::new(config, mailbox),
            hw: MockHardware::new(),
            sink: LogSink::new(),
            now: 0,
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    /// One control cycle, then advance the clock by the returned delay.
    fn tick(&mut self) -> u32 {
        let delay = self.app.tick(&mut self.hw, self.now, &mut self.sink);
        self.now += delay;
        delay
    }

    /// Press and release the mode button, long enough to register.
    fn press(&mut self) {
        let before = self.mode_changes();
        let deadline = self.now + 10 * (self.app.config().debounce_ms + 1);
        self.hw.button = PinState::Low;
        while self.mode_changes() == before {
            assert!(self.now < deadline, "press never registered");
            self.tick();
        }
        self.hw.button = PinState::High;
        self.tick();
    }

    fn mode_changes(&self) -> usize {
        self.sink
            .count(|e| matches!(e, AppEvent::ModeChanged { .. }))
    }
}

// ── Command mode ──────────────────────────────────────────────

#[test]
fn frame_with_selector_set_closes_gripper() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();
    assert_eq!(rig.app.mode(), Mode::ExternalCommand);
    rig.hw.clear();

    mb.on_receive([30, 90, 150, 1]);
    rig.tick();

    assert_eq!(
        rig.hw.servo_writes(),
        vec![(0, 30), (1, 90), (2, 150), (3, 100)]
    );
    assert_eq!(rig.app.angles(), [30, 90, 150, 100]);
}

#[test]
fn frame_with_selector_clear_opens_gripper() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();

    mb.on_receive([30, 90, 150, 0]);
    rig.tick();

    assert_eq!(rig.app.angles(), [30, 90, 150, 180]);
    assert!(rig.sink.events.contains(&AppEvent::CommandReceived {
        raw_targets: [30, 90, 150],
        raw_selector: 0,
        gripper: GripperSelect::Open,
    }));
}

#[test]
fn oversized_targets_are_clamped() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();

    mb.on_receive([255, 0, 181, 7]);
    rig.tick();

    assert_eq!(rig.app.angles(), [180, 0, 180, 100]);
    // The event keeps the bytes as received.
    assert!(rig.sink.events.contains(&AppEvent::CommandReceived {
        raw_targets: [255, 0, 181],
        raw_selector: 7,
        gripper: GripperSelect::Closed,
    }));
}

#[test]
fn only_the_latest_frame_is_applied() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();
    rig.hw.clear();

    mb.on_receive([10, 10, 10, 0]);
    mb.on_receive([20, 40, 60, 1]);
    rig.tick();
    assert_eq!(rig.app.angles(), [20, 40, 60, 100]);
    assert_eq!(rig.hw.servo_writes().len(), 4);

    // Nothing new: the next tick writes nothing.
    rig.hw.clear();
    rig.tick();
    assert!(rig.hw.servo_writes().is_empty());
}

#[test]
fn frame_received_in_local_mode_waits_for_command_mode() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    mb.on_receive([45, 45, 45, 0]);
    rig.tick();
    assert_eq!(rig.app.angles(), [90; 4]);

    rig.press();
    assert_eq!(rig.app.angles(), [45, 45, 45, 180]);
}

#[test]
fn short_receipt_keeps_previous_tail() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();

    mb.on_receive([10, 20, 30, 1]);
    rig.tick();
    mb.on_receive([70, 80]);
    rig.tick();

    assert_eq!(rig.app.angles(), [70, 80, 30, 100]);
}

#[test]
fn global_receive_entry_feeds_controller() {
    let mut rig = Rig::new(&link::COMMAND_MAILBOX);
    rig.press();

    assert_eq!(link::command_receive_isr([5, 6, 7, 0, 99]), 4);
    rig.tick();

    assert_eq!(rig.app.angles(), [5, 6, 7, 180]);
}

// ── Mode switching ────────────────────────────────────────────

#[test]
fn returning_to_local_forces_gripper_closed() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();
    mb.on_receive([0, 0, 0, 0]);
    rig.tick();
    assert_eq!(rig.hw.last_angle(3), Some(180));

    rig.press();

    assert_eq!(rig.app.mode(), Mode::LocalAnalog);
    assert_eq!(rig.hw.last_angle(3), Some(100));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::GripperForced { angle: 100 })
    );
}

#[test]
fn entering_command_mode_leaves_gripper_alone() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.clear();
    rig.press();
    assert_eq!(rig.hw.last_angle(3), None);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::GripperForced { .. })),
        0
    );
}

#[test]
fn indicator_follows_mode() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    assert_eq!(rig.hw.indicator(), Some(false));
    rig.press();
    assert_eq!(rig.hw.indicator(), Some(true));
    rig.press();
    assert_eq!(rig.hw.indicator(), Some(false));
}

#[test]
fn sustained_press_toggles_once() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.button = PinState::Low;
    while rig.now < 5_000 {
        rig.tick();
    }
    assert_eq!(rig.mode_changes(), 1);
    assert_eq!(rig.app.mode(), Mode::ExternalCommand);
}

#[test]
fn bouncing_contacts_do_not_toggle() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    for i in 0..40 {
        rig.hw.button = if i % 2 == 0 {
            PinState::Low
        } else {
            PinState::High
        };
        rig.tick();
    }
    assert_eq!(rig.mode_changes(), 0);
}

#[test]
fn tick_delay_depends_on_mode() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    assert_eq!(rig.tick(), 50);
    rig.press();
    assert_eq!(rig.tick(), 10);
    rig.press();
    assert_eq!(rig.tick(), 50);
}

// ── Local mode ────────────────────────────────────────────────

#[test]
fn pot_moves_servo() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.pots[1] = RAW_90;
    rig.tick();
    rig.hw.pots[1] = 450;
    rig.tick();
    assert_eq!(rig.app.angles()[1], 100);
    assert_eq!(rig.hw.last_angle(1), Some(100));
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Angles([90, 100, 90, 90])));
}

#[test]
fn dead_band_samples_do_not_move_servo() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.pots[0] = RAW_90;
    rig.tick();
    rig.hw.clear();

    for raw in [RAW_90 + 4, RAW_90 - 4, RAW_90 + 1] {
        rig.hw.pots[0] = raw;
        rig.tick();
    }
    assert!(rig.hw.servo_writes().is_empty());

    rig.hw.pots[0] = RAW_90 + 5;
    rig.tick();
    assert_eq!(rig.hw.servo_writes(), vec![(0, 89)]);
}

#[test]
fn spike_is_rejected_and_reported_once_per_ten() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.pots[0] = RAW_90;
    rig.tick();
    rig.hw.clear();

    rig.hw.pots[0] = 0;
    for _ in 0..10 {
        rig.tick();
    }
    let reports = |rig: &Rig| {
        rig.sink
            .count(|e| matches!(e, AppEvent::SampleRejected { channel: 0, .. }))
    };
    assert!(rig.hw.servo_writes().is_empty());
    assert_eq!(rig.app.rejects(0), 10);
    assert_eq!(reports(&rig), 1);

    rig.tick();
    assert_eq!(reports(&rig), 2);
    assert!(rig.sink.events.contains(&AppEvent::SampleRejected {
        channel: 0,
        candidate: 180,
        previous: 90,
        count: 11,
    }));
}

#[test]
fn accepted_sample_resets_reject_count() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.pots[2] = RAW_90;
    rig.tick();
    rig.hw.pots[2] = 0;
    rig.tick();
    rig.tick();
    assert_eq!(rig.app.rejects(2), 2);

    rig.hw.pots[2] = 450;
    rig.tick();
    assert_eq!(rig.app.rejects(2), 0);
    assert_eq!(rig.app.angles()[2], 100);
}

#[test]
fn failed_pot_read_skips_only_that_channel() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.hw.pots = [RAW_90; 4];
    rig.tick();
    rig.hw.failing_pots[0] = true;
    rig.hw.pots = [450; 4];
    rig.tick();
    assert_eq!(rig.app.angles(), [90, 100, 100, 100]);
}

#[test]
fn pots_are_ignored_in_command_mode() {
    let mb = CommandMailbox::new();
    let mut rig = Rig::new(&mb);
    rig.press();
    rig.hw.clear();
    rig.hw.pots = [RAW_90; 4];
    rig.tick();
    assert!(rig.hw.servo_writes().is_empty());
    assert_eq!(rig.app.rejects(0), 0);
}

// ── Startup and configuration ─────────────────────────────────

#[test]
fn startup_centres_everything_before_any_tick() {
    let mb = CommandMailbox::new();
    let rig = Rig::new(&mb);
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::Servo { channel: 0, angle: 90 },
            ActuatorCall::Servo { channel: 1, angle: 90 },
            ActuatorCall::Servo { channel: 2, angle: 90 },
            ActuatorCall::Servo { channel: 3, angle: 90 },
            ActuatorCall::Indicator(false),
        ]
    );
    assert_eq!(rig.app.mode(), Mode::LocalAnalog);
}

#[test]
fn persisted_config_drives_controller() {
    let store = ConfigStore::new(MemoryStorage::new());
    store
        .save(&SystemConfig {
            local_tick_ms: 20,
            gripper_closed_deg: 95,
            ..Default::default()
        })
        .unwrap();
    let config = store.load().unwrap();

    let mb = CommandMailbox::new();
    let mut rig = Rig::with_config(config, &mb);
    assert_eq!(rig.tick(), 20);
    rig.press();
    mb.on_receive([0, 0, 0, 1]);
    rig.tick();
    assert_eq!(rig.app.angles()[3], 95);
}
