//! Application service, the hexagonal core.
//!
//! [`ArmController`] owns the mode machine, the button debouncer, the four
//! pot filters and the servo bank, and borrows the command mailbox the
//! receive ISR fills. All I/O flows through port traits injected at call
//! sites, so the whole tick is testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      ArmController        │
//! ActuatorPort ◀──│ Mode · Filters · Servos   │◀── CommandMailbox (ISR)
//!                 └──────────────────────────┘
//! ```
//!
//! Hardware errors never stop the loop: a failed pot read skips that channel
//! for the tick, a failed servo or LED write is logged and the tick goes on.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::drivers::button::{Debouncer, EdgeEvent};
use crate::drivers::servo::{GRIPPER, SERVO_COUNT, ServoBank};
use crate::fsm::context::ModeContext;
use crate::fsm::states::build_mode_table;
use crate::fsm::{Mode, ModeMachine};
use crate::link::{CommandMailbox, GripperSelect};
use crate::sensors::potentiometer::{AnalogFilter, FilterOutcome};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ArmController
// ───────────────────────────────────────────────────────────────

/// The control loop. One instance per mailbox.
pub struct ArmController<'m> {
    machine: ModeMachine,
    ctx: ModeContext,
    button: Debouncer,
    filters: [AnalogFilter; SERVO_COUNT],
    servos: ServoBank,
    mailbox: &'m CommandMailbox,
    tick_count: u64,
}

impl<'m> ArmController<'m> {
    /// Construct the controller in `LocalAnalog` with every servo at the
    /// configured initial angle.
    ///
    /// Does **not** touch hardware. Call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, mailbox: &'m CommandMailbox) -> Self {
        let button = Debouncer::new(config.debounce_ms);
        let servos = ServoBank::new(config.initial_angle_deg);
        let machine = ModeMachine::new(build_mode_table(), Mode::LocalAnalog);
        Self {
            machine,
            ctx: ModeContext::new(config),
            button,
            filters: [AnalogFilter::new(); SERVO_COUNT],
            servos,
            mailbox,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Centre every servo and put the indicator in the initial mode's state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.machine.start(&mut self.ctx);
        if let Err(e) = self.servos.write_all(hw) {
            warn!("Initial servo write failed: {}", e);
        }
        self.apply_indicator(hw);
        sink.emit(&AppEvent::Started {
            mode: self.machine.current_mode(),
            angles: self.servos.positions(),
        });
        info!(
            "ArmController started in {} at {:?}",
            self.machine.current_name(),
            self.servos.positions()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: button → mode branch → servo writes → report.
    ///
    /// Returns the delay in milliseconds the caller should wait before the
    /// next tick (shorter in command mode).
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        now_ms: u32,
        sink: &mut impl EventSink,
    ) -> u32 {
        self.tick_count += 1;

        // 1. Button (may flip the mode)
        match hw.button_level() {
            Ok(level) => {
                if let Some(EdgeEvent::Pressed) = self.button.poll(level, now_ms) {
                    self.toggle_mode(hw, sink);
                }
            }
            Err(e) => warn!("Button read failed: {}", e),
        }

        // 2. Mode branch
        match self.machine.current_mode() {
            Mode::LocalAnalog => self.follow_pots(hw, sink),
            Mode::ExternalCommand => self.follow_link(hw, sink),
        }

        self.machine.tick_delay_ms(&self.ctx.config)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.machine.current_mode()
    }

    /// Current angle of every servo.
    pub fn angles(&self) -> [u8; SERVO_COUNT] {
        self.servos.positions()
    }

    /// Consecutive rejected samples on `channel`.
    pub fn rejects(&self, channel: usize) -> u16 {
        self.filters[channel].consecutive_rejects()
    }

    /// Total control ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn toggle_mode(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let (from, to) = self.machine.toggle(&mut self.ctx);
        self.apply_indicator(hw);

        if let Some(angle) = self.ctx.outputs.force_gripper {
            if let Err(e) = self.servos.write(hw, GRIPPER, angle) {
                warn!("Gripper write failed: {}", e);
            }
            sink.emit(&AppEvent::GripperForced { angle });
        }

        sink.emit(&AppEvent::ModeChanged { from, to });
    }

    fn apply_indicator(&self, hw: &mut impl ActuatorPort) {
        if let Err(e) = hw.set_indicator(self.ctx.outputs.indicator_on) {
            warn!("Indicator write failed: {}", e);
        }
    }

    /// Local mode: filter every pot and write the accepted angles.
    fn follow_pots(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        for ch in 0..SERVO_COUNT {
            let raw = match hw.read_pot(ch) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!("Pot {} read failed: {}", ch, e);
                    continue;
                }
            };

            let current = self.servos.position(ch);
            match self.filters[ch].update(raw, current, &self.ctx.config) {
                FilterOutcome::Ignored => {}
                FilterOutcome::Accepted { angle } => {
                    if let Err(e) = self.servos.write(hw, ch, angle) {
                        warn!("Servo {} write failed: {}", ch, e);
                    }
                }
                FilterOutcome::Rejected {
                    candidate,
                    previous,
                    count,
                    report,
                } => {
                    if report {
                        sink.emit(&AppEvent::SampleRejected {
                            channel: ch,
                            candidate,
                            previous,
                            count,
                        });
                    }
                }
            }
        }

        sink.emit(&AppEvent::Angles(self.servos.positions()));
    }

    /// Command mode: apply the pending frame, if any.
    fn follow_link(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let Some(frame) = self.mailbox.take() else {
            return;
        };

        let gripper = frame.gripper();
        sink.emit(&AppEvent::CommandReceived {
            raw_targets: frame.raw_targets(),
            raw_selector: frame.selector(),
            gripper,
        });

        for (ch, angle) in frame.targets().into_iter().enumerate() {
            if let Err(e) = self.servos.write(hw, ch, angle) {
                warn!("Servo {} write failed: {}", ch, e);
            }
        }

        let gripper_angle = match gripper {
            GripperSelect::Closed => self.ctx.config.gripper_closed_deg,
            GripperSelect::Open => self.ctx.config.gripper_open_deg,
        };
        if let Err(e) = self.servos.write(hw, GRIPPER, gripper_angle) {
            warn!("Gripper write failed: {}", e);
        }
    }
}
