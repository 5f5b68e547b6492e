//! Fuzz target: `ArmController::tick`
//!
//! Interprets the input as a script of pot readings, button levels, frame
//! bytes and clock jumps, and checks that every servo write stays within
//! 0–180° on a valid channel.
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use armctl::app::events::AppEvent;
use armctl::app::ports::{ActuatorPort, EventSink, SensorPort};
use armctl::app::service::ArmController;
use armctl::config::SystemConfig;
use armctl::error::{ActuatorError, SensorError};
use armctl::link::CommandMailbox;
use embedded_hal::digital::PinState;
use libfuzzer_sys::fuzz_target;

struct Rig {
    pots: [u16; 4],
    button: PinState,
}

impl SensorPort for Rig {
    fn read_pot(&mut self, channel: usize) -> Result<u16, SensorError> {
        self.pots.get(channel).copied().ok_or(SensorError::NoSuchChannel)
    }
    fn button_level(&mut self) -> Result<PinState, SensorError> {
        Ok(self.button)
    }
}

impl ActuatorPort for Rig {
    fn write_servo(&mut self, channel: usize, angle: u8) -> Result<(), ActuatorError> {
        assert!(channel < 4, "servo channel {channel}");
        assert!(angle <= 180, "servo angle {angle}");
        Ok(())
    }
    fn set_indicator(&mut self, _on: bool) -> Result<(), ActuatorError> {
        Ok(())
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mb = CommandMailbox::new();
    let mut app = ArmController::new(SystemConfig::default(), &mb);
    let mut rig = Rig {
        pots: [0; 4],
        button: PinState::High,
    };
    let mut now = 0u32;
    app.start(&mut rig, &mut Discard);

    for op in data.chunks(3) {
        let &[tag, a, b] = op else { break };
        match tag % 4 {
            0 => rig.pots[usize::from(a % 4)] = u16::from_le_bytes([b, a]) % 1100,
            1 => rig.button = PinState::from(a & 1 == 1),
            2 => {
                mb.on_receive([a, b, a ^ b, tag]);
            }
            _ => now = now.wrapping_add(u32::from(a) * 10),
        }
        now = now.wrapping_add(app.tick(&mut rig, now, &mut Discard));
        assert!(app.angles().iter().all(|&x| x <= 180));
    }
});
