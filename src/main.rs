//! armctl firmware main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter    LogEventSink   ConfigStore<NvsStorage>   │
//! │  (Sensor+Actuator)  (EventSink)    (ConfigPort)              │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          ArmController (pure logic)                │      │
//! │  │  ModeMachine · Debouncer · AnalogFilter · Servos   │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                         ▲                                    │
//! │            COMMAND_MAILBOX ◀── i2c-rx task (I²C slave)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::{debug, info, warn};

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::{FreeRtos, TickType};
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::i2c::{I2cSlaveConfig, I2cSlaveDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use armctl::adapters::config_store::ConfigStore;
use armctl::adapters::hardware::HardwareAdapter;
use armctl::adapters::log_sink::LogEventSink;
use armctl::adapters::nvs::NvsStorage;
use armctl::adapters::time::MonotonicClock;
use armctl::app::ports::ConfigPort;
use armctl::app::service::ArmController;
use armctl::config::SystemConfig;
use armctl::drivers::task_pin::{Core, spawn_on_core};
use armctl::error::SensorError;
use armctl::link;
use armctl::pins;

/// I²C receive task sizing.
const RX_TASK_PRIORITY: u8 = 5;
const RX_TASK_STACK_KB: usize = 4;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  armctl v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let p = Peripherals::take()?;

    // ── 2. Config from NVS (or defaults) ──────────────────────
    let config_store = ConfigStore::new(NvsStorage::new(EspDefaultNvsPartition::take()?));
    let config = match config_store.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    info!("Config: {:?}", config);

    // ── 3. Servos: LEDC, 50 Hz, 14-bit ────────────────────────
    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits14),
    )?;
    let servos = [
        LedcDriver::new(p.ledc.channel0, &timer, p.pins.gpio9)?,
        LedcDriver::new(p.ledc.channel1, &timer, p.pins.gpio10)?,
        LedcDriver::new(p.ledc.channel2, &timer, p.pins.gpio11)?,
        LedcDriver::new(p.ledc.channel3, &timer, p.pins.gpio12)?,
    ];
    info!(
        "Servos on GPIO {:?} ({} Hz, {}-bit)",
        pins::SERVO_GPIOS,
        pins::SERVO_PWM_FREQ_HZ,
        pins::SERVO_PWM_RESOLUTION_BITS
    );

    // ── 4. Potentiometers: ADC1 oneshot ───────────────────────
    let adc = AdcDriver::new(p.adc1)?;
    let adc_cfg = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut pot0 = AdcChannelDriver::new(&adc, p.pins.gpio1, &adc_cfg)?;
    let mut pot1 = AdcChannelDriver::new(&adc, p.pins.gpio2, &adc_cfg)?;
    let mut pot2 = AdcChannelDriver::new(&adc, p.pins.gpio3, &adc_cfg)?;
    let mut pot3 = AdcChannelDriver::new(&adc, p.pins.gpio4, &adc_cfg)?;
    // 12-bit oneshot samples scaled down to the 10-bit range the filter expects.
    let pots = |ch: usize| -> Result<u16, SensorError> {
        let raw = match ch {
            0 => adc.read(&mut pot0),
            1 => adc.read(&mut pot1),
            2 => adc.read(&mut pot2),
            3 => adc.read(&mut pot3),
            _ => return Err(SensorError::NoSuchChannel),
        };
        raw.map(|v| v >> 2).map_err(|_| SensorError::AdcReadFailed)
    };
    info!("Pots on GPIO {:?}", pins::POT_ADC_GPIOS);

    // ── 5. Button (pull-up, active low) and indicator LED ─────
    let mut button = PinDriver::input(p.pins.gpio5)?;
    button.set_pull(Pull::Up)?;
    let led = PinDriver::output(p.pins.gpio13)?;
    info!(
        "Button GPIO{}, indicator GPIO{}",
        pins::BUTTON_GPIO,
        pins::LED_GPIO
    );

    // ── 6. Command link: I²C slave feeding the mailbox ────────
    let mut slave = I2cSlaveDriver::new(
        p.i2c0,
        p.pins.gpio14,
        p.pins.gpio15,
        pins::I2C_SLAVE_ADDR,
        &I2cSlaveConfig::new()
            .rx_buffer_length(64)
            .tx_buffer_length(64),
    )?;
    info!(
        "I2C slave at 0x{:02X} (SDA GPIO{}, SCL GPIO{})",
        pins::I2C_SLAVE_ADDR,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO
    );

    spawn_on_core(
        Core::Pro,
        RX_TASK_PRIORITY,
        RX_TASK_STACK_KB,
        "i2c-rx\0",
        move || loop {
            let read = |buf: &mut [u8], timeout_ms: u32| {
                slave.read(buf, TickType::new_millis(u64::from(timeout_ms)).ticks())
            };
            if let Err(e) = link::receive_transaction(&link::COMMAND_MAILBOX, read) {
                debug!("I2C slave read failed: {}", e);
            }
        },
    )?;

    // ── 7. Controller ─────────────────────────────────────────
    let mut hw = HardwareAdapter::new(servos, pots, button, led);
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();
    let mut app = ArmController::new(config, &link::COMMAND_MAILBOX);
    app.start(&mut hw, &mut sink);

    info!("Press the mode button to switch between pots and the I2C link");
    info!("Entering control loop");
    loop {
        let delay_ms = app.tick(&mut hw, clock.now_ms(), &mut sink);
        FreeRtos::delay_ms(delay_ms);
    }
}
