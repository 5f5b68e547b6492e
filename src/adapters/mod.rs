//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements         | Connects to                  |
//! |------------------|--------------------|------------------------------|
//! | `hardware`       | SensorPort         | ADC, button GPIO             |
//! |                  | ActuatorPort       | servo PWM, indicator GPIO    |
//! | `log_sink`       | EventSink          | Serial log output            |
//! | `config_store`   | ConfigPort         | any StoragePort              |
//! | `memory_storage` | StoragePort        | in-memory map (host)         |
//! | `nvs`            | StoragePort        | ESP-IDF NVS (target only)    |
//! | `time`           | (none)             | monotonic ms clock           |

pub mod config_store;
pub mod hardware;
pub mod log_sink;
pub mod memory_storage;
#[cfg(target_os = "espidf")]
pub mod nvs;
pub mod time;
