//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements         | Connects to                    |
//! |--------------|--------------------|--------------------------------|
//! | `hardware`   | ActuatorPort       | Relay driver                   |
//! |              | StatusPort         | Reed switch driver             |
//! | `log_sink`   | LoggerPort         | Process log + event log file   |
//! | `sysfs_gpio` | PinDriver          | Linux `/sys/class/gpio`        |
//! | `time`       | Clock              | Host real-time clock           |

pub mod hardware;
pub mod log_sink;
pub mod sysfs_gpio;
pub mod time;
