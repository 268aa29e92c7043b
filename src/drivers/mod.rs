//! GPIO-level drivers. Dumb actuators and sensors; policy lives in the app
//! layer.

pub mod gpio;
pub mod reed_switch;
pub mod relay;
