// EventSheet - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: util, core::model value types, directories, flate2.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
