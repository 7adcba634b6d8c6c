// EventSheet - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform or app. Reads directory listings only
// (discovery); file contents arrive as bytes from the platform layer.

pub mod catalog;
pub mod classify;
pub mod decode;
pub mod discovery;
pub mod export;
pub mod model;
pub mod sheet;
