// EventSheet - app/mod.rs
//
// Application layer: run orchestration, collection and report writing.
// Dependencies: core, platform, util.

pub mod collect;
pub mod pipeline;
pub mod report;
