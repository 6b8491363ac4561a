//! WASM bridge for the Allee core library.
//!
//! The JavaScript presentation layer (parameter sliders, growth chart, value
//! table, colony animation) calls into this crate on every parameter change
//! and renders the returned samples and regime.

pub mod analysis;
mod convert;
pub mod simulation;

pub use simulation::WasmSimulation;
