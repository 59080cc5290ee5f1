//! Platform abstraction layer
//!
//! Browser bindings for the host collaborators:
//! - LocalStorage key-value store
//! - DOM HUD
//! - Canvas 2D draw sink
//!
//! Native builds use `persistence::JsonFileStore`, `ui::LogHud` and a plain
//! draw list instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
