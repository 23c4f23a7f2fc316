//! Planet data structures: base sphere, displaced terrain and prop instances.
//!
//! - `sphere` holds the undisplaced UV-sphere topology
//! - `terrain` holds the noise-displaced surface and its flat buffers
//! - `instance` holds prop categories and per-instance transforms

pub mod instance;
pub mod sphere;
pub mod terrain;
