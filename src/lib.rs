//! planet-ngin
//!
//! CPU-side geometry for a small procedural planet: a tessellated unit
//! sphere displaced by gradient noise, props scattered above sea level and
//! aligned to the surface, and ray picking for placing more props by hand.
//! Everything a renderer needs comes out as flat buffers or POD records.
//!
//! High-level modules
//! - `transform`: 4x4 matrix and vector helpers on top of cgmath
//! - `orientation`: rotating a prop's up axis onto a surface normal
//! - `noise`: permutation-table gradient noise and the uncorrelated mode
//! - `data_structures`: base sphere, terrain and prop instances
//! - `scatter`: rejection-sampled prop placement
//! - `pick`: cursor-to-ray mapping and ray/mesh intersection
//! - `camera`: view and projection parameters
//! - `config`: generation parameters and slider changes
//! - `planet`: live state that rebuilds on config changes and picks
//! - `render`: vertex/instance layouts and buffer upload
//! - `resources`: prop OBJ/MTL loading
//!

pub mod camera;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod noise;
pub mod orientation;
pub mod pick;
pub mod planet;
pub mod render;
pub mod resources;
pub mod scatter;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::{PlanetError, Result};
pub use winit::dpi::{PhysicalPosition, PhysicalSize};
