//! Error kinds raised by the geometry core.

use crate::data_structures::instance::PropCategory;

pub type Result<T> = std::result::Result<T, PlanetError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// Inverse of a (near-)singular matrix was requested.
    #[error("matrix is not invertible (determinant {determinant:e})")]
    InvalidTransform { determinant: f32 },

    /// A vector too short to carry a direction was normalized.
    #[error("cannot normalize vector of length {length:e}")]
    DegenerateVector { length: f32 },

    /// Rejection sampling ran out of attempts; the category stopped early.
    #[error(
        "no vertex above sea level for {category:?} after {attempts} attempts ({placed}/{requested} placed)"
    )]
    ScatterExhausted {
        category: PropCategory,
        placed: usize,
        requested: usize,
        attempts: u32,
    },

    #[error("sphere resolution must be at least 1, got {0}")]
    InvalidResolution(u32),
}
