//! Aligning a prop's canonical +Y axis with a surface normal.

use std::f32::consts::PI;

use cgmath::{Matrix4, Vector3};

use crate::{error::Result, transform};

/// How close `dot(up, n)` has to get to ±1 before `n` counts as parallel to up.
const PARALLEL_EPSILON: f32 = 1e-6;

pub fn up() -> Vector3<f32> {
    Vector3::unit_y()
}

/// Rotation that maps `(0, 1, 0)` onto the direction of `normal`.
///
/// A normal pointing straight up gives the identity, one pointing straight
/// down gives a half turn about +X. Everything else rotates about
/// `cross(up, normal)`.
pub fn align_to_normal(normal: Vector3<f32>) -> Result<Matrix4<f32>> {
    let n = transform::normalize(normal)?;
    let cos = transform::dot(up(), n).clamp(-1.0, 1.0);

    if cos >= 1.0 - PARALLEL_EPSILON {
        return Ok(transform::identity());
    }
    if cos <= -1.0 + PARALLEL_EPSILON {
        return transform::axis_rotation(Vector3::unit_x(), PI);
    }

    transform::axis_rotation(transform::cross(up(), n), cos.acos())
}
