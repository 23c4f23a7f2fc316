//! Small 4x4 transform algebra shared by terrain generation, scattering and picking.
//!
//! Matrices are `cgmath::Matrix4<f32>` and therefore column-major, which is
//! the same memory layout a vertex shader expects for `mat4x4<f32>`. Model
//! transforms are always composed as `translation * rotation * scaling`, so a
//! model-local point is scaled first, then rotated, then translated.

use cgmath::{InnerSpace, Matrix, Matrix4, Rad, SquareMatrix, Vector3, Vector4};

use crate::error::{PlanetError, Result};

/// Shorter vectors have no usable direction.
pub const NORMALIZE_EPSILON: f32 = 1e-5;
/// Determinants below this magnitude are treated as singular.
pub const DETERMINANT_EPSILON: f64 = 1e-12;

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
    a * b
}

pub fn transpose(m: &Matrix4<f32>) -> Matrix4<f32> {
    m.transpose()
}

/// Invert `m`, refusing matrices whose determinant is (numerically) zero.
///
/// Computed in `f64` so small uniform scales (a cloud at 0.001) stay
/// invertible; cgmath's `f32` invert stops at `f32::EPSILON`.
pub fn inverse(m: &Matrix4<f32>) -> Result<Matrix4<f32>> {
    let cols: [[f32; 4]; 4] = (*m).into();
    let wide = Matrix4::<f64>::from(cols.map(|c| c.map(f64::from)));

    let determinant = wide.determinant();
    let invalid = PlanetError::InvalidTransform {
        determinant: determinant as f32,
    };
    if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
        return Err(invalid);
    }
    let inv: [[f64; 4]; 4] = wide.invert().ok_or(invalid)?.into();
    Ok(Matrix4::from(inv.map(|c| c.map(|x| x as f32))))
}

pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(tx, ty, tz))
}

pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(sx, sy, sz)
}

/// Rotation of `angle` radians around `axis` (Rodrigues). The axis does not
/// have to be unit length but must not be zero.
pub fn axis_rotation(axis: Vector3<f32>, angle: f32) -> Result<Matrix4<f32>> {
    let axis = normalize(axis)?;
    Ok(Matrix4::from_axis_angle(axis, Rad(angle)))
}

pub fn y_rotation(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(angle))
}

/// Camera placement matrix: maps camera space into world space with the
/// camera at `eye` looking down its -Z axis towards `target`.
///
/// This is *not* a view matrix; the view matrix is `inverse(look_at(..))`.
pub fn look_at(
    eye: Vector3<f32>,
    target: Vector3<f32>,
    up: Vector3<f32>,
) -> Result<Matrix4<f32>> {
    let z_axis = normalize(eye - target)?;
    let x_axis = normalize(cross(up, z_axis))?;
    let y_axis = normalize(cross(z_axis, x_axis))?;

    Ok(Matrix4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        eye.extend(1.0),
    ))
}

/// Right-handed perspective projection with OpenGL clip depth ([-1, 1]).
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    cgmath::perspective(Rad(fovy), aspect, near, far)
}

pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    cgmath::ortho(left, right, bottom, top, near, far)
}

pub fn normalize(v: Vector3<f32>) -> Result<Vector3<f32>> {
    let length = v.magnitude();
    if length.is_nan() || length < NORMALIZE_EPSILON {
        return Err(PlanetError::DegenerateVector { length });
    }
    Ok(v / length)
}

pub fn cross(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn dot(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    a.dot(b)
}

/// Multiply a point by `m` and apply the perspective divide.
pub fn transform_point(m: &Matrix4<f32>, p: Vector3<f32>) -> Result<Vector3<f32>> {
    let clip: Vector4<f32> = m * p.extend(1.0);
    if clip.w.abs() < f32::EPSILON {
        return Err(PlanetError::InvalidTransform { determinant: clip.w });
    }
    Ok(clip.truncate() / clip.w)
}
