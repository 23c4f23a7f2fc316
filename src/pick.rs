//! Ray picking against the terrain mesh.
//!
//! Picking works on the CPU copy of the terrain:
//! 1. Map the cursor from pixels to normalized device coordinates
//! 2. Unproject the near and far plane points through the inverse of
//!    `view_projection * model`, which lands the ray in terrain-local space
//!    (before the planet's spin is applied)
//! 3. Test every triangle with Möller–Trumbore and keep the nearest hit
//!
//! The scan is linear in the triangle count. At the resolutions a slider can
//! reach that is a few tens of thousands of triangles per click.

use cgmath::{InnerSpace, Matrix4, Vector2, Vector3};
use winit::dpi::{PhysicalPosition, PhysicalSize};

use crate::{data_structures::terrain::Terrain, error::Result, transform};

/// Tolerance for the parallel test and for the minimum hit distance.
pub const INTERSECT_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    /// Unit length.
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Result<Self> {
        Ok(Self {
            origin,
            direction: transform::normalize(direction)?,
        })
    }

    pub fn at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Nearest triangle under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Vertex indices of the hit triangle.
    pub indices: [u32; 3],
    /// Distance along the ray.
    pub t: f32,
    /// Barycentric weight of the second vertex.
    pub u: f32,
    /// Barycentric weight of the third vertex.
    pub v: f32,
}

impl RayHit {
    pub fn point(&self, ray: &Ray) -> Vector3<f32> {
        ray.at(self.t)
    }

    /// Vertex normals blended with the hit's barycentric weights.
    pub fn normal(&self, terrain: &Terrain) -> Result<Vector3<f32>> {
        let [i0, i1, i2] = self.indices.map(|i| i as usize);
        let w = 1.0 - self.u - self.v;
        transform::normalize(
            terrain.normal(i0) * w + terrain.normal(i1) * self.u + terrain.normal(i2) * self.v,
        )
    }
}

/// Möller–Trumbore ray/triangle test. Returns `(t, u, v)` on a hit in front
/// of the ray origin.
pub fn intersect_triangle(
    ray: &Ray,
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
) -> Option<(f32, f32, f32)> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let h = ray.direction.cross(e2);
    let a = e1.dot(h);
    if a.abs() < INTERSECT_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(q);
    if t <= INTERSECT_EPSILON {
        return None;
    }
    Some((t, u, v))
}

/// Nearest terrain triangle hit by `ray`, which must already be in
/// terrain-local space.
pub fn pick_triangle(ray: &Ray, terrain: &Terrain) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;
    for tri in 0..terrain.triangle_count() {
        let indices = terrain.triangle(tri);
        let [v0, v1, v2] = indices.map(|i| terrain.position(i as usize));
        let Some((t, u, v)) = intersect_triangle(ray, v0, v1, v2) else {
            continue;
        };
        if nearest.is_none_or(|hit| t < hit.t) {
            nearest = Some(RayHit { indices, t, u, v });
        }
    }
    nearest
}

/// Pixel position to normalized device coordinates (y up). `None` while the
/// window has no area.
pub fn cursor_to_ndc(
    cursor: PhysicalPosition<f64>,
    size: PhysicalSize<u32>,
) -> Option<Vector2<f32>> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let x = (cursor.x / size.width as f64) * 2.0 - 1.0;
    let y = 1.0 - (cursor.y / size.height as f64) * 2.0;
    Some(Vector2::new(x as f32, y as f32))
}

/// Ray through `ndc` expressed in the local space of an object drawn with
/// `view_projection * model`.
pub fn ray_from_ndc(
    ndc: Vector2<f32>,
    view_projection: &Matrix4<f32>,
    model: &Matrix4<f32>,
) -> Result<Ray> {
    let to_local = transform::inverse(&transform::multiply(view_projection, model))?;
    let near = transform::transform_point(&to_local, Vector3::new(ndc.x, ndc.y, -1.0))?;
    let far = transform::transform_point(&to_local, Vector3::new(ndc.x, ndc.y, 1.0))?;
    Ray::new(near, far - near)
}

