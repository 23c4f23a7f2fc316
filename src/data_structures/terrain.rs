//! Height-field terrain: the base sphere pushed in and out along its radii.

use cgmath::{InnerSpace, Vector3};
use rand::Rng;

use crate::{
    data_structures::sphere::BaseMesh,
    error::Result,
    noise::{NoiseContext, NoiseMode},
    transform,
};

/// Noise is sampled at `NOISE_FREQUENCY * position`.
pub const NOISE_FREQUENCY: f32 = 2.0;

/// Displaced planet surface with flat buffers ready for upload.
///
/// `positions` and `normals` hold three floats per vertex. Normals are the
/// radial direction of the *undisplaced* vertex; displacement never tilts them.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
}

impl Terrain {
    pub fn generate<R: Rng + ?Sized>(
        base: &BaseMesh,
        mode: NoiseMode,
        displacement: f32,
        noise: &NoiseContext,
        rng: &mut R,
    ) -> Result<Self> {
        let mut positions = Vec::with_capacity(base.positions().len());
        let mut normals = Vec::with_capacity(base.positions().len());

        for i in 0..base.vertex_count() {
            let p = base.position(i);
            let direction = transform::normalize(p)?;
            let sample = p * NOISE_FREQUENCY;
            let value = noise.sample(mode, sample.x, sample.y, sample.z, rng);

            // p is unit length, so this is direction * (1 + value * displacement)
            // while leaving p untouched when there is nothing to add.
            let displaced = p + direction * (value * displacement);

            positions.extend_from_slice(&[displaced.x, displaced.y, displaced.z]);
            normals.extend_from_slice(&[direction.x, direction.y, direction.z]);
        }

        Ok(Self {
            positions,
            normals,
            indices: base.indices().to_vec(),
        })
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, i: usize) -> Vector3<f32> {
        vec3_at(&self.positions, i)
    }

    pub fn normal(&self, i: usize) -> Vector3<f32> {
        vec3_at(&self.normals, i)
    }

    /// Radial height above the unit sphere.
    pub fn height(&self, i: usize) -> f32 {
        self.position(i).magnitude() - 1.0
    }

    /// Lowest and highest vertex height, `None` for an empty terrain.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        (0..self.vertex_count())
            .map(|i| self.height(i))
            .fold(None, |range, h| match range {
                None => Some((h, h)),
                Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
            })
    }

    /// Vertex indices of triangle `tri`.
    pub fn triangle(&self, tri: usize) -> [u32; 3] {
        [
            self.indices[tri * 3],
            self.indices[tri * 3 + 1],
            self.indices[tri * 3 + 2],
        ]
    }
}

fn vec3_at(buffer: &[f32], i: usize) -> Vector3<f32> {
    Vector3::new(buffer[i * 3], buffer[i * 3 + 1], buffer[i * 3 + 2])
}
