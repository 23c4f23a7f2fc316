//! UV-sphere tessellation used as the undisplaced planet surface.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::error::{PlanetError, Result};

/// Immutable unit-sphere topology at one resolution.
///
/// The grid has `resolution + 1` latitude rings (both poles included, each as
/// a degenerate ring) of `resolution` longitudes each. The seam column wraps
/// around instead of being duplicated, so every triangle index stays inside
/// the vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMesh {
    resolution: u32,
    positions: Vec<f32>,
    indices: Vec<u32>,
}

impl BaseMesh {
    pub fn tessellate(resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(PlanetError::InvalidResolution(resolution));
        }
        let res = resolution as usize;
        let rings = res + 1;

        let mut positions = Vec::with_capacity(rings * res * 3);
        for row in 0..rings {
            let theta = (row as f32 / resolution as f32) * PI;
            for col in 0..res {
                let phi = (col as f32 / resolution as f32) * 2.0 * PI;
                positions.push(theta.sin() * phi.cos());
                positions.push(theta.cos());
                positions.push(theta.sin() * phi.sin());
            }
        }

        // Wrap the seam: a ring of `res + 1` vertices would push the last band's
        // indices past the end of the buffer.
        let index = |row: usize, col: usize| (row * res + col % res) as u32;
        let mut indices = Vec::with_capacity(res * res * 6);
        for row in 0..res {
            for col in 0..res {
                let p1 = index(row, col);
                let p1_next = index(row, col + 1);
                let p2 = index(row + 1, col);
                let p2_next = index(row + 1, col + 1);

                indices.extend_from_slice(&[p1, p1_next, p2]);
                indices.extend_from_slice(&[p1_next, p2_next, p2]);
            }
        }

        Ok(Self {
            resolution,
            positions,
            indices,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
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
        Vector3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }
}
