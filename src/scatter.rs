//! Rejection-sampled placement of props on the terrain surface.
//!
//! Every prop picks a random terrain vertex and keeps it only if the vertex
//! lies above sea level. A category whose draws keep landing in water gives up
//! after `attempt_ceiling` tries and places nothing further; other categories
//! are unaffected.

use cgmath::Vector3;
use rand::Rng;

use crate::{
    config::{DEFAULT_ATTEMPT_CEILING, PlanetConfig},
    data_structures::{
        instance::{PropCategory, PropInstance},
        terrain::Terrain,
    },
    error::{PlanetError, Result},
    orientation::align_to_normal,
    transform,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scatterer {
    pub attempt_ceiling: u32,
}

impl Default for Scatterer {
    fn default() -> Self {
        Self {
            attempt_ceiling: DEFAULT_ATTEMPT_CEILING,
        }
    }
}

/// Model transform for a prop of `category` standing on `position` with
/// surface `normal`: `translation * orientation * scaling`.
pub fn place_instance(
    category: PropCategory,
    position: Vector3<f32>,
    normal: Vector3<f32>,
) -> Result<PropInstance> {
    let params = category.params();
    let normal = transform::normalize(normal)?;
    let origin = position + normal * params.offset;

    let translation = transform::translation(origin.x, origin.y, origin.z);
    let orientation = align_to_normal(normal)?;
    let scaling = transform::scaling(params.scale, params.scale, params.scale);

    let model = transform::multiply(&transform::multiply(&translation, &orientation), &scaling);
    Ok(PropInstance::new(category, model))
}

impl Scatterer {
    pub fn new(attempt_ceiling: u32) -> Self {
        Self { attempt_ceiling }
    }

    /// Draw a vertex acceptable for `category`, or `None` once the ceiling is hit.
    fn draw_vertex<R: Rng + ?Sized>(
        &self,
        terrain: &Terrain,
        category: PropCategory,
        sea_level: f32,
        rng: &mut R,
    ) -> Option<usize> {
        let vertex_count = terrain.vertex_count();
        if vertex_count == 0 {
            return None;
        }
        if category.params().sea_level_exempt {
            return Some(rng.gen_range(0..vertex_count));
        }
        (0..self.attempt_ceiling)
            .map(|_| rng.gen_range(0..vertex_count))
            .find(|&i| terrain.height(i) > sea_level)
    }

    /// Append up to `count` instances of `category` to `out`.
    ///
    /// Returns how many were placed. If one prop exhausts the attempt ceiling
    /// the category is abandoned: the instances placed so far stay in `out`
    /// and `ScatterExhausted` is returned.
    pub fn scatter_category<R: Rng + ?Sized>(
        &self,
        terrain: &Terrain,
        category: PropCategory,
        count: usize,
        sea_level: f32,
        rng: &mut R,
        out: &mut Vec<PropInstance>,
    ) -> Result<usize> {
        for placed in 0..count {
            let Some(vertex) = self.draw_vertex(terrain, category, sea_level, rng) else {
                return Err(PlanetError::ScatterExhausted {
                    category,
                    placed,
                    requested: count,
                    attempts: self.attempt_ceiling,
                });
            };
            let instance = place_instance(category, terrain.position(vertex), terrain.normal(vertex))?;
            out.push(instance);
        }
        Ok(count)
    }

    /// Rebuild the full instance list for every category in `config`.
    pub fn scatter_all<R: Rng + ?Sized>(
        &self,
        terrain: &Terrain,
        config: &PlanetConfig,
        rng: &mut R,
    ) -> Result<Vec<PropInstance>> {
        let requested: usize = PropCategory::ALL.iter().map(|c| config.prop_count(*c)).sum();
        let mut instances = Vec::with_capacity(requested);

        for category in PropCategory::ALL {
            let count = config.prop_count(category);
            match self.scatter_category(terrain, category, count, config.sea_level, rng, &mut instances) {
                Ok(_) => (),
                Err(e @ PlanetError::ScatterExhausted { .. }) => log::warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(instances)
    }
}
