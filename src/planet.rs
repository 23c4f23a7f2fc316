//! The live planet: configuration, generated geometry and placed props.
//!
//! Every rebuild publishes a fresh [`PlanetSnapshot`]. Readers clone the
//! `Arc` and keep a consistent terrain/instance pair for as long as they hold
//! it, no matter what changes afterwards.

use std::sync::Arc;

use cgmath::Matrix4;
use rand::{SeedableRng, rngs::StdRng};
use winit::dpi::{PhysicalPosition, PhysicalSize};

use crate::{
    camera::Camera,
    config::{ConfigChange, PlanetConfig, Rebuild},
    data_structures::{
        instance::{PropCategory, PropInstance},
        sphere::BaseMesh,
        terrain::Terrain,
    },
    error::Result,
    noise::NoiseContext,
    pick::{self, Ray, RayHit},
    scatter::{Scatterer, place_instance},
    transform,
};

#[derive(Debug, Clone)]
pub struct PlanetSnapshot {
    /// Incremented on every publish, including picks.
    pub generation: u64,
    pub terrain: Arc<Terrain>,
    pub instances: Vec<PropInstance>,
}

pub struct Planet {
    config: PlanetConfig,
    noise: NoiseContext,
    rng: StdRng,
    base: Arc<BaseMesh>,
    snapshot: Arc<PlanetSnapshot>,
}

impl Planet {
    pub fn new(config: PlanetConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = NoiseContext::new(&mut rng);

        let start = instant::Instant::now();
        let base = Arc::new(BaseMesh::tessellate(config.resolution)?);
        let terrain = Arc::new(Terrain::generate(
            &base,
            config.noise_mode,
            config.displacement,
            &noise,
            &mut rng,
        )?);
        let instances =
            Scatterer::new(config.attempt_ceiling).scatter_all(&terrain, &config, &mut rng)?;
        log::info!(
            "generated planet: {} vertices, {} triangles, {} props in {:?}",
            terrain.vertex_count(),
            terrain.triangle_count(),
            instances.len(),
            start.elapsed()
        );

        Ok(Self {
            config,
            noise,
            rng,
            base,
            snapshot: Arc::new(PlanetSnapshot {
                generation: 0,
                terrain,
                instances,
            }),
        })
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    pub fn base(&self) -> &BaseMesh {
        &self.base
    }

    pub fn noise(&self) -> &NoiseContext {
        &self.noise
    }

    pub fn snapshot(&self) -> Arc<PlanetSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn terrain(&self) -> &Terrain {
        &self.snapshot.terrain
    }

    pub fn instances(&self) -> &[PropInstance] {
        &self.snapshot.instances
    }

    /// Apply one UI change and rebuild whatever depends on it.
    ///
    /// The change is committed only when the rebuild succeeds. On error the
    /// config, base mesh and published snapshot are all left as they were.
    pub fn apply(&mut self, change: ConfigChange) -> Result<Rebuild> {
        let mut config = self.config.clone();
        change.apply(&mut config);
        let rebuild = change.rebuild();
        let start = instant::Instant::now();

        let base = if rebuild >= Rebuild::Sphere {
            Arc::new(BaseMesh::tessellate(config.resolution)?)
        } else {
            Arc::clone(&self.base)
        };
        let terrain = if rebuild >= Rebuild::Terrain {
            Arc::new(Terrain::generate(
                &base,
                config.noise_mode,
                config.displacement,
                &self.noise,
                &mut self.rng,
            )?)
        } else {
            Arc::clone(&self.snapshot.terrain)
        };
        let instances =
            Scatterer::new(config.attempt_ceiling).scatter_all(&terrain, &config, &mut self.rng)?;

        self.config = config;
        self.base = base;
        self.publish(terrain, instances);
        log::info!(
            "rebuilt {:?} (generation {}, {} props) in {:?}",
            rebuild,
            self.snapshot.generation,
            self.snapshot.instances.len(),
            start.elapsed()
        );
        Ok(rebuild)
    }

    fn publish(&mut self, terrain: Arc<Terrain>, instances: Vec<PropInstance>) {
        self.snapshot = Arc::new(PlanetSnapshot {
            generation: self.snapshot.generation + 1,
            terrain,
            instances,
        });
    }

    /// Planet spin after `seconds`, one radian per second about +Y.
    pub fn model_matrix(seconds: f32) -> Matrix4<f32> {
        transform::y_rotation(seconds)
    }

    /// Nearest terrain triangle along a terrain-local ray.
    pub fn pick(&self, ray: &Ray) -> Option<RayHit> {
        pick::pick_triangle(ray, &self.snapshot.terrain)
    }

    /// Place a `category` prop where `ray` meets the terrain. Sea level does
    /// not apply to hand-placed props. `Ok(None)` when the ray misses.
    pub fn place_along_ray(
        &mut self,
        category: PropCategory,
        ray: &Ray,
    ) -> Result<Option<PropInstance>> {
        let Some(hit) = self.pick(ray) else {
            log::debug!("pick missed the planet");
            return Ok(None);
        };
        let terrain = Arc::clone(&self.snapshot.terrain);
        let instance = place_instance(category, hit.point(ray), hit.normal(&terrain)?)?;
        log::debug!(
            "placed {} on triangle {:?} at t = {}",
            category.id(),
            hit.indices,
            hit.t
        );

        let mut instances = self.snapshot.instances.clone();
        instances.push(instance);
        self.publish(terrain, instances);
        Ok(Some(instance))
    }

    /// Place a prop under the mouse cursor, given the camera and how long the
    /// planet has been spinning.
    pub fn place_at_cursor(
        &mut self,
        category: PropCategory,
        cursor: PhysicalPosition<f64>,
        window: PhysicalSize<u32>,
        camera: &Camera,
        seconds: f32,
    ) -> Result<Option<PropInstance>> {
        let Some(ndc) = pick::cursor_to_ndc(cursor, window) else {
            return Ok(None);
        };
        let aspect = window.width as f32 / window.height as f32;
        let ray = pick::ray_from_ndc(
            ndc,
            &camera.view_projection(aspect)?,
            &Self::model_matrix(seconds),
        )?;
        self.place_along_ray(category, &ray)
    }
}
