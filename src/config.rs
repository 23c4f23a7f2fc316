//! Planet generation parameters and the slider events that change them.

use std::collections::BTreeMap;

use crate::{data_structures::instance::PropCategory, noise::NoiseMode};

/// Upper bound on rejection-sampling draws for a single prop.
pub const DEFAULT_ATTEMPT_CEILING: u32 = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    /// Stacks and slices of the base sphere.
    pub resolution: u32,
    pub noise_mode: NoiseMode,
    /// Multiplier on raw noise samples. Negative values invert the relief.
    pub displacement: f32,
    /// Radial height below which the surface counts as water.
    pub sea_level: f32,
    /// Requested instance count per category.
    pub prop_counts: BTreeMap<PropCategory, usize>,
    pub attempt_ceiling: u32,
    /// Fixed seed for the noise table and all random draws. `None` seeds
    /// from the OS.
    pub seed: Option<u64>,
}

impl PlanetConfig {
    pub fn prop_count(&self, category: PropCategory) -> usize {
        self.prop_counts.get(&category).copied().unwrap_or(0)
    }

    /// Displacement and sea level sliders report hundredths.
    pub fn from_slider_percent(
        resolution: u32,
        noise_mode: NoiseMode,
        displacement_percent: f32,
        sea_level_percent: f32,
    ) -> Self {
        Self {
            resolution,
            noise_mode,
            displacement: displacement_percent / 100.0,
            sea_level: sea_level_percent / 100.0,
            ..Default::default()
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            resolution: 250,
            noise_mode: NoiseMode::Coherent,
            displacement: 0.45,
            sea_level: 0.0,
            prop_counts: BTreeMap::from([
                (PropCategory::Tree, 10),
                (PropCategory::Rock, 10),
                (PropCategory::Grass, 10),
                (PropCategory::Cloud, 5),
            ]),
            attempt_ceiling: DEFAULT_ATTEMPT_CEILING,
            seed: None,
        }
    }
}

/// One UI control changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigChange {
    Resolution(u32),
    NoiseMode(NoiseMode),
    Displacement(f32),
    SeaLevel(f32),
    PropCount(PropCategory, usize),
}

/// How much has to be rebuilt after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rebuild {
    /// Only the scattered props.
    Scatter,
    /// Terrain heights and props; the base sphere is kept.
    Terrain,
    /// Everything including the base sphere.
    Sphere,
}

impl ConfigChange {
    pub fn rebuild(&self) -> Rebuild {
        match self {
            ConfigChange::Resolution(_) => Rebuild::Sphere,
            ConfigChange::NoiseMode(_) | ConfigChange::Displacement(_) => Rebuild::Terrain,
            ConfigChange::SeaLevel(_) | ConfigChange::PropCount(..) => Rebuild::Scatter,
        }
    }

    pub fn apply(&self, config: &mut PlanetConfig) {
        match *self {
            ConfigChange::Resolution(resolution) => config.resolution = resolution,
            ConfigChange::NoiseMode(mode) => config.noise_mode = mode,
            ConfigChange::Displacement(displacement) => config.displacement = displacement,
            ConfigChange::SeaLevel(sea_level) => config.sea_level = sea_level,
            ConfigChange::PropCount(category, count) => {
                config.prop_counts.insert(category, count);
            }
        }
    }
}
