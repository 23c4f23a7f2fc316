//! Builds a planet without a window, rescatters it at a higher sea level and
//! drops a tree where the screen centre meets the surface.
//!
//! Run with `RUST_LOG=info` to see the rebuild timings.

use planet_ngin::{
    PhysicalPosition, PhysicalSize,
    camera::Camera,
    config::{ConfigChange, PlanetConfig},
    data_structures::instance::PropCategory,
    planet::Planet,
    render,
};

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let resolution = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u32>())
        .transpose()?
        .unwrap_or(120);

    let mut planet = Planet::new(PlanetConfig {
        resolution,
        seed: Some(7),
        ..Default::default()
    })?;
    let (low, high) = planet.terrain().height_range().unwrap_or((0.0, 0.0));
    println!("heights between {low:.3} and {high:.3}");

    planet.apply(ConfigChange::SeaLevel(0.1))?;
    for (category, raw) in render::instances_by_category(planet.instances()) {
        println!("{:>6}: {} instances", category.id(), raw.len());
    }

    let window = PhysicalSize::new(800, 600);
    let centre = PhysicalPosition::new(400.0, 300.0);
    match planet.place_at_cursor(PropCategory::Tree, centre, window, &Camera::default(), 0.0)? {
        Some(tree) => println!("placed a tree at {:?}", tree.origin()),
        None => println!("the centre ray missed the planet"),
    }

    let snapshot = planet.snapshot();
    println!(
        "generation {}: {} vertices, {} props",
        snapshot.generation,
        snapshot.terrain.vertex_count(),
        snapshot.instances.len()
    );
    Ok(())
}
