use planet_ngin::{
    InnerSpace, PlanetError, Vector3, Vector4,
    config::PlanetConfig,
    data_structures::instance::PropCategory,
    noise::NoiseMode,
    scatter::{Scatterer, place_instance},
    transform,
};

use crate::common::test_utils::{
    assert_matrix_near, assert_vec_near, fixture, init_logger, seeded_rng,
};

use rand::Rng;

mod common;

#[test]
fn low_sea_level_places_every_requested_prop() {
    let f = fixture(20, NoiseMode::Coherent, 0.45, 4);
    let scatterer = Scatterer::new(1);
    let mut rng = seeded_rng(4);

    for category in [PropCategory::Tree, PropCategory::Rock, PropCategory::Grass] {
        let mut out = Vec::new();
        let placed = scatterer
            .scatter_category(&f.terrain, category, 25, -1.0, &mut rng, &mut out)
            .unwrap();
        assert_eq!(placed, 25);
        assert_eq!(out.len(), 25);
        assert!(out.iter().all(|i| i.category == category));
    }
}

#[test]
fn high_sea_level_exhausts_and_places_nothing() {
    let f = fixture(20, NoiseMode::Coherent, 0.45, 4);
    let scatterer = Scatterer::new(1_000);
    let mut out = Vec::new();

    let result = scatterer.scatter_category(
        &f.terrain,
        PropCategory::Tree,
        5,
        1.0,
        &mut seeded_rng(1),
        &mut out,
    );
    assert_eq!(
        result,
        Err(PlanetError::ScatterExhausted {
            category: PropCategory::Tree,
            placed: 0,
            requested: 5,
            attempts: 1_000,
        })
    );
    assert!(out.is_empty());
}

#[test]
fn exhaustion_abandons_the_rest_of_the_category() {
    let sea_level = 0.0;
    let requested = 20;
    let f = fixture(24, NoiseMode::Coherent, 0.45, 9);
    let vertex_count = f.terrain.vertex_count();
    let scatterer = Scatterer::new(1);

    // With one draw per prop a partly flooded planet places a few props and
    // then hits water; find a seed where that happens well before the end.
    let (seed, placed, out) = (0..64u64)
        .find_map(|seed| {
            let mut out = Vec::new();
            match scatterer.scatter_category(
                &f.terrain,
                PropCategory::Tree,
                requested,
                sea_level,
                &mut seeded_rng(seed),
                &mut out,
            ) {
                Err(PlanetError::ScatterExhausted { placed, .. })
                    if placed > 0 && placed + 1 < requested =>
                {
                    Some((seed, placed, out))
                }
                _ => None,
            }
        })
        .expect("some seed should exhaust part way through");

    assert!(placed > 0);
    assert_eq!(out.len(), placed);

    // Replay the draws: `placed` dry vertices, one wet one, then nothing.
    let mut replay = seeded_rng(seed);
    for _ in 0..placed {
        assert!(f.terrain.height(replay.gen_range(0..vertex_count)) > sea_level);
    }
    assert!(f.terrain.height(replay.gen_range(0..vertex_count)) <= sea_level);

    let mut rng = seeded_rng(seed);
    let mut again = Vec::new();
    let _ = scatterer.scatter_category(
        &f.terrain,
        PropCategory::Tree,
        requested,
        sea_level,
        &mut rng,
        &mut again,
    );
    assert_eq!(again, out);
    assert_eq!(rng.r#gen::<u64>(), replay.r#gen::<u64>());
}

#[test]
fn floating_props_ignore_the_sea_level() {
    let f = fixture(12, NoiseMode::Uncorrelated, 0.3, 6);
    let mut out = Vec::new();
    let placed = Scatterer::new(0)
        .scatter_category(&f.terrain, PropCategory::Cloud, 7, 1.0, &mut seeded_rng(2), &mut out)
        .unwrap();
    assert_eq!(placed, 7);
    assert_eq!(out.len(), 7);
}

#[test]
fn zero_ceiling_stops_grounded_props_immediately() {
    let f = fixture(12, NoiseMode::Uncorrelated, 0.3, 6);
    let mut out = Vec::new();
    let result = Scatterer::new(0).scatter_category(
        &f.terrain,
        PropCategory::Rock,
        3,
        -1.0,
        &mut seeded_rng(2),
        &mut out,
    );
    assert!(matches!(
        result,
        Err(PlanetError::ScatterExhausted { placed: 0, requested: 3, .. })
    ));
}

#[test]
fn zero_count_places_nothing() {
    let f = fixture(6, NoiseMode::Coherent, 0.45, 1);
    let mut out = Vec::new();
    let placed = Scatterer::default()
        .scatter_category(&f.terrain, PropCategory::Tree, 0, 1.0, &mut seeded_rng(1), &mut out)
        .unwrap();
    assert_eq!(placed, 0);
    assert!(out.is_empty());
}

#[test]
fn scattered_props_stand_on_dry_vertices() {
    let sea_level = 0.0;
    let f = fixture(32, NoiseMode::Coherent, 0.45, 12);
    let mut out = Vec::new();
    Scatterer::default()
        .scatter_category(&f.terrain, PropCategory::Tree, 30, sea_level, &mut seeded_rng(3), &mut out)
        .unwrap();

    let offset = PropCategory::Tree.params().offset;
    for instance in &out {
        let origin = instance.origin();
        let ground_height = origin.magnitude() - offset - 1.0;
        assert!(ground_height > sea_level - 1e-5, "{ground_height}");
    }
}

#[test]
fn exhausted_category_does_not_stop_the_others() {
    init_logger();
    let f = fixture(16, NoiseMode::Coherent, 0.45, 2);
    let mut config = PlanetConfig {
        sea_level: 1.0,
        attempt_ceiling: 200,
        ..Default::default()
    };
    config.prop_counts.insert(PropCategory::Cloud, 4);

    let instances = Scatterer::new(config.attempt_ceiling)
        .scatter_all(&f.terrain, &config, &mut seeded_rng(8))
        .unwrap();
    assert_eq!(instances.len(), 4);
    assert!(instances.iter().all(|i| i.category == PropCategory::Cloud));
}

#[test]
fn scatter_all_keeps_category_order() {
    let f = fixture(16, NoiseMode::Coherent, 0.45, 2);
    let config = PlanetConfig {
        sea_level: -1.0,
        ..Default::default()
    };
    let instances = Scatterer::default()
        .scatter_all(&f.terrain, &config, &mut seeded_rng(8))
        .unwrap();

    let categories: Vec<PropCategory> = instances.iter().map(|i| i.category).collect();
    let mut expected = Vec::new();
    for category in PropCategory::ALL {
        expected.extend(std::iter::repeat_n(category, config.prop_count(category)));
    }
    assert_eq!(categories, expected);
}

#[test]
fn model_is_translation_times_orientation_times_scale() {
    let up = place_instance(
        PropCategory::Tree,
        Vector3::new(0.0, 1.2, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    )
    .unwrap();
    let expected = transform::multiply(
        &transform::translation(0.0, 1.21, 0.0),
        &transform::scaling(0.07, 0.07, 0.07),
    );
    assert_matrix_near(&up.model, &expected, 1e-6);

    let sideways = place_instance(
        PropCategory::Grass,
        Vector3::new(1.1, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
    )
    .unwrap();
    assert_vec_near(sideways.origin(), Vector3::new(1.075, 0.0, 0.0), 1e-6);
    let model_up = (sideways.model * Vector4::new(0.0, 1.0, 0.0, 0.0)).truncate();
    assert_vec_near(model_up, Vector3::new(0.2, 0.0, 0.0), 1e-6);
}
