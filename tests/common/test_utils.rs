#![allow(dead_code)]

use planet_ngin::{
    Matrix4, Vector3,
    data_structures::{sphere::BaseMesh, terrain::Terrain},
    noise::{NoiseContext, NoiseMode},
};
use rand::{SeedableRng, rngs::StdRng};

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(crate) fn assert_vec_near(actual: Vector3<f32>, expected: Vector3<f32>, eps: f32) {
    let a: [f32; 3] = actual.into();
    let e: [f32; 3] = expected.into();
    for i in 0..3 {
        assert!(
            (a[i] - e[i]).abs() <= eps,
            "component {i}: {a:?} vs {e:?} (eps {eps})"
        );
    }
}

pub(crate) fn assert_matrix_near(actual: &Matrix4<f32>, expected: &Matrix4<f32>, eps: f32) {
    let a: [[f32; 4]; 4] = (*actual).into();
    let e: [[f32; 4]; 4] = (*expected).into();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (a[col][row] - e[col][row]).abs() <= eps,
                "[{col}][{row}]: {a:?} vs {e:?} (eps {eps})"
            );
        }
    }
}

/// Base sphere plus terrain generated with a seeded noise table.
pub(crate) struct Fixture {
    pub base: BaseMesh,
    pub noise: NoiseContext,
    pub terrain: Terrain,
}

pub(crate) fn fixture(resolution: u32, mode: NoiseMode, displacement: f32, seed: u64) -> Fixture {
    let base = BaseMesh::tessellate(resolution).expect("valid resolution");
    let noise = NoiseContext::from_seed(seed);
    let mut rng = seeded_rng(seed);
    let terrain =
        Terrain::generate(&base, mode, displacement, &noise, &mut rng).expect("terrain generates");
    Fixture {
        base,
        noise,
        terrain,
    }
}
