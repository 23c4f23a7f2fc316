use std::f32::consts::FRAC_PI_2;

use planet_ngin::{
    InnerSpace, Matrix4, PhysicalPosition, PhysicalSize, SquareMatrix, Vector2, Vector3,
    camera::Camera,
    noise::NoiseMode,
    pick::{Ray, cursor_to_ndc, intersect_triangle, pick_triangle, ray_from_ndc},
    transform,
};

use crate::common::test_utils::{assert_vec_near, fixture};

mod common;

fn unit_triangle() -> [Vector3<f32>; 3] {
    [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ]
}

#[test]
fn ray_at_the_centroid_hits_in_front() {
    let [v0, v1, v2] = unit_triangle();
    let centroid = (v0 + v1 + v2) / 3.0;
    let ray = Ray::new(centroid + Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -2.0)).unwrap();

    let (t, u, v) = intersect_triangle(&ray, v0, v1, v2).unwrap();
    assert!((t - 5.0).abs() < 1e-5);
    assert!((u - 1.0 / 3.0).abs() < 1e-5);
    assert!((v - 1.0 / 3.0).abs() < 1e-5);
    assert_vec_near(ray.at(t), centroid, 1e-5);
}

#[test]
fn ray_pointing_away_misses() {
    let [v0, v1, v2] = unit_triangle();
    let ray = Ray::new(Vector3::new(0.2, 0.2, 5.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
    assert_eq!(intersect_triangle(&ray, v0, v1, v2), None);
}

#[test]
fn parallel_and_outside_rays_miss() {
    let [v0, v1, v2] = unit_triangle();
    let parallel = Ray::new(Vector3::new(-1.0, 0.2, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(intersect_triangle(&parallel, v0, v1, v2), None);

    let outside = Ray::new(Vector3::new(0.8, 0.8, 1.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
    assert_eq!(intersect_triangle(&outside, v0, v1, v2), None);

    let beside = Ray::new(Vector3::new(-0.1, 0.5, 1.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
    assert_eq!(intersect_triangle(&beside, v0, v1, v2), None);
}

#[test]
fn nearest_of_the_two_crossed_faces_wins() {
    let f = fixture(32, NoiseMode::Uncorrelated, 0.0, 1);
    let ray = Ray::new(Vector3::new(0.05, 0.07, 4.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();

    let hit = pick_triangle(&ray, &f.terrain).unwrap();
    // the front face is about 3 units away, the back face about 5
    assert!(hit.t > 2.9 && hit.t < 3.05, "t = {}", hit.t);
    let point = hit.point(&ray);
    assert!(point.z > 0.0);
    assert!((point.magnitude() - 1.0).abs() < 0.01);

    let normal = hit.normal(&f.terrain).unwrap();
    assert!(normal.dot(point.normalize()) > 0.99);
    for index in hit.indices {
        assert!((index as usize) < f.terrain.vertex_count());
    }
}

#[test]
fn ray_past_the_planet_is_no_hit() {
    let f = fixture(16, NoiseMode::Coherent, 0.45, 1);
    let ray = Ray::new(Vector3::new(0.0, 3.0, 4.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
    assert_eq!(pick_triangle(&ray, &f.terrain), None);
}

#[test]
fn cursor_maps_to_normalized_device_coordinates() {
    let size = PhysicalSize::new(800, 600);
    let centre = cursor_to_ndc(PhysicalPosition::new(400.0, 300.0), size).unwrap();
    assert_eq!(centre, Vector2::new(0.0, 0.0));

    let top_left = cursor_to_ndc(PhysicalPosition::new(0.0, 0.0), size).unwrap();
    assert_eq!(top_left, Vector2::new(-1.0, 1.0));

    let bottom_right = cursor_to_ndc(PhysicalPosition::new(800.0, 600.0), size).unwrap();
    assert_eq!(bottom_right, Vector2::new(1.0, -1.0));

    assert_eq!(cursor_to_ndc(PhysicalPosition::new(1.0, 1.0), PhysicalSize::new(0, 600)), None);
}

#[test]
fn centre_ray_starts_on_the_near_plane() {
    let camera = Camera::default();
    let view_projection = camera.view_projection(4.0 / 3.0).unwrap();
    let ray = ray_from_ndc(Vector2::new(0.0, 0.0), &view_projection, &Matrix4::identity()).unwrap();

    assert_vec_near(ray.origin, Vector3::new(0.0, 0.0, 3.9), 1e-4);
    assert_vec_near(ray.direction, Vector3::new(0.0, 0.0, -1.0), 1e-5);
}

#[test]
fn ray_is_expressed_before_the_planet_spin() {
    let camera = Camera::default();
    let view_projection = camera.view_projection(1.0).unwrap();
    let spin = transform::y_rotation(FRAC_PI_2);
    let ray = ray_from_ndc(Vector2::new(0.0, 0.0), &view_projection, &spin).unwrap();

    assert_vec_near(ray.origin, Vector3::new(-3.9, 0.0, 0.0), 1e-4);
    assert_vec_near(ray.direction, Vector3::new(1.0, 0.0, 0.0), 1e-5);
}
