//! Integration tests for whole-frame projection
//!
//! These check the per-point guarantees of the transform across entire
//! clouds, through both the sequential and the parallel evaluation paths.

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use spreadcloud_algorithms::*;
use spreadcloud_core::{Camera, EmbeddingPoint, FrameParams, PointSize, SpreadConfig};

/// Random embedding with coordinates in [-extent, extent]
fn random_cloud(seed: u64, count: usize, extent: f32) -> Vec<EmbeddingPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            EmbeddingPoint::new(
                [
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                ],
                [rng.gen(), rng.gen(), rng.gen()],
            )
        })
        .collect()
}

fn perspective_camera() -> Camera {
    let view = Matrix4::look_at_rh(
        &Point3::new(20.0, 15.0, 30.0),
        &Point3::origin(),
        &Vector3::y(),
    );
    let projection = Matrix4::new_perspective(4.0 / 3.0, 60f32.to_radians(), 0.01, 2000.0);
    Camera::new(view, projection)
}

#[test]
fn test_parallel_matches_sequential() {
    let points = random_cloud(7, 20_000, 10.0);
    let frame = FrameParams::new(perspective_camera(), SpreadConfig::new(1.5, 0.3), PointSize(2.0));

    let sequential = project_cloud_sequential(&points, &frame);
    let parallel = project_cloud_parallel(&points, &frame);
    let dispatched = project_cloud(&points, &frame);

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, dispatched);
}

#[test]
fn test_permutation_independence() {
    let points = random_cloud(11, 5_000, 5.0);
    let frame = FrameParams::new(perspective_camera(), SpreadConfig::new(-2.0, 0.75), PointSize(4.0));

    let mut order: Vec<usize> = (0..points.len()).collect();
    let mut rng = StdRng::seed_from_u64(3);
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    let shuffled: Vec<EmbeddingPoint> = order.iter().map(|&i| points[i]).collect();

    let original = project_cloud_parallel(&points, &frame);
    let permuted = project_cloud_parallel(&shuffled, &frame);

    for (k, &i) in order.iter().enumerate() {
        assert_eq!(permuted[k], original[i]);
    }
}

#[test]
fn test_identity_spread_matches_plain_projection() {
    let points = random_cloud(21, 1_000, 8.0);
    let camera = perspective_camera();
    let frame = FrameParams::new(camera, SpreadConfig::new(3.0, 1.0), PointSize(1.0));
    let view_projection = camera.view_projection();

    for (point, projected) in points.iter().zip(project_cloud(&points, &frame)) {
        let expected = view_projection * point.position.to_homogeneous();
        assert_relative_eq!(projected.clip, expected, epsilon = 1e-3, max_relative = 1e-4);
    }
}

#[test]
fn test_collapse_flattens_every_point() {
    let points = random_cloud(5, 1_000, 50.0);
    let frame = FrameParams::new(Camera::default(), SpreadConfig::flattened(2.5), PointSize(2.0));

    for (point, projected) in points.iter().zip(project_cloud(&points, &frame)) {
        assert_eq!(projected.clip.x, point.position.x);
        assert_eq!(projected.clip.y, point.position.y);
        assert_eq!(projected.clip.z, 2.5);
        assert_eq!(projected.clip.w, 1.0);
    }
}

#[test]
fn test_uniform_size_and_opaque_color() {
    let points = random_cloud(9, 2_000, 1.0);
    let frame = FrameParams::new(perspective_camera(), SpreadConfig::new(0.0, 2.0), PointSize(6.5));

    for (point, projected) in points.iter().zip(project_cloud_parallel(&points, &frame)) {
        assert_eq!(projected.size, 6.5);
        assert_eq!(
            projected.color,
            [point.color[0], point.color[1], point.color[2], 1.0]
        );
    }
}

#[test]
fn test_grid_projects_with_cloud() {
    let mut batch = FrameBatch::from_lines(default_grid());
    batch.append(&FrameBatch::from_points(random_cloud(1, 100, 3.0)));

    let frame = FrameParams::new(Camera::default(), SpreadConfig::flattened(0.0), PointSize(2.0));
    let lines = project_cloud(&batch.lines, &frame);

    assert_eq!(lines.len(), batch.lines.len());
    assert!(lines.iter().all(|p| p.clip == Vector4::new(p.clip.x, p.clip.y, 0.0, 1.0)));
}
