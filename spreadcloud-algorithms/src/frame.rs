//! Whole-frame evaluation of the spread-projection transform
//!
//! Every point is projected independently against one shared
//! [`FrameParams`] snapshot, so the work splits across threads with no
//! synchronisation beyond the final collect. Output index `i` always
//! belongs to input index `i`, whichever path runs.

use crate::parallel::{execute_parallel, should_parallelize};
use rayon::prelude::*;
use spreadcloud_core::{project_point, EmbeddingPoint, FrameParams, ProjectedPoint};

/// Project every point of a frame
pub fn project_cloud(points: &[EmbeddingPoint], frame: &FrameParams) -> Vec<ProjectedPoint> {
    let mut out = Vec::with_capacity(points.len());
    project_cloud_into(points, frame, &mut out);
    out
}

/// Project every point of a frame into an existing buffer.
///
/// `out` is cleared first; its allocation is reused across frames.
pub fn project_cloud_into(
    points: &[EmbeddingPoint],
    frame: &FrameParams,
    out: &mut Vec<ProjectedPoint>,
) {
    if should_parallelize(points.len()) {
        execute_parallel(|| project_cloud_parallel_into(points, frame, out));
    } else {
        project_cloud_sequential_into(points, frame, out);
    }
}

/// Project on the calling thread
pub fn project_cloud_sequential(points: &[EmbeddingPoint], frame: &FrameParams) -> Vec<ProjectedPoint> {
    points.iter().map(|point| project_point(point, frame)).collect()
}

/// Project with rayon regardless of cloud size
pub fn project_cloud_parallel(points: &[EmbeddingPoint], frame: &FrameParams) -> Vec<ProjectedPoint> {
    let mut out = Vec::new();
    project_cloud_parallel_into(points, frame, &mut out);
    out
}

fn project_cloud_sequential_into(
    points: &[EmbeddingPoint],
    frame: &FrameParams,
    out: &mut Vec<ProjectedPoint>,
) {
    out.clear();
    out.extend(points.iter().map(|point| project_point(point, frame)));
}

fn project_cloud_parallel_into(
    points: &[EmbeddingPoint],
    frame: &FrameParams,
    out: &mut Vec<ProjectedPoint>,
) {
    points
        .par_iter()
        .map(|point| project_point(point, frame))
        .collect_into_vec(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use spreadcloud_core::{Camera, PointSize, SpreadConfig, Vector4};

    fn frame() -> FrameParams {
        FrameParams::new(Camera::default(), SpreadConfig::new(4.0, 0.5), PointSize(5.0))
    }

    #[test]
    fn test_empty_cloud() {
        assert!(project_cloud(&[], &frame()).is_empty());
        assert!(project_cloud_parallel(&[], &frame()).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let points: Vec<EmbeddingPoint> = (0..64)
            .map(|i| EmbeddingPoint::new([i as f32, 0.0, 10.0], [0.0; 3]))
            .collect();

        let projected = project_cloud_parallel(&points, &frame());
        for (i, p) in projected.iter().enumerate() {
            assert_eq!(p.clip, Vector4::new(i as f32, 0.0, 7.0, 1.0));
            assert_eq!(p.size, 5.0);
        }
    }

    #[test]
    fn test_into_reuses_and_clears_buffer() {
        let points = vec![EmbeddingPoint::new([1.0, 2.0, 10.0], [0.1, 0.2, 0.3]); 3];
        let mut out = project_cloud(&points, &frame());
        assert_eq!(out.len(), 3);

        project_cloud_into(&points[..1], &frame(), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].color, [0.1, 0.2, 0.3, 1.0]);
    }
}
