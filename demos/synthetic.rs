//! Synthetic embeddings for the demos

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spreadcloud_core::{EmbeddingCloud, EmbeddingPoint};

const CLUSTER_COLORS: [[f32; 3]; 4] = [
    [0.90, 0.30, 0.25],
    [0.25, 0.65, 0.90],
    [0.40, 0.85, 0.35],
    [0.95, 0.80, 0.25],
];

/// Four blobs at different depths, colored by cluster
pub fn clustered_embedding(count: usize, seed: u64) -> EmbeddingCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = [
        [-6.0, 2.0, -8.0],
        [5.0, 3.0, -2.0],
        [-2.0, 6.0, 4.0],
        [4.0, 1.0, 9.0],
    ];

    (0..count)
        .map(|i| {
            let cluster = i % centers.len();
            let center = centers[cluster];
            // Sum of uniforms gives a cheap bell-shaped spread around the center
            let mut jitter = || (0..3).map(|_| rng.gen_range(-1.0f32..1.0)).sum::<f32>();
            EmbeddingPoint::new(
                [center[0] + jitter(), center[1] + jitter(), center[2] + jitter()],
                CLUSTER_COLORS[cluster],
            )
        })
        .collect()
}
