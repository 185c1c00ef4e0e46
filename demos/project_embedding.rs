//! Projects a synthetic embedding at several spread values and reports how
//! the clip-space depth range shrinks as the cloud flattens.

use anyhow::Result;
use clap::Parser;
use spreadcloud_algorithms::{init_thread_pool, project_cloud, ParallelConfig};
use spreadcloud_core::{Drawable, SpreadConfig};
use spreadcloud_demos::clustered_embedding;
use spreadcloud_visualization::ViewerConfig;

#[derive(Parser, Debug)]
#[command(about = "Project a synthetic embedding through the spread transform")]
struct Args {
    /// Number of points to generate
    #[arg(long, default_value_t = 200_000)]
    points: usize,

    /// Number of spread steps between flat (0) and full (1)
    #[arg(long, default_value_t = 5)]
    steps: usize,

    /// Worker threads (defaults to one per CPU)
    #[arg(long)]
    threads: Option<usize>,

    /// Directory holding default.toml / user.toml
    #[arg(long, default_value = "config")]
    config: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut parallel = ParallelConfig::default();
    if let Some(threads) = args.threads {
        parallel = parallel.with_threads(threads);
    }
    init_thread_pool(parallel)?;

    let config = ViewerConfig::load_from(&args.config).unwrap_or_else(|e| {
        log::warn!("{}. Using defaults.", e);
        ViewerConfig::default()
    });
    let mut state = config.viewport_state();

    let cloud = clustered_embedding(args.points, 7);
    state.camera.view.pivot = cloud.center();
    let (z_min, z_max) = cloud.depth_range();
    log::info!(
        "Generated {} points, depth range [{:.2}, {:.2}]",
        cloud.len(),
        z_min,
        z_max
    );

    let steps = args.steps.max(1);
    for step in 0..=steps {
        state.spread = step as f32 / steps as f32;
        let frame = state.frame_params(1280.0, 720.0);
        let SpreadConfig { pivot, factor } = frame.spread;

        let started = std::time::Instant::now();
        let projected = project_cloud(cloud.as_slice(), &frame);
        let elapsed = started.elapsed();

        let (min_depth, max_depth) = projected
            .iter()
            .filter(|p| p.clip.w > 0.0)
            .map(|p| p.clip.z / p.clip.w)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)));

        println!(
            "spread {:.2} (pivot {:.2}, factor {:.3}): ndc depth [{:.5}, {:.5}] in {:?}",
            state.spread, pivot, factor, min_depth, max_depth, elapsed
        );
    }

    Ok(())
}
