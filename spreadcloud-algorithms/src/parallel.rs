//! Thread pool management for per-frame point evaluation
//!
//! The pool is global and created lazily. Call [`init_thread_pool`] before
//! the first frame to override the defaults.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::{Arc, Mutex, OnceLock};
use spreadcloud_core::{Error, Result};

static GLOBAL_THREAD_POOL: OnceLock<Arc<ThreadPool>> = OnceLock::new();
static PARALLEL_CONFIG: Mutex<ParallelConfig> = Mutex::new(ParallelConfig::new());

/// Configuration for data-parallel frame evaluation
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use (None = one per logical CPU)
    pub num_threads: Option<usize>,
    /// Thread name prefix
    pub thread_name_prefix: String,
    /// Enable parallel processing (can be disabled for debugging)
    pub enabled: bool,
    /// Clouds shorter than this are evaluated on the calling thread
    pub min_parallel_len: usize,
}

impl ParallelConfig {
    const fn new() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: String::new(),
            enabled: true,
            min_parallel_len: 4096,
        }
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len;
        self
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "spreadcloud".to_string(),
            ..Self::new()
        }
    }
}

fn build_pool(config: &ParallelConfig) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new();

    if let Some(num_threads) = config.num_threads {
        builder = builder.num_threads(num_threads);
    }

    if !config.thread_name_prefix.is_empty() {
        let prefix = config.thread_name_prefix.clone();
        builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
    }

    builder
        .build()
        .map_err(|e| Error::Algorithm(format!("Failed to create thread pool: {}", e)))
}

/// Initialize the global thread pool with a custom configuration.
///
/// Does nothing if a pool already exists; the existing pool keeps running
/// with its original settings.
pub fn init_thread_pool(config: ParallelConfig) -> Result<()> {
    if GLOBAL_THREAD_POOL.get().is_some() {
        log::warn!("Thread pool already initialized, ignoring new configuration");
        return Ok(());
    }

    let pool = build_pool(&config)?;
    log::debug!(
        "Created frame thread pool with {} threads",
        pool.current_num_threads()
    );

    if GLOBAL_THREAD_POOL.set(Arc::new(pool)).is_err() {
        log::warn!("Thread pool initialized concurrently, ignoring new configuration");
        return Ok(());
    }

    if let Ok(mut global_config) = PARALLEL_CONFIG.lock() {
        *global_config = config;
    }

    Ok(())
}

/// Get the global thread pool, initializing with defaults if needed.
///
/// Falls back to rayon's global pool if a dedicated pool cannot be built.
pub fn get_thread_pool() -> Option<Arc<ThreadPool>> {
    if let Some(pool) = GLOBAL_THREAD_POOL.get() {
        return Some(pool.clone());
    }

    match build_pool(&ParallelConfig::default()) {
        Ok(pool) => Some(GLOBAL_THREAD_POOL.get_or_init(|| Arc::new(pool)).clone()),
        Err(e) => {
            log::warn!("{}; using the rayon global pool", e);
            None
        }
    }
}

/// Current configuration
pub fn get_config() -> ParallelConfig {
    PARALLEL_CONFIG
        .lock()
        .map(|config| config.clone())
        .unwrap_or_default()
}

/// Whether a workload of `len` items should be split across threads
pub fn should_parallelize(len: usize) -> bool {
    let config = get_config();
    config.enabled && len >= config.min_parallel_len
}

/// Run `op` inside the frame thread pool
pub fn execute_parallel<F, R>(op: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}
