//! Global rayon pool setup for parallel exporting.

use anyhow::{Context, Result};
use tracing::info;

/// Worker count used when none is configured: half the cores, at least one.
pub fn default_workers() -> usize {
    std::cmp::max(1, num_cpus::get() / 2)
}

/// The configured worker count, or the default when unset or zero.
pub fn resolve_workers(workers: Option<usize>) -> usize {
    workers.filter(|w| *w > 0).unwrap_or_else(default_workers)
}

/// Initialize the global rayon thread pool with `workers` threads.
pub fn init_thread_pool(workers: Option<usize>) -> Result<usize> {
    let cores = num_cpus::get();
    let workers = resolve_workers(workers);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .context("Failed to initialize the exporter thread pool")?;

    info!(
        "Initialized thread pool: {} workers (system has {} cores)",
        workers, cores
    );
    Ok(workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_workers() {
        assert_eq!(resolve_workers(Some(3)), 3);
        assert_eq!(resolve_workers(Some(0)), default_workers());
        assert_eq!(resolve_workers(None), default_workers());
        assert!(default_workers() >= 1);
        assert!(default_workers() <= num_cpus::get().max(1));
    }

    #[test]
    fn test_init_thread_pool_reports_size_or_context() {
        // Other tests may already have started the global pool.
        match init_thread_pool(Some(3)) {
            Ok(workers) => {
                assert_eq!(workers, 3);
                assert_eq!(rayon::current_num_threads(), 3);
            }
            Err(e) => assert!(e.to_string().contains("Failed to initialize the exporter thread pool")),
        }
    }
}
