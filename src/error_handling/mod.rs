//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions for initialization and input
//! - Categorization of transport errors into terminal failure reasons
//! - Thread-safe per-kind failure counters

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, failure_kind, update_failure_stats};
pub use stats::ProcessingStats;
pub use types::{FailureKind, InitializationError, InputError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for kind in FailureKind::iter() {
            assert_eq!(stats.get_failure_count(kind), 0);
        }
        assert_eq!(stats.total_failures(), 0);
    }

    #[test]
    fn test_processing_stats_multiple_increments() {
        let stats = ProcessingStats::new();
        stats.increment_failure(FailureKind::Timeout);
        stats.increment_failure(FailureKind::Timeout);
        stats.increment_failure(FailureKind::Timeout);
        assert_eq!(stats.get_failure_count(FailureKind::Timeout), 3);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = std::sync::Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_failure(FailureKind::NetworkError);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.get_failure_count(FailureKind::NetworkError), 800);
    }
}
