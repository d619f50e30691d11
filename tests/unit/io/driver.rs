//! Tests for round-robin fan-out and per-job failure isolation

#[cfg(test)]
mod tests {
    use puzzletile::PuzzleError;
    use puzzletile::io::driver::{
        Job, partition_round_robin, run_buckets, run_jobs, worker_pool,
    };
    use puzzletile::io::error::invalid_parameter;
    use puzzletile::io::progress::ProgressManager;
    use std::path::PathBuf;

    // Tests item n lands in bucket n mod workers
    // Verified by chunking items contiguously
    #[test]
    fn test_round_robin_assignment() {
        let buckets = partition_round_robin(0..7, 3);

        assert_eq!(buckets, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    // Tests more workers than items leaves empty buckets, zero workers none
    // Verified by trimming empty buckets
    #[test]
    fn test_bucket_count_is_worker_count() {
        let buckets = partition_round_robin(["a", "b"], 4);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets.iter().filter(|b| b.is_empty()).count(), 2);

        assert!(partition_round_robin(0..5, 0).is_empty());
    }

    // Tests bucket results return in bucket order
    // Verified by collecting results in completion order
    #[test]
    fn test_run_buckets_preserves_order() {
        let sums = run_buckets((1..=10).collect(), 3, |bucket: Vec<u32>| bucket.iter().sum::<u32>())
            .unwrap_or_else(|e| unreachable!("{e}"));

        // buckets: [1,4,7,10], [2,5,8], [3,6,9]
        assert_eq!(sums, vec![22, 15, 18]);
    }

    // Tests a zero worker count is refused
    // Verified by letting rayon pick a default thread count
    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            worker_pool(0),
            Err(PuzzleError::InvalidParameter { parameter: "workers", .. })
        ));
        assert_eq!(worker_pool(2).map(|pool| pool.current_num_threads()).ok(), Some(2));
    }

    // Tests one failing job neither stops its bucket nor the batch
    // Verified by returning early on the first failure
    #[test]
    fn test_failures_are_isolated() {
        let jobs: Vec<Job> = (0..6)
            .map(|k| Job::new(format!("in/{k}.png"), format!("out/{k}.jpg")))
            .collect();
        let progress = ProgressManager::hidden(jobs.len());

        let report = run_jobs(jobs, 2, Some(&progress), |job| {
            if job.input.ends_with("2.png") {
                Err(invalid_parameter("target", &job.input.display(), &"unreadable"))
            } else {
                Ok(())
            }
        })
        .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(report.total(), 6);
        assert!(!report.is_clean());
        assert_eq!(report.succeeded.len(), 5);
        assert_eq!(
            report.failed.iter().map(|(path, _)| path.clone()).collect::<Vec<_>>(),
            vec![PathBuf::from("in/2.png")]
        );
        assert_eq!(progress.completed(), 6);
    }

    // Tests an empty batch is clean
    // Verified by treating an empty batch as a failure
    #[test]
    fn test_empty_batch_is_clean() {
        let report = run_jobs(Vec::new(), 3, None, |_| Ok(())).unwrap_or_else(|e| unreachable!("{e}"));

        assert!(report.is_clean());
        assert_eq!(report.total(), 0);
    }
}
