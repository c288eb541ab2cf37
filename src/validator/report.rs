//! Aggregate view over a batch of link check records

use crate::records::{LinkCheckRecord, StatusBucket};

/// Per-bucket counts plus broken and slow subsets
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub total: usize,

    /// Count for every bucket, in `StatusBucket::all()` order
    pub bucket_counts: Vec<(StatusBucket, usize)>,

    pub broken: Vec<LinkCheckRecord>,

    /// Records slower than the threshold, slowest first
    pub slow: Vec<LinkCheckRecord>,
}

impl ValidationReport {
    pub fn build(records: &[LinkCheckRecord], slow_threshold_ms: u64) -> Self {
        let bucket_counts = StatusBucket::all()
            .into_iter()
            .map(|bucket| {
                let count = records.iter().filter(|r| r.status_bucket == bucket).count();
                (bucket, count)
            })
            .collect();

        let broken = records
            .iter()
            .filter(|r| r.status_bucket.is_broken())
            .cloned()
            .collect();

        let mut slow: Vec<LinkCheckRecord> = records
            .iter()
            .filter(|r| r.response_time_ms > slow_threshold_ms as f64)
            .cloned()
            .collect();
        slow.sort_by(|a, b| b.response_time_ms.total_cmp(&a.response_time_ms));

        Self {
            total: records.len(),
            bucket_counts,
            broken,
            slow,
        }
    }

    pub fn count(&self, bucket: StatusBucket) -> usize {
        self.bucket_counts
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}
