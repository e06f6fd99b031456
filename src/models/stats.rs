//! Per-run counters.

use serde::{Deserialize, Serialize};

/// Counters for one pipeline execution.
///
/// Stages return their own `RunStats` delta; the orchestrator folds them
/// together with [`RunStats::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub searched: usize,
    pub found: usize,
    pub valid: usize,
    pub duplicated: usize,
    pub low_quality: usize,
    pub new_docs: usize,
    pub updated_docs: usize,
    pub code_samples: usize,
    pub fetch_failures: usize,
    pub scan_failures: usize,
    pub write_failures: usize,
}

impl RunStats {
    /// Add another delta into this accumulator.
    pub fn merge(&mut self, other: &RunStats) {
        self.searched += other.searched;
        self.found += other.found;
        self.valid += other.valid;
        self.duplicated += other.duplicated;
        self.low_quality += other.low_quality;
        self.new_docs += other.new_docs;
        self.updated_docs += other.updated_docs;
        self.code_samples += other.code_samples;
        self.fetch_failures += other.fetch_failures;
        self.scan_failures += other.scan_failures;
        self.write_failures += other.write_failures;
    }

    /// Labeled rows for the end-of-run report.
    pub fn report_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Topics searched", self.searched.to_string()),
            ("Pages found", self.found.to_string()),
            ("Valid", self.valid.to_string()),
            ("Duplicates", self.duplicated.to_string()),
            ("Low quality", self.low_quality.to_string()),
            ("New documents", self.new_docs.to_string()),
            ("Updated documents", self.updated_docs.to_string()),
            ("Code samples", self.code_samples.to_string()),
            ("Fetch failures", self.fetch_failures.to_string()),
            ("Corpus scan failures", self.scan_failures.to_string()),
            ("Write failures", self.write_failures.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_every_counter() {
        let mut total = RunStats {
            searched: 1,
            new_docs: 2,
            ..RunStats::default()
        };
        let delta = RunStats {
            searched: 1,
            found: 3,
            valid: 1,
            duplicated: 1,
            low_quality: 1,
            new_docs: 1,
            updated_docs: 1,
            code_samples: 4,
            fetch_failures: 1,
            scan_failures: 1,
            write_failures: 1,
        };

        total.merge(&delta);

        assert_eq!(total.searched, 2);
        assert_eq!(total.found, 3);
        assert_eq!(total.new_docs, 3);
        assert_eq!(total.code_samples, 4);
        assert_eq!(total.scan_failures, 1);
        assert_eq!(total.write_failures, 1);
    }

    #[test]
    fn test_report_rows_cover_counters() {
        let rows = RunStats::default().report_rows();
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|(_, v)| v == "0"));
    }
}
