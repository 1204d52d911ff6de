//! Scan orchestration
//!
//! The [`Scanner`] drives the existence checker over a parsed image list,
//! one reference at a time, in input order. It reports progress through a
//! plain callback so it stays independent of any rendering surface, and it
//! never fails: individual check outcomes are folded into the report.

use crate::image::ImageReference;
use crate::registry::{AuthToken, CheckResult, CheckStatus, RegistryChecker};
use serde::Serialize;

/// Outcome of one full scan.
///
/// Every input reference lands in exactly one of `present`/`not_present`,
/// in first-seen order. References whose check failed in transport are
/// additionally listed in `unreachable` (a subset of `not_present`) so
/// callers can report them distinctly from genuine absences.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub present: Vec<ImageReference>,
    pub not_present: Vec<ImageReference>,
    pub unreachable: Vec<ImageReference>,
}

impl ScanReport {
    fn record(&mut self, result: CheckResult) {
        match result.status {
            CheckStatus::Present => self.present.push(result.reference),
            CheckStatus::Absent => self.not_present.push(result.reference),
            CheckStatus::Error => {
                self.unreachable.push(result.reference.clone());
                self.not_present.push(result.reference);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.present.len() + self.not_present.len()
    }

    pub fn all_present(&self) -> bool {
        self.not_present.is_empty()
    }
}

pub struct Scanner {
    checker: RegistryChecker,
}

impl Scanner {
    pub fn new(checker: RegistryChecker) -> Self {
        Self { checker }
    }

    /// Check every reference sequentially and build the report.
    ///
    /// `on_progress` is invoked synchronously after each item with the
    /// completed count (1..=total) and the total. An empty input yields an
    /// empty report without touching the checker or the callback; callers
    /// are expected to have rejected empty input before starting a scan.
    pub async fn scan<F>(
        &self,
        token: &AuthToken,
        references: &[ImageReference],
        mut on_progress: F,
    ) -> ScanReport
    where
        F: FnMut(usize, usize),
    {
        let mut report = ScanReport::default();

        let total = references.len();
        if total == 0 {
            return report;
        }

        for (index, reference) in references.iter().enumerate() {
            let result = self.checker.check(token, reference).await;
            report.record(result);
            on_progress(index + 1, total);
        }

        report
    }
}
