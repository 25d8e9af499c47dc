//! Output comparison and verification.

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Behavior or format feature the case covers.
    pub section: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected buffer content.
    pub expected: String,
    /// Buffer content produced by the engine.
    pub actual: String,
    pub expected_len: usize,
    /// Length returned by the bounded call.
    pub returned_len: usize,
    /// Sink disagreements and other failures, one per line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
    /// Diff if the content differed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed results, in run order.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            section: "width".to_string(),
            passed,
            expected: "  7".to_string(),
            actual: if passed { "  7" } else { " 7" }.to_string(),
            expected_len: 3,
            returned_len: if passed { 3 } else { 2 },
            problems: Vec::new(),
            diff: None,
        }
    }

    #[test]
    fn summary_counts() {
        let summary = VerificationSummary::from_results(vec![
            result("a", true),
            result("b", false),
            result("c", true),
        ]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        let names: Vec<_> = summary.failures().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn empty_summary_passes() {
        assert!(VerificationSummary::from_results(Vec::new()).all_passed());
    }
}
