//! Test execution engine.
//!
//! Every case is rendered through the bounded buffer, the unbounded buffer,
//! the discard sink and the callback sink. The bounded content is compared
//! with the fixture; the other sinks must agree with it on the length.

use tinyprintf_core::{Argument, DataModel, FormatConfig, Formatter};

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, SinkKind};
use crate::verify::VerificationResult;

/// Byte used to prefill buffers so stray writes show up.
const CANARY: u8 = 0xA5;

/// What each sink produced for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRun {
    /// Bounded buffer content before the terminator.
    pub content: Vec<u8>,
    pub bounded_len: usize,
    /// Whether the terminator sits right after the content (vacuous at capacity 0).
    pub terminated: bool,
    /// Bytes past the terminator that were modified.
    pub overrun: bool,
    pub unbounded: Vec<u8>,
    pub unbounded_len: usize,
    pub discard_len: usize,
    pub callback: Vec<u8>,
    pub callback_len: usize,
}

/// Render one case through every sink.
#[must_use]
pub fn execute_case(case: &FixtureCase, model: DataModel) -> CaseRun {
    let formatter = Formatter::with_config(FormatConfig::DEFAULT.with_data_model(model));
    let args: Vec<Argument<'_>> = case.args.iter().map(|a| a.to_argument()).collect();
    let fmt = case.format.as_bytes();

    let mut buf = vec![CANARY; case.capacity];
    let bounded_len = formatter.snprintf(&mut buf, fmt, &args);
    let kept = bounded_len.min(case.capacity.saturating_sub(1));
    let (content, terminated, overrun) = if case.capacity == 0 {
        (Vec::new(), true, false)
    } else {
        (
            buf[..kept].to_vec(),
            buf[kept] == 0,
            buf[kept + 1..].iter().any(|&b| b != CANARY),
        )
    };

    let discard_len = formatter.format_len(fmt, &args);

    let mut unbounded = vec![CANARY; discard_len + 1];
    let unbounded_len = formatter.sprintf(&mut unbounded, fmt, &args);
    unbounded.truncate(discard_len);

    let mut callback = Vec::new();
    let callback_len = formatter.fctprintf(|c: u8| callback.push(c), fmt, &args);

    CaseRun {
        content,
        bounded_len,
        terminated,
        overrun,
        unbounded,
        unbounded_len,
        discard_len,
        callback,
        callback_len,
    }
}

/// Everything wrong with a run, one message per problem.
fn problems(case: &FixtureCase, run: &CaseRun) -> Vec<String> {
    let mut out = Vec::new();
    if run.content != case.expected_output.as_bytes() {
        out.push("bounded content differs from expected output".to_string());
    }
    if run.bounded_len != case.expected_len {
        out.push(format!(
            "bounded call returned {}, expected {}",
            run.bounded_len, case.expected_len
        ));
    }
    if !run.terminated {
        out.push("terminator missing after bounded content".to_string());
    }
    if run.overrun {
        out.push("bounded call wrote past the terminator".to_string());
    }
    for (sink, len) in [
        ("discard", run.discard_len),
        ("unbounded", run.unbounded_len),
        ("callback", run.callback_len),
    ] {
        if len != run.bounded_len {
            out.push(format!(
                "{sink} sink returned {len}, bounded returned {}",
                run.bounded_len
            ));
        }
    }
    if !run.unbounded.starts_with(&run.content) {
        out.push("bounded content is not a prefix of the unbounded output".to_string());
    }
    let streamed: Vec<u8> = run.unbounded.iter().copied().filter(|&b| b != 0).collect();
    if run.callback != streamed {
        out.push("callback bytes differ from unbounded output".to_string());
    }
    out
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Model for cases that do not name one.
    pub data_model: DataModel,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, data_model: DataModel) -> Self {
        Self {
            campaign: campaign.into(),
            data_model,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.verify_case(case).0)
            .collect()
    }

    /// Like [`TestRunner::run`], emitting one log line per case.
    pub fn run_with_log(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "fixture_set_start").with_details(
                serde_json::json!({
                    "campaign": self.campaign,
                    "family": fixture_set.family,
                    "version": fixture_set.version,
                    "cases": fixture_set.cases.len(),
                }),
            ),
        )?;

        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let (result, setup_error) = self.verify_case(case);
            let (level, outcome) = match (&setup_error, result.passed) {
                (Some(_), _) => (LogLevel::Error, Outcome::Error),
                (None, true) => (LogLevel::Info, Outcome::Pass),
                (None, false) => (LogLevel::Warn, Outcome::Fail),
            };
            let mut entry = LogEntry::new("", level, "case_result")
                .with_case(&case.name, &case.section)
                .with_sink(SinkKind::Bounded)
                .with_outcome(outcome)
                .with_output(&result.expected, &result.actual)
                .with_returned_len(result.returned_len);
            if !result.problems.is_empty() {
                entry = entry.with_details(serde_json::json!({
                    "format": case.format,
                    "problems": result.problems,
                }));
            }
            log.emit_entry(entry)?;
            results.push(result);
        }
        log.flush()?;
        Ok(results)
    }

    /// Verify one case. The second value is set when the case could not run.
    fn verify_case(&self, case: &FixtureCase) -> (VerificationResult, Option<String>) {
        let mut result = VerificationResult {
            case_name: case.name.clone(),
            section: case.section.clone(),
            passed: false,
            expected: case.expected_output.clone(),
            actual: String::new(),
            expected_len: case.expected_len,
            returned_len: 0,
            problems: Vec::new(),
            diff: None,
        };

        let model = match case.data_model {
            None => self.data_model,
            Some(_) => match case.resolve_data_model() {
                Ok(model) => model,
                Err(err) => {
                    let message = err.to_string();
                    result.problems.push(message.clone());
                    return (result, Some(message));
                }
            },
        };

        let run = execute_case(case, model);
        result.actual = text(&run.content);
        result.returned_len = run.bounded_len;
        result.problems = problems(case, &run);
        if result.actual != result.expected {
            result.diff = Some(diff::render_diff(&result.expected, &result.actual));
        }
        result.passed = result.problems.is_empty();
        (result, None)
    }
}
