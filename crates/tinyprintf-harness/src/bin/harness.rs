//! CLI entrypoint for the tinyprintf conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tinyprintf_core::{Argument, DataModel, FormatConfig, Formatter};
use tinyprintf_harness::structured_log::{self, ArtifactIndex, LogEmitter};
use tinyprintf_harness::{
    ConformanceReport, FixtureArg, FixtureSet, HarnessError, TestRunner, VerificationSummary,
    fixtures,
};

/// Conformance tooling for tinyprintf.
#[derive(Debug, Parser)]
#[command(name = "tinyprintf-harness")]
#[command(about = "Conformance testing harness for tinyprintf")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written next to it).
        #[arg(long)]
        report: Option<PathBuf>,
        /// JSONL log of every case.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index with SHA-256 digests of fixtures and outputs.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Data model for cases that do not name one (`native` or `mos`).
        #[arg(long, default_value = "native")]
        data_model: String,
    },
    /// Format once and print the result.
    Render {
        /// Format string.
        #[arg(long)]
        format: String,
        /// Argument as `kind:value` (int, uint, float, char, str, ptr). Repeatable.
        #[arg(long = "arg")]
        args: Vec<FixtureArg>,
        /// Bounded buffer size.
        #[arg(long, default_value_t = 256)]
        capacity: usize,
        /// Data model (`native` or `mos`).
        #[arg(long, default_value = "native")]
        data_model: String,
    },
    /// Validate a JSONL harness log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn data_model(name: &str) -> Result<DataModel, HarnessError> {
    DataModel::from_name(name).ok_or_else(|| {
        HarnessError::InvalidArgument(format!("unknown data model '{name}', expected native|mos"))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            artifact_index,
            data_model: model_name,
        } => {
            let model = data_model(&model_name)?;
            eprintln!("Verifying against fixtures in {}", fixture.display());

            let mut fixture_sets = Vec::new();
            for path in fixtures::fixture_paths(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push((path, set)),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(HarnessError::EmptyFixtureSet(fixture.display().to_string()).into());
            }

            let run_id = format!("verify-{}", std::process::id());
            let runner = TestRunner::new("fixture-verify", model);
            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, "tinyprintf", &run_id)?),
                None => None,
            };
            let mut results = Vec::new();
            for (path, set) in &fixture_sets {
                eprintln!("  {} ({} cases)", path.display(), set.cases.len());
                match emitter.as_mut() {
                    Some(emitter) => results.extend(runner.run_with_log(set, emitter)?),
                    None => results.extend(runner.run(set)),
                }
            }

            let report_doc = ConformanceReport {
                title: String::from("tinyprintf Conformance Report"),
                data_model: model_name.to_ascii_lowercase(),
                timestamp: structured_log::now_utc(),
                summary: VerificationSummary::from_results(results),
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("  FAIL {}: {}", failure.case_name, failure.problems.join("; "));
            }

            let mut index = ArtifactIndex::new(&run_id);
            for (path, _) in &fixture_sets {
                index.add_file(path, "fixture", None)?;
            }
            if let Some(report_path) = &report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
                index.add_file(report_path, "report", None)?;
                index.add_file(&json_path, "report", None)?;
            }
            if let Some(log_path) = &log {
                drop(emitter);
                index.add_file(log_path, "log", None)?;
            }
            if let Some(index_path) = &artifact_index {
                std::fs::write(index_path, index.to_json()?)?;
                eprintln!("Wrote artifact index to {}", index_path.display());
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            args,
            capacity,
            data_model: model_name,
        } => {
            let model = data_model(&model_name)?;
            let formatter = Formatter::with_config(FormatConfig::DEFAULT.with_data_model(model));
            let list: Vec<Argument<'_>> = args.iter().map(FixtureArg::to_argument).collect();
            let mut buf = vec![0u8; capacity];
            let len = formatter.snprintf(&mut buf, &format, &list);
            let kept = len.min(capacity.saturating_sub(1));
            println!("{}", String::from_utf8_lossy(&buf[..kept]).escape_default());
            eprintln!("returned={len} kept={kept} truncated={}", kept < len);
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = structured_log::validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!("{}: {lines} lines, {} errors", log.display(), errors.len());
            if !errors.is_empty() {
                return Err("Log validation failed".into());
            }
        }
    }

    Ok(())
}
