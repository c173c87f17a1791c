//! Process plumbing around the solver: reading instance files, assembling the termination
//! condition, measuring diagnostics, and rendering the textual report.
//!
//! The report mirrors the established output shape: a `sat`/`unsat`/`timeout` line, one
//! `s<i>: u<j>` line per step, the multiplicity note, and the elapsed wall time in
//! milliseconds.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use log::info;
use thiserror::Error;

use crate::api::outputs::Diagnostics;
use crate::api::outputs::SolveResult;
use crate::api::Solver;
use crate::backend::BackendError;
use crate::backend::BackendKind;
use crate::backend::EnumerationBackend;
use crate::backend::IncrementalBackend;
use crate::basic_types::SolveStatus;
use crate::model::Instance;
use crate::options::SolverOptions;
use crate::parsing::parse_instance;
use crate::parsing::ParseError;
use crate::termination::Combinator;
use crate::termination::SignalFlag;
use crate::termination::TimeBudget;

/// Failures of a file-based run which are not part of the solve outcome itself.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Reads the instance at `path` and solves it; see [`solve_instance`].
pub fn solve_file(
    path: &Path,
    backend: BackendKind,
    options: SolverOptions,
    timeout: Option<Duration>,
    interrupt: Arc<AtomicBool>,
) -> Result<SolveResult, RunnerError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_owned(),
        source,
    })?;
    let instance = parse_instance(&source)?;
    info!(
        "solving {} ({} steps, {} users) with the {backend} backend",
        path.display(),
        instance.step_count(),
        instance.user_count()
    );
    solve_instance(&instance, backend, options, timeout, interrupt)
}

/// Solves `instance` on the selected backend and fills in the diagnostics.
///
/// The search stops early when the timeout elapses or the interrupt flag is raised; both
/// surface as [`SolveStatus::Timeout`].
pub fn solve_instance(
    instance: &Instance,
    backend: BackendKind,
    options: SolverOptions,
    timeout: Option<Duration>,
    interrupt: Arc<AtomicBool>,
) -> Result<SolveResult, RunnerError> {
    let mut termination = Combinator::new(
        TimeBudget::starting_now(timeout.unwrap_or(Duration::MAX)),
        SignalFlag::new(interrupt),
    );

    let memory_before = peak_resident_bytes();
    let started_at = Instant::now();
    let mut result = match backend {
        BackendKind::Enumeration => {
            Solver::with_options(EnumerationBackend::default(), options)
                .satisfy(instance, &mut termination)?
        }
        BackendKind::Incremental => {
            Solver::with_options(IncrementalBackend::default(), options)
                .satisfy(instance, &mut termination)?
        }
    };
    let wall_time = started_at.elapsed();

    result.set_diagnostics(Diagnostics {
        wall_time: Some(wall_time),
        peak_memory_delta: match (memory_before, peak_resident_bytes()) {
            (Some(before), Some(after)) => Some(after.saturating_sub(before)),
            _ => None,
        },
    });
    info!(
        "finished with {:?} in {}ms",
        result.status(),
        wall_time.as_millis()
    );
    Ok(result)
}

/// Renders the report for one solve outcome.
pub fn render_report(result: &SolveResult) -> String {
    let mut lines: Vec<String> = Vec::new();
    match result.status() {
        SolveStatus::Satisfiable => {
            lines.push("sat".to_owned());
            for (step, user) in result.assignment().iter() {
                lines.push(format!("{step}: {user}"));
            }
            lines.push(result.multiplicity().to_string());
        }
        SolveStatus::Unsatisfiable => lines.push("unsat".to_owned()),
        SolveStatus::Timeout => lines.push("timeout".to_owned()),
    }
    if let Some(wall_time) = result.diagnostics().wall_time {
        lines.push(format!("{}ms", wall_time.as_millis()));
    }
    lines.join("\n")
}

/// The peak resident set size of this process, where the platform exposes it.
#[cfg(target_os = "linux")]
fn peak_resident_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmHWM:"))?;
    let kilobytes: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kilobytes * 1024)
}

#[cfg(not(target_os = "linux"))]
fn peak_resident_bytes() -> Option<u64> {
    None
}
