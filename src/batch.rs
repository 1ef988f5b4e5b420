//! Batch driver: every case of a workbook, every quantity group of a case.
//!
//! A unit is one (case, group) pair. Units run one after the other; each ends
//! in a [`UnitOutcome`] that goes into the [`BatchReport`], so no unit's
//! failure reaches the next one. Only an unreadable workbook stops the run.

use std::path::{Path, PathBuf};

use chrono::prelude::*;
use log::{info, warn};

use crate::chart::compose_chart;
use crate::config::BatchConfig;
use crate::error::PlotError;
use crate::export::{artifact_base, ArtifactSet, Exporter};
use crate::groups::{resolve_group, QuantityGroup};
use crate::reader::Workbook;
use crate::table::TimeTable;
use crate::DT_FORMAT;

/// What became of one (case, group) unit.
#[derive(Debug)]
pub enum UnitOutcome {
    Exported(ArtifactSet),
    /// Nothing to plot, informational
    Skipped(String),
    Failed(PlotError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub case: String,
    pub group: String,
    pub artifacts: ArtifactSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    pub case: String,
    pub group: String,
    pub reason: String,
}

/// A failed case (group is None) or a failed (case, group) unit.
#[derive(Debug)]
pub struct UnitFailure {
    pub case: String,
    pub group: Option<String>,
    pub error: PlotError,
}

#[derive(Debug)]
pub struct BatchReport {
    pub started: DateTime<Local>,
    pub finished: Option<DateTime<Local>>,
    /// Cases whose table was loaded, in processing order
    pub processed_cases: Vec<String>,
    pub exported: Vec<ExportRecord>,
    pub skipped_groups: Vec<SkippedGroup>,
    pub errors: Vec<UnitFailure>,
}

impl BatchReport {
    fn new() -> BatchReport {
        BatchReport {
            started: Local::now(),
            finished: None,
            processed_cases: Vec::new(),
            exported: Vec::new(),
            skipped_groups: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn record(&mut self, case: &str, group: &str, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Exported(artifacts) => self.exported.push(ExportRecord {
                case: case.to_string(),
                group: group.to_string(),
                artifacts,
            }),
            UnitOutcome::Skipped(reason) => self.skipped_groups.push(SkippedGroup {
                case: case.to_string(),
                group: group.to_string(),
                reason,
            }),
            UnitOutcome::Failed(error) => self.errors.push(UnitFailure {
                case: case.to_string(),
                group: Some(group.to_string()),
                error,
            }),
        }
    }

    fn case_failed(&mut self, case: &str, error: PlotError) {
        self.errors.push(UnitFailure {
            case: case.to_string(),
            group: None,
            error,
        });
    }

    /// All artifact paths written during the run.
    pub fn artifact_paths(&self) -> Vec<&Path> {
        self.exported
            .iter()
            .flat_map(|r| r.artifacts.paths().to_vec())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "run started at {}", self.started.format(DT_FORMAT))?;
        if let Some(finished) = self.finished {
            let elapsed = finished - self.started;
            writeln!(
                f,
                "run finished at {} ({} ms)",
                finished.format(DT_FORMAT),
                elapsed.num_milliseconds()
            )?;
        }
        writeln!(f, "processed cases: {}", self.processed_cases.join(", "))?;
        writeln!(f, "exported charts: {}", self.exported.len())?;
        for r in self.exported.iter() {
            writeln!(f, "  case {} {}: {}", r.case, r.group, r.artifacts.png.display())?;
        }
        writeln!(f, "skipped groups: {}", self.skipped_groups.len())?;
        for s in self.skipped_groups.iter() {
            writeln!(f, "  case {} {}: {}", s.case, s.group, s.reason)?;
        }
        writeln!(f, "errors: {}", self.errors.len())?;
        for e in self.errors.iter() {
            match &e.group {
                Some(group) => writeln!(f, "  case {} {}: {}", e.case, group, e.error)?,
                None => writeln!(f, "  case {}: {}", e.case, e.error)?,
            }
        }
        Ok(())
    }
}

/// Plots every case of the workbook at `source` into `output_dir`.
///
/// Fails only when the workbook cannot be opened; every other problem is in the report.
pub fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output_dir: Q,
    config: &BatchConfig,
) -> Result<BatchReport, PlotError> {
    let mut workbook = Workbook::open(source)?;
    let cases = workbook.list_cases();
    info!(
        "{} case(s) found in {}",
        cases.len(),
        workbook.path().display()
    );
    Ok(run_on(&mut workbook, &cases, output_dir.as_ref(), config))
}

/// Plots the named cases only, in the given order.
/// A name that is not a sheet of the workbook is recorded as `CaseNotFound`.
pub fn run_cases<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    cases: &[String],
    output_dir: Q,
    config: &BatchConfig,
) -> Result<BatchReport, PlotError> {
    let mut workbook = Workbook::open(source)?;
    Ok(run_on(&mut workbook, cases, output_dir.as_ref(), config))
}

fn run_on(
    workbook: &mut Workbook,
    cases: &[String],
    output_dir: &Path,
    config: &BatchConfig,
) -> BatchReport {
    let exporter = Exporter::new(config.export.clone());
    let mut report = BatchReport::new();
    for case in cases {
        info!("processing case {}", case);
        let table = match workbook.load_case(case, config.time_limit()) {
            Ok(t) => t,
            Err(e) => {
                warn!("case {} skipped: {}", case, e);
                report.case_failed(case, e);
                continue;
            }
        };
        report.processed_cases.push(case.clone());
        for group in config.groups.iter() {
            let outcome = process_group(case, &table, group, output_dir, config, &exporter);
            match &outcome {
                UnitOutcome::Exported(_) => info!("  case {} {}: exported", case, group.name),
                UnitOutcome::Skipped(reason) => info!("  case {} {}: skipped, {}", case, group.name, reason),
                UnitOutcome::Failed(e) => warn!("  case {} {}: failed, {}", case, group.name, e),
            }
            report.record(case, &group.name, outcome);
        }
    }
    report.finished = Some(Local::now());
    report
}

/// Resolve, compose and export one group of one case.
pub fn process_group(
    case: &str,
    table: &TimeTable,
    group: &QuantityGroup,
    output_dir: &Path,
    config: &BatchConfig,
    exporter: &Exporter,
) -> UnitOutcome {
    let available = match resolve_group(table, group, case) {
        Ok(columns) => columns,
        Err(e) if e.is_skip() => return UnitOutcome::Skipped(e.to_string()),
        Err(e) => return UnitOutcome::Failed(e),
    };
    let base: PathBuf = output_dir.join(artifact_base(case, &group.name));
    let exported = compose_chart(case, table, group, &available, &config.styles, &config.chart)
        .and_then(|chart| exporter.export_chart(chart, &base));
    match exported {
        Ok(artifacts) => UnitOutcome::Exported(artifacts),
        Err(e) => UnitOutcome::Failed(e),
    }
}
