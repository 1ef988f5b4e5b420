pub mod batch;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod groups;
pub mod reader;
pub mod style;
pub mod table;
pub mod ticks;

pub use batch::{run_batch, run_cases, BatchReport, UnitOutcome};
pub use chart::{compose_chart, Chart};
pub use config::{BatchConfig, ChartConfig, ExportConfig};
pub use error::PlotError;
pub use export::{ArtifactSet, Exporter};
pub use groups::{resolve_group, GroupMap, QuantityGroup};
pub use reader::{list_cases, load_case, Workbook};
pub use style::{LineDash, MethodStyle, StyleMap};
pub use table::TimeTable;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the mandatory time column, in seconds.
pub const TIME_COLUMN: &str = "Time";

/// Separator between the method prefix and the quantity in a column name.
pub const METHOD_SEPARATOR: char = '_';

pub const DEFAULT_TIME_LIMIT: f64 = 200.;
pub const DEFAULT_X_INTERVAL: f64 = 20.;

pub const DEFAULT_DPI_HIGH: f32 = 300.;
pub const DEFAULT_DPI_THUMB: f32 = 72.;

/// Chart geometry is expressed in points; rasters scale by dpi / POINTS_PER_INCH.
pub const POINTS_PER_INCH: f32 = 72.;

/// Min and max of the finite values in the slice, None if there are none.
pub fn min_and_max(s: &[f64]) -> Option<(f64, f64)> {
    let mut finite = s.iter().copied().filter(|v| v.is_finite());
    let (mut min, mut max) = match finite.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in finite {
        if es > max {
            max = es
        }
        if es < min {
            min = es
        }
    }
    Some((min, max))
}

/// Splits the (time, value) samples into runs of finite values,
/// a NaN (in either coordinate) ends the current run.
pub fn finite_runs(time: &[f64], values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (&t, &v) in time.iter().zip(values.iter()) {
        if t.is_finite() && v.is_finite() {
            current.push((t, v));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
