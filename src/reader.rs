use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use log::{debug, warn};

use crate::error::PlotError;
use crate::table::TimeTable;
use crate::TIME_COLUMN;

/// A workbook opened for reading; each sheet is one case.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Opens any workbook format calamine understands (picked by extension).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Workbook, PlotError> {
        let path = path.as_ref().to_path_buf();
        let sheets = open_workbook_auto(&path).map_err(|e| PlotError::SourceUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Workbook { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order.
    pub fn list_cases(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Loads the sheet `case_id` and keeps the rows with time <= time_limit.
    pub fn load_case(&mut self, case_id: &str, time_limit: f64) -> Result<TimeTable, PlotError> {
        if !self.list_cases().iter().any(|name| name == case_id) {
            return Err(PlotError::CaseNotFound(case_id.to_string()));
        }
        let range = self
            .sheets
            .worksheet_range(case_id)
            .map_err(|e| PlotError::MalformedTable {
                case: case_id.to_string(),
                reason: e.to_string(),
            })?;
        let table = table_from_range(case_id, &range)?;
        let filtered = table.filter_time(time_limit);
        debug!(
            "case {}: {} rows read, {} rows with time <= {}",
            case_id,
            table.len(),
            filtered.len(),
            time_limit
        );
        Ok(filtered)
    }
}

/// Lists the cases of the workbook at `source`.
pub fn list_cases<P: AsRef<Path>>(source: P) -> Result<Vec<String>, PlotError> {
    Ok(Workbook::open(source)?.list_cases())
}

/// Opens the workbook at `source` and loads one case from it.
pub fn load_case<P: AsRef<Path>>(
    source: P,
    case_id: &str,
    time_limit: f64,
) -> Result<TimeTable, PlotError> {
    Workbook::open(source)?.load_case(case_id, time_limit)
}

fn table_from_range(case_id: &str, range: &Range<Data>) -> Result<TimeTable, PlotError> {
    let malformed = |reason: &str| PlotError::MalformedTable {
        case: case_id.to_string(),
        reason: reason.to_string(),
    };
    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Err(malformed("the sheet is empty")),
    };
    let time_idx = header
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or_else(|| malformed("no Time column"))?;

    // (sheet column index, name) of the value columns, first occurrence wins
    let mut value_columns: Vec<(usize, String)> = Vec::new();
    for (idx, name) in header.iter().enumerate() {
        if idx == time_idx || name.is_empty() {
            continue;
        }
        if value_columns.iter().any(|(_, n)| n == name) {
            warn!("case {}: duplicate column {} ignored", case_id, name);
            continue;
        }
        value_columns.push((idx, name.clone()));
    }

    let names = value_columns.iter().map(|(_, n)| n.clone()).collect();
    let mut table = TimeTable::new(names, range.height().saturating_sub(1));
    let mut values: Vec<f64> = Vec::with_capacity(value_columns.len());
    for cells in rows {
        let time = cells.get(time_idx).map_or(f64::NAN, cell_to_f64);
        values.clear();
        values.extend(
            value_columns
                .iter()
                .map(|(idx, _)| cells.get(*idx).map_or(f64::NAN, cell_to_f64)),
        );
        table.push_row(time, &values);
    }
    Ok(table)
}

/// numeric cells as f64, numeric text is accepted, anything else is NAN
fn cell_to_f64(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
