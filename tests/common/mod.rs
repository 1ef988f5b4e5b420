//! Shared fixtures: workbooks written at test time.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

/// One sheet: name, header, rows.
pub struct Sheet<'a> {
    pub name: &'a str,
    pub header: Vec<&'a str>,
    pub rows: Vec<Vec<f64>>,
}

/// Rows with time 0..=t_end step `step`, each column a simple function of time.
pub fn ramp_rows(n_columns: usize, t_end: u32, step: u32) -> Vec<Vec<f64>> {
    (0..=t_end)
        .step_by(step as usize)
        .map(|t| {
            let t = t as f64;
            let mut row = vec![t];
            row.extend((0..n_columns).map(|c| (c as f64 + 1.) * (t / 25.).sin()));
            row
        })
        .collect()
}

pub fn write_workbook(dir: &Path, file: &str, sheets: &[Sheet]) -> PathBuf {
    let path = dir.join(file);
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();
        for (c, h) in sheet.header.iter().enumerate() {
            worksheet.write_string(0, c as u16, *h).unwrap();
        }
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                worksheet.write_number(r as u32 + 1, c as u16, *v).unwrap();
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Trimmed lines of an SVG document; text content sits on its own line.
pub fn text_lines(svg: &str) -> Vec<&str> {
    svg.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
