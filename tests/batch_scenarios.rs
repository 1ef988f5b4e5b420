mod common;

use caseplot::{list_cases, load_case, run_batch, run_cases, BatchConfig, PlotError};
use common::{file_names, ramp_rows, text_lines, write_workbook, Sheet};

#[test]
fn two_methods_one_group_time_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "1",
            header: vec!["Time", "STC_Y", "PSTC_Y"],
            rows: ramp_rows(2, 250, 10),
        }],
    );

    let table = load_case(&source, "1", 200.).unwrap();
    assert_eq!(table.len(), 21);
    assert_eq!(table.time.last(), Some(&200.));

    let report = run_batch(&source, &out, &BatchConfig::default()).unwrap();
    assert_eq!(report.processed_cases, vec!["1"]);
    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.exported[0].group, "Y");
    assert!(report.errors.is_empty());
    // the five other groups have no column in this sheet
    assert_eq!(report.skipped_groups.len(), 5);
    assert_eq!(
        file_names(&out),
        vec!["case1_Y.pdf", "case1_Y.png", "case1_Y.svg", "case1_Y_thumb.png"]
    );
    let svg = std::fs::read_to_string(out.join("case1_Y.svg")).unwrap();
    let labels = text_lines(&svg);
    assert!(labels.contains(&"STC"));
    assert!(labels.contains(&"PSTC"));
    assert!(!labels.contains(&"ASTC4"));
    // the PDF carries the same text, not just the lines
    let pdf = std::fs::read(out.join("case1_Y.pdf")).unwrap();
    assert!(pdf.windows(5).any(|w| w == b"/Font"));
}

#[test]
fn sheet_without_time_is_malformed_but_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "bad",
            header: vec!["STC_Y", "PSTC_Y"],
            rows: vec![vec![1., 2.], vec![3., 4.]],
        }],
    );

    let report = run_batch(&source, dir.path(), &BatchConfig::default()).unwrap();
    assert!(report.processed_cases.is_empty());
    assert!(report.exported.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].group, None);
    assert!(matches!(report.errors[0].error, PlotError::MalformedTable { .. }));
    assert_eq!(file_names(dir.path()), vec!["data.xlsx"]);
}

#[test]
fn missing_group_is_skipped_and_others_still_run() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "4",
            header: vec!["Time", "STC_Y", "ASTC4_wing2", "PSTC_Rotation_1"],
            rows: ramp_rows(3, 200, 20),
        }],
    );
    let out = dir.path().join("charts");
    std::fs::create_dir(&out).unwrap();

    let report = run_batch(&source, &out, &BatchConfig::default()).unwrap();
    let exported: Vec<&str> = report.exported.iter().map(|r| r.group.as_str()).collect();
    // declared group order, not sheet column order
    assert_eq!(exported, vec!["Y", "Rotation_1", "wing2"]);
    let skipped: Vec<&str> = report.skipped_groups.iter().map(|s| s.group.as_str()).collect();
    assert_eq!(skipped, vec!["Rotation_3", "wing1", "wing3"]);
    assert_eq!(file_names(&out).len(), 12);
}

#[test]
fn unknown_method_prefix_renders() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "1",
            header: vec!["Time", "XYZ_Y"],
            rows: ramp_rows(1, 100, 10),
        }],
    );
    let mut config = BatchConfig::default();
    config.groups = caseplot::GroupMap::new(vec![caseplot::QuantityGroup::new(
        "Y",
        "Y displacement",
        &["STC_Y", "XYZ_Y"],
    )]);

    let report = run_batch(&source, dir.path(), &config).unwrap();
    assert!(report.errors.is_empty());
    assert_eq!(report.exported.len(), 1);
    assert!(report.exported[0].artifacts.png.is_file());
}

#[test]
fn cases_run_in_isolation() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[
            Sheet {
                name: "2",
                header: vec!["STC_Y"],
                rows: vec![vec![1.]],
            },
            Sheet {
                name: "1",
                header: vec!["Time", "STC_wing1"],
                rows: ramp_rows(1, 200, 50),
            },
        ],
    );
    assert_eq!(list_cases(&source).unwrap(), vec!["2", "1"]);

    let report = run_batch(&source, dir.path(), &BatchConfig::default()).unwrap();
    assert_eq!(report.processed_cases, vec!["1"]);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].case, "2");
    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.exported[0].case, "1");
}

#[test]
fn unwritable_output_fails_each_group_but_not_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "1",
            header: vec!["Time", "STC_Y", "STC_wing1"],
            rows: ramp_rows(2, 200, 10),
        }],
    );
    let missing = dir.path().join("nowhere");

    let report = run_batch(&source, &missing, &BatchConfig::default()).unwrap();
    assert_eq!(report.processed_cases, vec!["1"]);
    assert!(report.exported.is_empty());
    assert_eq!(report.errors.len(), 2);
    assert!(report
        .errors
        .iter()
        .all(|e| matches!(e.error, PlotError::ExportFailed { .. })));
    assert!(!missing.exists());
}

#[test]
fn selected_cases_and_unknown_case() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[
            Sheet {
                name: "1",
                header: vec!["Time", "STC_Y"],
                rows: ramp_rows(1, 200, 20),
            },
            Sheet {
                name: "2",
                header: vec!["Time", "STC_Y"],
                rows: ramp_rows(1, 200, 20),
            },
        ],
    );
    let cases = vec!["2".to_string(), "9".to_string()];

    let report = run_cases(&source, &cases, dir.path(), &BatchConfig::default()).unwrap();
    assert_eq!(report.processed_cases, vec!["2"]);
    assert_eq!(report.exported.len(), 1);
    assert!(matches!(report.errors[0].error, PlotError::CaseNotFound(ref c) if c == "9"));
    assert!(!dir.path().join("case1_Y.png").exists());
}

#[test]
fn unreadable_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("missing.xlsx");
    let err = run_batch(&source, dir.path(), &BatchConfig::default()).unwrap_err();
    assert!(err.is_fatal());

    let not_a_workbook = dir.path().join("notes.txt");
    std::fs::write(&not_a_workbook, "Time,STC_Y\n0,1\n").unwrap();
    let err = run_batch(&not_a_workbook, dir.path(), &BatchConfig::default()).unwrap_err();
    assert!(matches!(err, PlotError::SourceUnavailable { .. }));
}

#[test]
fn shorter_time_window() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_workbook(
        dir.path(),
        "data.xlsx",
        &[Sheet {
            name: "1",
            header: vec!["Time", "PSTC_Y"],
            rows: ramp_rows(1, 250, 10),
        }],
    );
    let table = load_case(&source, "1", 100.).unwrap();
    assert_eq!(table.len(), 11);

    let config = BatchConfig::default().with_time_limit(100.);
    let report = run_batch(&source, dir.path(), &config).unwrap();
    assert_eq!(report.exported.len(), 1);
}
