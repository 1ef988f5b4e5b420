use super::VERSION;
use clap::{value_t, App, Arg};
use log::info;
use std::path::{Path, PathBuf};

/// Arguments of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub workbook: PathBuf,
    pub outdir: PathBuf,
    pub time_limit: f64,
    /// Restrict the run to these cases, all sheets when None
    pub cases: Option<Vec<String>>,
}

/// Takes the CLI arguments that control the batch plotting of the workbook.
pub fn parse_cli() -> CliArgs {
    let arg_workbook = Arg::with_name("workbook")
        .help("workbook with one sheet per case (xlsx, xls, ods)")
        .short("f")
        .long("workbook")
        .takes_value(true)
        .default_value("data.xlsx");
    let arg_outdir = Arg::with_name("outdir")
        .help("directory for the charts, created if missing")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value("output");
    let arg_time_limit = Arg::with_name("time_limit")
        .help("drop the rows after this time, in seconds; also the end of the time axis")
        .short("t")
        .long("time-limit")
        .takes_value(true)
        .default_value("200");
    let arg_case = Arg::with_name("case")
        .help("plot only this case (sheet name), can be repeated")
        .short("c")
        .long("case")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1);
    let cli_args = App::new("caseplot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot every case of a workbook, one chart per quantity group")
        .arg(arg_workbook)
        .arg(arg_outdir)
        .arg(arg_time_limit)
        .arg(arg_case)
        .get_matches();
    let time_limit = value_t!(cli_args, "time_limit", f64).unwrap_or_else(|e| e.exit());
    let cases = cli_args
        .values_of("case")
        .map(|v| v.map(String::from).collect());
    CliArgs {
        workbook: PathBuf::from(cli_args.value_of("workbook").unwrap_or_default()),
        outdir: PathBuf::from(cli_args.value_of("outdir").unwrap_or_default()),
        time_limit,
        cases,
    }
}

/// Creates the output directory if it does not exist yet.
pub fn prepare_outdir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        info!("output directory {} already exists, charts will be overwritten", dir.display());
        return Ok(());
    }
    std::fs::create_dir_all(dir)?;
    info!("created output directory {}", dir.display());
    Ok(())
}
