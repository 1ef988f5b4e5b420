use anyhow::Context;
use caseplot::cli::{parse_cli, prepare_outdir};
use caseplot::{run_batch, run_cases, BatchConfig};
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_cli();
    info!(
        "plot {} into {}",
        args.workbook.display(),
        args.outdir.display()
    );
    // an unusable directory shows up as failed exports in the report
    if let Err(e) = prepare_outdir(&args.outdir) {
        warn!("could not create {}: {}", args.outdir.display(), e);
    }

    let config = BatchConfig::default().with_time_limit(args.time_limit);
    let report = match &args.cases {
        Some(cases) => run_cases(&args.workbook, cases, &args.outdir, &config),
        None => run_batch(&args.workbook, &args.outdir, &config),
    }
    .with_context(|| format!("could not read {}", args.workbook.display()))?;

    println!("{}", report);
    Ok(())
}
