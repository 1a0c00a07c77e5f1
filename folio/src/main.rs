mod cli;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use folio::pipeline::{BatchRunner, ConfigStore, Pipeline, PipelineResult};

use crate::cli::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every page of every stage succeeded
fn run(args: &CliArgs) -> PipelineResult<bool> {
    let store = ConfigStore::new(&args.config_dir);
    if args.dump_conf {
        let written = store.dump_defaults()?;
        info!("{} default file(s) written to {}", written.len(), store.dir().display());
        return Ok(true);
    }

    let stages = args.stages();
    if stages.is_empty() {
        warn!("no stage selected (use --pdf, --image, --chronicle, --ocr or --nlp)");
        return Ok(true);
    }

    let config = store.load_all()?;
    let runner = BatchRunner::new(args.jobs)?;
    info!("{} worker thread(s)", runner.threads());

    let mut pipeline = Pipeline::new(config, runner)
        .with_format(args.image_type.into())?
        .with_dpi(args.dpi);
    if let Some(lang) = &args.lang {
        pipeline = pipeline.with_lang(lang);
    }

    let reports = pipeline.run(&args.input, &args.output, &stages)?;

    let mut success = true;
    for (stage, report) in &reports {
        for (path, message) in &report.failed {
            error!("{}: {}: {}", stage, path.display(), message);
        }
        success &= report.is_success();
    }
    Ok(success)
}
