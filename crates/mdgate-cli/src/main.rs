use anyhow::{Context, Result};
use clap::Parser;

use mdgate_core::policy::Verdict;
use mdgate_core::report::render;

mod args;
mod settings;

/// Fatal verdict: the build must stop.
const EXIT_BUILD_FAILED: i32 = 1;
/// Invalid configuration or phpmd could not be located.
const EXIT_SETUP: i32 = 2;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = args::Args::parse();

    let task = match settings::build_task(&args) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(EXIT_SETUP);
        }
    };

    let report = match task.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            let code = if e.is_setup_error() {
                EXIT_SETUP
            } else {
                EXIT_BUILD_FAILED
            };
            std::process::exit(code);
        }
    };

    let output = match args.summary {
        args::SummaryFormat::Json => render::render_json(&report)?,
        args::SummaryFormat::Text => render::render_text(&report),
    };

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write summary to {}", path.display()))?,
        None => print!("{output}"),
    }

    if let Verdict::Fail { message } = &report.verdict {
        eprintln!("BUILD FAILED: {message}");
        std::process::exit(EXIT_BUILD_FAILED);
    }
    Ok(())
}
