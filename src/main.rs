use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use portsweep::cli::{self, Args};
use portsweep::error::ConfigError;
use portsweep::output::{self, OutputFormat};
use portsweep::scanner::run_scan;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            if e.downcast_ref::<ConfigError>().is_some() {
                eprintln!("{}", cli::usage());
                eprintln!("Example: portsweep 127.0.0.1 500");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = args.settings()?;
    let verbose = args.verbose(&settings);
    init_logging(verbose);

    let target = args.scan_target(&settings)?;
    let mut options = args.scan_options(&settings)?;
    let format = args.output_format(&settings)?;
    let interactive = format == OutputFormat::Plain && !args.quiet;
    options = options.with_live_discoveries(interactive);

    if interactive {
        let stdout = io::stdout();
        output::write_scan_header(&mut stdout.lock(), &target)?;
    }

    if interactive && verbose {
        let pb = ProgressBar::new(target.range().len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        options = options.with_progress(pb);
    }

    let summary = run_scan(&target, options).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(&mut out, &summary, format).context("failed to write scan results")?;
    out.flush()?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "portsweep=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
