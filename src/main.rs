use clap::Parser;
use sortdir::cli::{Cli, report_error, run_cli};
use sortdir::config::Config;
use sortdir::output::OutputFormatter;
use sortdir::OrganizeError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&OrganizeError::from(e));
            return 1;
        }
    };
    OutputFormatter::configure(&config.output);

    let log_path = config.resolve_log_path(cli.path.as_deref(), cli.log_file.as_deref());
    tracing::debug!(log = %log_path.display(), "using move log");

    match run_cli(cli.sort_command(), &log_path, &config.output) {
        Ok(()) => 0,
        Err(e) => {
            report_error(&e);
            e.exit_code()
        }
    }
}

/// RUST_LOG wins; otherwise each -v raises the level from the default `warn`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
