use std::io;
use std::process;
use tracing_subscriber::EnvFilter;
use vibebench::cli::{Args, Command};

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Install the log subscriber. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
