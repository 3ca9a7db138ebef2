mod cli;
mod clusters_cmd;
mod crop_cmd;
mod info_cmd;
mod page_range;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
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

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Info {
            ref file,
            ref format,
        } => info_cmd::run(file, format),
        cli::Commands::Clusters {
            ref file,
            split_odd_even,
            ref exclude,
            ref format,
        } => clusters_cmd::run(file, split_odd_even, exclude.as_deref(), format),
        cli::Commands::Crop {
            ref file,
            ref output,
            ref plan,
            ref ratio,
            ref exclude,
        } => crop_cmd::run(file, output, plan.as_deref(), ratio, exclude.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
