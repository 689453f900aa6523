// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, parse arguments and hand off to the
//   UI layer, which dispatches the subcommand.
// - Any error ends the process with exit code 1 after being reported.

use clap::Parser;
use pasteup::{cli::Cli, ui};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so stdout stays clean for URLs and JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PASTEUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = ui::run(cli) {
        ui::report_error(&err);
        std::process::exit(1);
    }
}
