#![forbid(unsafe_code)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = reel_showcase::Cli::parse();
    let stdout = std::io::stdout();
    if let Err(error) = reel_showcase::run(&cli, &mut stdout.lock()) {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
