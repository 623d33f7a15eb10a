use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use video_length::args::Args;
use video_length::probe::Ffprobe;
use video_length::report::{render_report, write_report};
use video_length::scanner::Scanner;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments; clap exits on its own when the directory is missing
    let args = Args::parse();

    init_tracing();

    println!("Selected directory: {}", args.directory.display());

    let scanner = Scanner::new(Ffprobe::default());
    let result = scanner
        .scan(&args.directory)
        .with_context(|| format!("Failed to scan {}", args.directory.display()))?;

    // Only write once the whole walk has succeeded
    let report = render_report(&args.directory, &result);
    let report_path = write_report(&args.directory, &report)
        .with_context(|| format!("Failed to write report into {}", args.directory.display()))?;

    println!("Report generated at: {}", report_path.display());

    Ok(())
}
