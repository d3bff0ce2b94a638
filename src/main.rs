//! Binary entrypoint for the `retime` CLI.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use retime::cli::Cli;

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let summary = retime::rewrite_file(&cli.file, &cli.tag, &cli.member)
        .with_context(|| format!("failed to rewrite {}", cli.file.display()))?;
    tracing::debug!(
        decode = summary.decode_rewrites,
        encode = summary.encode_rewrites,
        "rewrite complete"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
