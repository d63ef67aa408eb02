use std::process::ExitCode;

use aws_facts_codedeploy::{cli::Cli, output, runner::run};
use clap::{Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let msg = e.render().to_string();
            output::emit(&mut std::io::stdout(), &output::failure(msg.trim()), false)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let (value, code) = match run(&cli).await {
        Ok(result) => (output::success(result), ExitCode::SUCCESS),
        Err(e) => (output::failure(&format!("{:#}", e)), ExitCode::FAILURE),
    };

    output::emit(&mut std::io::stdout(), &value, cli.pretty)?;
    Ok(code)
}
