use anyhow::Context;
use clap::Parser;
use prompter::args::CommandLine;
use prompter::config::{Config, CredentialSource, KeyringSource};
use prompter::logging::init_tracing;
use prompter::session::{run_session, SessionPlan};
use std::path::PathBuf;
use tracing::info;

/// Run a command in a pty and answer its password and OTP prompts.
///
/// One argument must name the account as `{account}`; it is replaced by the
/// bare name before the command runs.
#[derive(Parser)]
#[command(name = "prompter", version)]
struct Cli {
    /// Config file (default: <config dir>/prompter/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Credential-store service name
    #[arg(long)]
    service: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not echo {inserted ...} markers to the terminal
    #[arg(long)]
    quiet: bool,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(i32::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u32> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(service) = cli.service {
        config.service = service;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }
    if cli.quiet {
        config.announce = false;
    }
    config.validate()?;

    init_tracing(config.log_file.as_deref()).context("Failed to open log file")?;

    let line = CommandLine::parse(&cli.command)?;
    info!(account = %line.account, command = %line.command, "Wrapping command");

    let credentials = KeyringSource::new(config.service.clone()).lookup(&line.account)?;

    let code = run_session(SessionPlan {
        line,
        credentials,
        otp_offsets: config.otp_offsets,
        announce: config.announce,
    })?;
    Ok(code)
}
