//! testscope binary
//!
//! Selects the end-to-end tests relevant to the current change, writes them to
//! a test list, and hands that list to the test runner.

use clap::Parser;
use std::process::ExitCode;
use testscope::changes::GitCli;
use testscope::cli::{Cli, Command, generate_config_template};
use testscope::config::Config;
use testscope::error::{AppError, AppResult};
use testscope::pipeline::{self, RunSettings};
use testscope::runner::CommandRunner;
use testscope::telemetry;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "testscope failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> AppResult<u8> {
    match cli.command {
        Command::Config { output } => {
            let template = generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template).map_err(|source| AppError::ArtifactWrite {
                        path: path.clone(),
                        source,
                    })?;
                    eprintln!("Configuration template written to {}", path);
                }
                None => print!("{}", template),
            }
            Ok(0)
        }
        Command::Run(args) => {
            let config = Config::from_file(&cli.config)?;
            telemetry::init(&config.observability.log_level);

            let settings = RunSettings::from(args);
            tracing::info!(
                repo = %settings.repo_path.display(),
                config = %cli.config,
                dry_run = settings.dry_run,
                "Starting test selection"
            );

            let provider = GitCli::new(&settings.repo_path);
            let runner = CommandRunner::new(config.runner.clone());
            let outcome = pipeline::run(
                &settings,
                &config,
                &provider,
                &runner,
                &mut std::io::stdout().lock(),
            )?;

            // Exit codes outside 0..=255 cannot be represented; report plain failure
            Ok(u8::try_from(outcome.exit_code()).unwrap_or(1))
        }
    }
}
