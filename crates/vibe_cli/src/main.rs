//! VibeTrail CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments (unknown vibe, bad index, bad settings)
//! - 3: No alternative stop found
//! - 4: Trail unavailable
//! - 5: Storage error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vibe_core::TrailError;
use vibe_store::StoreError;

mod commands;
mod output;
mod settings;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const NO_ALTERNATIVE: u8 = 3;
    pub const TRAIL_UNAVAILABLE: u8 = 4;
    pub const STORAGE_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let directives = if cli.quiet {
        "error"
    } else if cli.verbose {
        "vibe=debug,warn"
    } else {
        "vibe=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    match run(cli).await {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings::Settings::load(&cli)?;
    let ctx = commands::Context::new(settings, cli.format);

    match cli.command {
        Commands::Vibes => commands::vibes::execute(&ctx),
        Commands::Generate(args) => commands::generate::execute(args, &ctx).await,
        Commands::Shuffle(args) => commands::shuffle::execute(args, &ctx).await,
        Commands::Directions(args) => commands::directions::execute(args, &ctx).await,
        Commands::Saved(args) => commands::saved::execute(args, &ctx),
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<TrailError>() {
        return match err {
            TrailError::UnknownVibe(_)
            | TrailError::EmptyVibeSet
            | TrailError::InvalidIndex { .. }
            | TrailError::InvalidTrail(_)
            | TrailError::Config(_) => ExitCodes::INVALID_ARGS,
            TrailError::NoAlternative { .. } => ExitCodes::NO_ALTERNATIVE,
            TrailError::TrailUnavailable(_)
            | TrailError::InsufficientCandidates
            | TrailError::ProviderUnavailable(_)
            | TrailError::ProviderTimeout(_) => ExitCodes::TRAIL_UNAVAILABLE,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }

    if e.downcast_ref::<StoreError>().is_some() {
        return ExitCodes::STORAGE_ERROR;
    }

    if e.downcast_ref::<settings::SettingsError>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }

    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_trail_errors_map_to_codes() {
        let cases = [
            (TrailError::UnknownVibe("moody".into()), ExitCodes::INVALID_ARGS),
            (TrailError::InvalidIndex { index: 7, len: 4 }, ExitCodes::INVALID_ARGS),
            (TrailError::NoAlternative { index: 1 }, ExitCodes::NO_ALTERNATIVE),
            (TrailError::TrailUnavailable("down".into()), ExitCodes::TRAIL_UNAVAILABLE),
        ];
        for (err, code) in cases {
            assert_eq!(categorize_error(&anyhow::Error::new(err)), code);
        }
    }

    #[test]
    fn test_context_does_not_hide_kind() {
        let err: anyhow::Result<()> =
            Err(TrailError::NoAlternative { index: 0 }).context("Failed to shuffle stop 0");
        assert_eq!(categorize_error(&err.unwrap_err()), ExitCodes::NO_ALTERNATIVE);
    }

    #[test]
    fn test_store_and_other_errors() {
        let store = anyhow::Error::new(StoreError::NotFound(uuid::Uuid::nil()));
        assert_eq!(categorize_error(&store), ExitCodes::STORAGE_ERROR);
        assert_eq!(categorize_error(&anyhow::anyhow!("boom")), ExitCodes::GENERAL_ERROR);
    }
}
