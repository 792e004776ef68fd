// src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { recipe } => commands::cmd_info(&recipe),
        Commands::Validate { recipe, source_dir } => {
            commands::cmd_validate(&recipe, source_dir.as_deref())
        }
        Commands::Build {
            recipe,
            settings,
            kitchen,
            options,
        } => commands::cmd_build(&recipe, &settings, &kitchen, &options),
        Commands::Test {
            recipe,
            settings,
            kitchen,
        } => commands::cmd_test(&recipe, &settings, &kitchen),
        Commands::Package {
            recipe,
            settings,
            kitchen,
            options,
        } => commands::cmd_package(&recipe, &settings, &kitchen, &options),
        Commands::Create {
            recipe,
            settings,
            kitchen,
            options,
            skip_tests,
        } => commands::cmd_create(&recipe, &settings, &kitchen, &options, skip_tests),
        Commands::PackageId { recipe, settings } => commands::cmd_package_id(&recipe, &settings),
        Commands::Docs { doxygen } => commands::cmd_docs(doxygen),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Exit with the failing tool's own code when there is one
fn exit_code_for(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<backport_recipe::Error>())
        .map(backport_recipe::Error::exit_code)
        .unwrap_or(1);
    match u8::try_from(code) {
        Ok(0) | Err(_) => 1,
        Ok(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_of_tool_failure() {
        let err: anyhow::Result<()> = Err(backport_recipe::Error::CommandFailed {
            tool: "cmake".to_string(),
            code: 1,
        })
        .context("Failed to create Backport/0.1.0");
        assert_eq!(exit_code_for(&err.unwrap_err()), 1);

        let err = anyhow::Error::new(backport_recipe::Error::CommandFailed {
            tool: "test-package".to_string(),
            code: 42,
        });
        assert_eq!(exit_code_for(&err), 42);
    }

    #[test]
    fn test_exit_code_of_other_errors() {
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
        let err = anyhow::Error::new(backport_recipe::Error::CommandFailed {
            tool: "doxygen".to_string(),
            code: 300,
        });
        assert_eq!(exit_code_for(&err), 1);
    }
}
