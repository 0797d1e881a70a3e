mod cli_args;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log;
use std::process;

use cli_args::Cli;
use xmerge_core::{AppError, MergeConfig};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let core_err = e.downcast_ref::<xmerge_core::AppError>();
            let exit_code = match core_err {
                Some(AppError::Config(_)) => 1,
                Some(AppError::PartSize(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::NonUtf8 { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::DirCreation { .. }) => 2,
                Some(AppError::WalkDir(_)) => 2,
                Some(_) => 1,
                None => 1,
            };

            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    let project_root = MergeConfig::determine_project_root(cli.project_root.as_ref())
        .context("Failed to determine project root")?;
    let config = MergeConfig::for_root(project_root);

    log::debug!("Running merge with config: {:?}", config);
    let report = xmerge_core::merge_project(&config)
        .context("Failed to merge project files")?;

    if !quiet {
        println!(
            "{} Done! Merged {} files into {} part file(s) in {}",
            "✨".green(),
            report.files_merged.to_string().cyan(),
            report.parts_written.to_string().cyan(),
            report.output_dir.display().to_string().blue()
        );
    }
    Ok(())
}
