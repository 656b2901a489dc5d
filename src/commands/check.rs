//! Handler for the `check` command (also the default when no subcommand is given).

use anyhow::Context;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use nbcheck_lib::config::load_config;
use nbcheck_lib::exit_codes;
use nbcheck_lib::file_processor;
use nbcheck_lib::output::{OutputFormat, OutputWriter};

use crate::cli_types::CheckArgs;

/// Run a full check and return the process exit code.
///
/// # Errors
///
/// Configuration and discovery failures are returned; the caller reports them
/// and exits with the tool error code.
pub fn handle_check(args: &CheckArgs, interrupt: &AtomicBool) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("failed to determine the current directory")?;
    let (mut config, config_path) = load_config(args.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        log::info!("[nbcheck] Using configuration from {}", path.display());
    }

    args.apply_to(&mut config);
    config.validate()?;

    let format: OutputFormat = config.output_format.parse().map_err(anyhow::Error::msg)?;
    let paths = args.resolve_paths(&config);
    log::debug!(
        "[nbcheck] Checking {} with language '{}' and command {:?}",
        describe_paths(&paths),
        config.language,
        config.checker.command
    );

    let report = file_processor::run(&config, &paths, interrupt)?;

    let use_colors = !args.no_color && std::io::stdout().is_terminal();
    if !use_colors {
        colored::control::set_override(false);
    }
    let formatter = format.create_formatter(use_colors, config.report.error_length);
    OutputWriter::new(args.quiet)
        .writeln(&formatter.format_report(&report))
        .context("failed to write report")?;

    Ok(exit_codes::for_report(&report))
}

fn describe_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
