use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nbcheck_lib::exit_codes::{self, exit};

mod cli_types;
mod commands;

use cli_types::CheckArgs;

#[derive(Parser)]
#[command(author, version, about = "Syntax-check the code cells of Jupyter notebooks", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,

    /// Command to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check notebooks (the default when no subcommand is given)
    Check(CheckArgs),
    /// Create a default .nbcheck.toml in the current directory
    Init,
    /// Print the JSON Schema of the configuration file
    Schema,
    /// Show version information
    Version,
}

fn init_logging(args: &CheckArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run_check(args: &CheckArgs) -> ! {
    init_logging(args);

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    if let Err(e) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        log::warn!("[nbcheck] Failed to register Ctrl-C handler: {e}");
    }

    match commands::check::handle_check(args, &interrupt) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            std::process::exit(exit_codes::TOOL_ERROR);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check(args)) => run_check(&args),
        None => run_check(&cli.check),
        Some(Commands::Init) => commands::init::handle_init(),
        Some(Commands::Schema) => commands::schema::handle_schema(),
        Some(Commands::Version) => commands::version::handle_version(),
    }

    exit::success();
}
