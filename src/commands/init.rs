//! Handler for the `init` command.

use colored::*;
use std::path::Path;

use nbcheck_lib::exit_codes::exit;
use nbcheck_lib::init::create_default_config;

/// Write a default `.nbcheck.toml` in the current directory.
pub fn handle_init() {
    let path = Path::new(".nbcheck.toml");
    match create_default_config(path) {
        Ok(true) => {
            println!("Created default configuration file: {}", path.display());
        }
        Ok(false) => {
            eprintln!(
                "{}: Configuration file {} already exists",
                "Error".red().bold(),
                path.display()
            );
            exit::tool_error();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
