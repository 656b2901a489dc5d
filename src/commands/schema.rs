//! Handler for the `schema` command.

use colored::*;
use schemars::schema_for;

use nbcheck_lib::config::Config;
use nbcheck_lib::exit_codes::exit;

/// JSON Schema of `.nbcheck.toml`, pretty-printed.
pub fn config_schema_json() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

/// Print the configuration schema to stdout.
pub fn handle_schema() {
    let schema_json = config_schema_json().unwrap_or_else(|e| {
        eprintln!("{}: Failed to serialize schema: {}", "Error".red().bold(), e);
        exit::tool_error();
    });
    println!("{schema_json}");
}
