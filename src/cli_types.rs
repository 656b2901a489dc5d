use clap::Args;
use nbcheck_lib::config::Config;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Notebooks or directories to check (default: paths from config, or "notebooks")
    #[arg(required = false)]
    pub paths: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Kernel language to check; notebooks declaring another language are skipped
    #[arg(long)]
    pub language: Option<String>,

    /// Checker command, split on whitespace; the temp file path is appended
    #[arg(long, value_name = "CMD")]
    pub tool: Option<String>,

    /// Time limit per checker invocation in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Exclude specific files or directories (comma-separated glob patterns)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Do not respect .gitignore files when scanning directories
    #[arg(
        long,
        help = "Do not respect .gitignore files when scanning directories (does not apply to explicitly provided paths)"
    )]
    pub no_respect_gitignore: bool,

    /// Output format for the report
    #[arg(long, value_parser = ["text", "json", "github"],
          help = "Output format (default: text, or output-format in config)")]
    pub output_format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print nothing; only the exit status reports the result
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CheckArgs {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(tool) = &self.tool {
            config.checker.command = tool.split_whitespace().map(String::from).collect();
        }
        if let Some(timeout) = self.timeout {
            config.checker.timeout = timeout;
        }
        if let Some(exclude) = &self.exclude {
            config.exclude.extend(
                exclude
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from),
            );
        }
        if self.no_respect_gitignore {
            config.respect_gitignore = false;
        }
        if let Some(format) = &self.output_format {
            config.output_format = format.clone();
        }
    }

    /// Paths to scan: the command line wins over the config file.
    pub fn resolve_paths(&self, config: &Config) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            config.paths.iter().map(PathBuf::from).collect()
        } else {
            self.paths.clone()
        }
    }
}
