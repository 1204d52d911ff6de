//! Command-line argument parsing

use crate::config::DEFAULT_REGISTRY;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "docker-image-checker")]
#[command(about = "Check whether Docker images exist in a registry")]
#[command(version)]
pub struct Args {
    /// Path to a file with one image reference per line
    #[arg(
        long = "file",
        short = 'f',
        help = "File with one image reference per line; reads stdin when omitted"
    )]
    pub file: Option<String>,

    /// Registry address
    #[arg(
        long = "registry",
        short = 'r',
        default_value = DEFAULT_REGISTRY,
        help = "Registry base URL"
    )]
    pub registry: String,

    /// Registry username
    #[arg(
        long = "username",
        short = 'u',
        help = "Username for registry authentication"
    )]
    pub username: Option<String>,

    /// Registry password
    #[arg(
        long = "password",
        short = 'p',
        help = "Password for registry authentication"
    )]
    pub password: Option<String>,

    /// Where the raw image list is written before each scan
    #[arg(
        long = "save-file",
        default_value = "docker-images.txt",
        help = "Audit file the raw image list is written to before scanning"
    )]
    pub save_file: String,

    /// Skip writing the audit file
    #[arg(long = "no-save", help = "Do not write the image list audit file")]
    pub no_save: bool,

    /// Timeout in seconds for network operations
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "30",
        help = "Timeout for each network request in seconds"
    )]
    pub timeout: u64,

    /// Skip TLS verification
    #[arg(
        long = "skip-tls",
        short = 'k',
        help = "Skip TLS certificate verification"
    )]
    pub skip_tls: bool,

    /// Output format for the final report
    #[arg(
        long = "output",
        short = 'o',
        default_value = "text",
        help = "Report format: text, json"
    )]
    pub output: String,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet output
    #[arg(long = "quiet", short = 'q', help = "Suppress progress and summary output")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate arguments
    pub fn validate(&self) -> Result<(), String> {
        if let Some(file) = &self.file {
            if !std::path::Path::new(file).exists() {
                return Err(format!("File does not exist: {}", file));
            }
        }

        if self.timeout == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        match self.output.as_str() {
            "text" | "json" => {}
            _ => return Err("Output format must be one of: text, json".to_string()),
        }

        if self.verbose && self.quiet {
            return Err("--verbose and --quiet are mutually exclusive".to_string());
        }

        Ok(())
    }

    /// Fill missing credentials from environment variables
    pub fn from_env(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("DOCKER_USERNAME").ok();
        }

        if self.password.is_none() {
            self.password = std::env::var("DOCKER_PASSWORD").ok();
        }

        self
    }
}
