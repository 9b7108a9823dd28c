//! Command-line interface components.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compliance-verifier")]
#[command(about = "Verify automotive compliance test reports and look up components")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file (defaults to the platform config dir if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON file with test procedures and components
    #[arg(long, global = true, value_name = "FILE")]
    pub knowledge_base: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract pass/fail results from report files or directories
    Verify {
        /// Report files or directories containing reports
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Look up a component by part number
    Component {
        /// Part number, case-insensitive
        part_number: String,
    },

    /// Show the test procedure for a keyword
    Procedure {
        /// Keyword such as "vibration" or "shock"
        keyword: String,
    },

    /// Show knowledge base and configuration statistics
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// Report file discovery
pub mod report_discovery {
    use crate::constants::REPORT_EXTENSIONS;
    use anyhow::{Context, Result};
    use std::path::{Path, PathBuf};
    use tracing::debug;

    fn has_report_extension(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| REPORT_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Expand the given paths into report files.
    ///
    /// Files are taken as given; directories are walked for files with a
    /// known report extension, sorted for a stable order.
    pub fn collect_reports(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut reports = Vec::new();

        for path in paths {
            if path.is_dir() {
                let mut found = Vec::new();
                for entry in walkdir::WalkDir::new(path) {
                    let entry = entry
                        .with_context(|| format!("Failed to walk {}", path.display()))?;
                    if entry.file_type().is_file() && has_report_extension(entry.path()) {
                        found.push(entry.into_path());
                    }
                }
                found.sort();
                debug!("Found {} reports under {}", found.len(), path.display());
                reports.extend(found);
            } else {
                reports.push(path.clone());
            }
        }

        Ok(reports)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify_command() {
        let args = Args::parse_from([
            "compliance-verifier",
            "verify",
            "a.log",
            "reports/",
            "--format",
            "json",
            "-v",
        ]);

        match args.command {
            Command::Verify { paths, format } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("Expected verify command, got {:?}", other),
        }
        assert_eq!(
            Args::parse_from(["compliance-verifier", "-v", "stats"]).get_log_level(),
            "debug"
        );
    }

    #[test]
    fn test_verify_requires_path() {
        assert!(Args::try_parse_from(["compliance-verifier", "verify"]).is_err());
    }
}
