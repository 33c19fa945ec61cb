/// CLI argument parsing using clap
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pi-sentinel",
    version,
    about = "Risk-ranked personal information scanner for source repositories",
    long_about = "Scans source-code repositories for personal information\n\
                  Detects: Australian TFN, Medicare, ABN, ACN, BSB, plus emails,\n\
                  phone numbers, credit cards, and leaked secrets\n\
                  Emits a risk-ranked JSON artefact for compliance review"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a repository for personal information
    Scan {
        /// Repository HTTPS URL
        #[arg(long, value_name = "URL")]
        repo: Option<String>,

        /// File listing repository URLs, one per line
        #[arg(long, value_name = "FILE")]
        repo_list: Option<PathBuf>,

        /// YAML configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Path of the JSON scan artefact
        #[arg(long, value_name = "PATH", default_value = "scan-results.json")]
        output: PathBuf,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a report from a scan artefact
    Report {
        /// Scan artefact (JSON) produced by `scan`
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Report format
        #[arg(long, value_name = "FORMAT", default_value = "html")]
        format: ReportFormat,

        /// Output path (defaults to pi-sentinel-report.<ext>)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print version and build information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Html,
    Csv,
    Sarif,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Sarif => "sarif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_with_repo() {
        let cli = Cli::try_parse_from(["pi-sentinel", "scan", "--repo", "https://github.com/a/b"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_scan_default_output() {
        let cli =
            Cli::try_parse_from(["pi-sentinel", "scan", "--repo", "https://github.com/a/b"])
                .unwrap();
        if let Some(Commands::Scan { output, .. }) = cli.command {
            assert_eq!(output, PathBuf::from("scan-results.json"));
        } else {
            panic!("expected scan command");
        }
    }

    #[test]
    fn test_report_requires_input() {
        let cli = Cli::try_parse_from(["pi-sentinel", "report"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_report_format_values() {
        for format in ["html", "csv", "sarif"] {
            let cli = Cli::try_parse_from([
                "pi-sentinel",
                "report",
                "--input",
                "results.json",
                "--format",
                format,
            ]);
            assert!(cli.is_ok(), "format {} should parse", format);
        }

        let bad = Cli::try_parse_from([
            "pi-sentinel",
            "report",
            "--input",
            "results.json",
            "--format",
            "pdf",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_version_command() {
        let cli = Cli::try_parse_from(["pi-sentinel", "version"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_no_arguments_is_ok_with_no_command() {
        let cli = Cli::try_parse_from(["pi-sentinel"]).unwrap();
        assert!(cli.command.is_none());
    }
}
