use anyhow::{Context, Result};
/// YAML configuration for PI-Sentinel
///
/// Loaded once per invocation, validated fast, and never mutated after.
/// Every component receives a shared read-only view.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration validation failure naming the offending key
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scanner.workers must be at least 1")]
    InvalidWorkers,

    #[error("scanner.max_file_size must be greater than 0")]
    InvalidMaxFileSize,

    #[error("risk.thresholds must be strictly descending and non-negative")]
    InvalidThresholds,

    #[error("risk.multipliers.{0} must be non-negative")]
    InvalidMultiplier(&'static str),

    #[error("risk.co_occurrence.min_occurrences must be at least 2")]
    InvalidMinOccurrences,

    #[error("report.formats contains unsupported format '{0}'")]
    InvalidReportFormat(String),

    #[error("logging.level must be one of debug|info|warn|error, got '{0}'")]
    InvalidLogLevel(String),

    #[error("github.clone_depth must be at least 1")]
    InvalidCloneDepth,
}

/// Root configuration record
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Worker thread count
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Extensions to scan
    #[serde(default = "default_file_types")]
    pub file_types: Vec<String>,

    /// Exclude globs or path substrings
    #[serde(default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,

    /// Per-file size cap in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Line distance for the co-occurrence window
    #[serde(default = "default_proximity_distance")]
    pub proximity_distance: usize,

    /// Optional external secrets rule table (TOML)
    #[serde(default)]
    pub secrets_rules: Option<PathBuf>,

    /// Per-type validator tuning
    #[serde(default)]
    pub validators: HashMap<String, ValidatorTuning>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            file_types: default_file_types(),
            exclude_paths: default_exclude_paths(),
            max_file_size: default_max_file_size(),
            proximity_distance: default_proximity_distance(),
            secrets_rules: None,
            validators: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorTuning {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub strict_mode: bool,

    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

impl Default for ValidatorTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            strict_mode: false,
            min_confidence: default_min_confidence(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub multipliers: Multipliers,

    #[serde(default)]
    pub co_occurrence: CoOccurrence,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            multipliers: Multipliers::default(),
            co_occurrence: CoOccurrence::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_critical")]
    pub critical: f64,

    #[serde(default = "default_high")]
    pub high: f64,

    #[serde(default = "default_medium")]
    pub medium: f64,

    #[serde(default = "default_low")]
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            high: default_high(),
            medium: default_medium(),
            low: default_low(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Multipliers {
    #[serde(default = "default_prod_multiplier")]
    pub production: f64,

    #[serde(default = "default_staging_multiplier")]
    pub staging: f64,

    #[serde(default = "default_dev_multiplier")]
    pub development: f64,

    #[serde(default = "default_test_multiplier")]
    pub test: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            production: default_prod_multiplier(),
            staging: default_staging_multiplier(),
            development: default_dev_multiplier(),
            test: default_test_multiplier(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoOccurrence {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Column distance on the same line
    #[serde(default = "default_proximity_window")]
    pub proximity_window: usize,

    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,

    #[serde(default = "default_score_boost")]
    pub score_boost: f64,
}

impl Default for CoOccurrence {
    fn default() -> Self {
        Self {
            enabled: true,
            proximity_window: default_proximity_window(),
            min_occurrences: default_min_occurrences(),
            score_boost: default_score_boost(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_formats")]
    pub formats: Vec<String>,

    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            formats: default_report_formats(),
            output_directory: default_output_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Defaults to the GITHUB_TOKEN environment variable
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,

    /// Seconds
    #[serde(default = "default_clone_timeout")]
    pub clone_timeout: u64,

    #[serde(default = "default_temp_directory")]
    pub temp_directory: PathBuf,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            rate_limit: default_rate_limit(),
            clone_depth: default_clone_depth(),
            clone_timeout: default_clone_timeout(),
            temp_directory: default_temp_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub output_file: Option<PathBuf>,

    /// Megabytes before rotation
    #[serde(default = "default_log_max_size")]
    pub max_size: u64,

    #[serde(default = "default_log_max_backups")]
    pub max_backups: u32,

    /// Days
    #[serde(default = "default_log_max_age")]
    pub max_age: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            output_file: None,
            max_size: default_log_max_size(),
            max_backups: default_log_max_backups(),
            max_age: default_log_max_age(),
        }
    }
}

// Default value functions

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

fn default_file_types() -> Vec<String> {
    [
        "go", "rs", "py", "js", "ts", "java", "kt", "rb", "php", "cs", "cpp", "c", "h", "swift",
        "scala", "sql", "sh", "yaml", "yml", "json", "toml", "xml", "html", "env", "properties",
        "cfg", "conf", "ini", "txt", "md", "csv",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclude_paths() -> Vec<String> {
    [
        "vendor",
        "node_modules",
        ".git",
        "**/*.min.js",
        "**/*.lock",
        "**/dist/**",
        "**/build/**",
        "**/*.png",
        "**/*.jpg",
        "**/*.zip",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_proximity_distance() -> usize {
    10
}

fn default_min_confidence() -> f32 {
    0.8
}

fn default_critical() -> f64 {
    0.8
}

fn default_high() -> f64 {
    0.6
}

fn default_medium() -> f64 {
    0.4
}

fn default_low() -> f64 {
    0.2
}

fn default_prod_multiplier() -> f64 {
    1.5
}

fn default_staging_multiplier() -> f64 {
    1.2
}

fn default_dev_multiplier() -> f64 {
    0.8
}

fn default_test_multiplier() -> f64 {
    0.5
}

fn default_proximity_window() -> usize {
    50
}

fn default_min_occurrences() -> usize {
    2
}

fn default_score_boost() -> f64 {
    0.2
}

fn default_report_formats() -> Vec<String> {
    vec!["html".to_string()]
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("reports")
}

fn default_rate_limit() -> u32 {
    30
}

fn default_clone_depth() -> u32 {
    1
}

fn default_clone_timeout() -> u64 {
    600
}

fn default_temp_directory() -> PathBuf {
    std::env::temp_dir()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_max_size() -> u64 {
    100
}

fn default_log_max_backups() -> u32 {
    3
}

fn default_log_max_age() -> u32 {
    28
}

fn default_true() -> bool {
    true
}

const SUPPORTED_REPORT_FORMATS: &[&str] = &["html", "csv", "sarif", "json"];
const SUPPORTED_LOG_LEVELS: &[&str] = &["debug", "info", "warn", "error"];

impl Config {
    /// Load and validate a YAML configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let mut config: Config =
            serde_yaml::from_str(&contents).with_context(|| "Failed to parse YAML configuration")?;

        config.resolve_env();
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults (always within validation bounds)
    pub fn load_default() -> Self {
        let mut config = Config::default();
        config.resolve_env();
        config
    }

    /// Fill environment-sourced values
    fn resolve_env(&mut self) {
        if self.github.token.is_none() {
            self.github.token = std::env::var("GITHUB_TOKEN").ok();
        }
    }

    /// Fail fast on any out-of-range tunable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }

        if self.scanner.max_file_size == 0 {
            return Err(ConfigError::InvalidMaxFileSize);
        }

        let t = &self.risk.thresholds;
        let descending = t.critical > t.high && t.high > t.medium && t.medium > t.low;
        let non_negative = t.low >= 0.0;
        if !descending || !non_negative {
            return Err(ConfigError::InvalidThresholds);
        }

        let m = &self.risk.multipliers;
        if m.production < 0.0 {
            return Err(ConfigError::InvalidMultiplier("production"));
        }
        if m.staging < 0.0 {
            return Err(ConfigError::InvalidMultiplier("staging"));
        }
        if m.development < 0.0 {
            return Err(ConfigError::InvalidMultiplier("development"));
        }
        if m.test < 0.0 {
            return Err(ConfigError::InvalidMultiplier("test"));
        }

        if self.risk.co_occurrence.min_occurrences < 2 {
            return Err(ConfigError::InvalidMinOccurrences);
        }

        for format in &self.report.formats {
            if !SUPPORTED_REPORT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::InvalidReportFormat(format.clone()));
            }
        }

        if !SUPPORTED_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }

        if self.github.clone_depth == 0 {
            return Err(ConfigError::InvalidCloneDepth);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_validate() {
        let config = Config::load_default();
        assert!(config.validate().is_ok());
        assert!(config.scanner.workers >= 1);
        assert_eq!(config.scanner.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.report.formats, vec!["html"]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_yaml_overrides() {
        let yaml = r#"
scanner:
  workers: 4
  max_file_size: 1048576
  file_types: ["go", "py"]
risk:
  thresholds:
    critical: 0.9
    high: 0.7
    medium: 0.5
    low: 0.3
  multipliers:
    production: 2.0
report:
  formats: ["csv", "sarif"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scanner.workers, 4);
        assert_eq!(config.scanner.file_types, vec!["go", "py"]);
        assert_eq!(config.risk.thresholds.critical, 0.9);
        assert_eq!(config.risk.multipliers.production, 2.0);
        // Unspecified keys keep their defaults
        assert_eq!(config.risk.multipliers.staging, 1.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config: Config = serde_yaml::from_str("scanner:\n  workers: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkers)));
    }

    #[test]
    fn test_non_descending_thresholds_rejected() {
        let yaml = r#"
risk:
  thresholds:
    critical: 0.5
    high: 0.6
    medium: 0.4
    low: 0.2
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds)
        ));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let yaml = "risk:\n  multipliers:\n    test: -1.0\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("risk.multipliers.test"));
    }

    #[test]
    fn test_unknown_report_format_rejected() {
        let yaml = "report:\n  formats: [\"pdf\"]\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let yaml = "logging:\n  level: verbose\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "scanner:\n  workers: 2\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.scanner.workers, 2);
    }

    #[test]
    fn test_load_from_file_invalid_values_fail() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "scanner:\n  max_file_size: 0\n").unwrap();

        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_validator_tuning_parsed() {
        let yaml = r#"
scanner:
  validators:
    tfn:
      enabled: true
      strict_mode: true
      min_confidence: 0.9
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let tuning = config.scanner.validators.get("tfn").unwrap();
        assert!(tuning.strict_mode);
        assert_eq!(tuning.min_confidence, 0.9);
    }
}
