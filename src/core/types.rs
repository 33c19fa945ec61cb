/// Core type definitions for PI detection results
use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Category of personal information a finding belongs to.
///
/// The closed set covers Australian regulatory identifiers plus generic PI.
/// Secret material surfaced by the rule-table scanner is carried as
/// `Secret(tag)` and serialised under the reserved `SECRET_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PIType {
    Tfn,
    Medicare,
    Abn,
    Acn,
    Bsb,
    Email,
    Phone,
    Name,
    Address,
    CreditCard,
    DriverLicense,
    Passport,
    Account,
    IpAddress,
    /// Secret-scanner rule tag (e.g. "AWS_ACCESS_KEY")
    Secret(String),
}

impl PIType {
    /// Wire tag, uppercase
    pub fn tag(&self) -> String {
        match self {
            PIType::Tfn => "TFN".to_string(),
            PIType::Medicare => "MEDICARE".to_string(),
            PIType::Abn => "ABN".to_string(),
            PIType::Acn => "ACN".to_string(),
            PIType::Bsb => "BSB".to_string(),
            PIType::Email => "EMAIL".to_string(),
            PIType::Phone => "PHONE".to_string(),
            PIType::Name => "NAME".to_string(),
            PIType::Address => "ADDRESS".to_string(),
            PIType::CreditCard => "CREDIT_CARD".to_string(),
            PIType::DriverLicense => "DRIVER_LICENSE".to_string(),
            PIType::Passport => "PASSPORT".to_string(),
            PIType::Account => "ACCOUNT".to_string(),
            PIType::IpAddress => "IP_ADDRESS".to_string(),
            PIType::Secret(tag) => format!("SECRET_{}", tag),
        }
    }

    /// Parse a wire tag back into a type
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TFN" => Some(PIType::Tfn),
            "MEDICARE" => Some(PIType::Medicare),
            "ABN" => Some(PIType::Abn),
            "ACN" => Some(PIType::Acn),
            "BSB" => Some(PIType::Bsb),
            "EMAIL" => Some(PIType::Email),
            "PHONE" => Some(PIType::Phone),
            "NAME" => Some(PIType::Name),
            "ADDRESS" => Some(PIType::Address),
            "CREDIT_CARD" => Some(PIType::CreditCard),
            "DRIVER_LICENSE" => Some(PIType::DriverLicense),
            "PASSPORT" => Some(PIType::Passport),
            "ACCOUNT" => Some(PIType::Account),
            "IP_ADDRESS" => Some(PIType::IpAddress),
            other => other
                .strip_prefix("SECRET_")
                .map(|t| PIType::Secret(t.to_string())),
        }
    }

    /// Base risk weight used by the scorer (higher = more sensitive)
    pub fn base_weight(&self) -> u32 {
        match self {
            PIType::Tfn => 100,
            PIType::Medicare => 95,
            PIType::CreditCard => 90,
            PIType::Secret(_) => 90,
            PIType::Abn => 70,
            PIType::Acn => 65,
            PIType::Passport => 60,
            PIType::DriverLicense => 50,
            PIType::Account => 45,
            PIType::Bsb => 40,
            PIType::Address => 35,
            PIType::Name => 30,
            PIType::Phone => 25,
            PIType::Email => 20,
            PIType::IpAddress => 10,
        }
    }

    /// Types that participate in the co-occurrence boost
    pub fn is_high_sensitivity(&self) -> bool {
        matches!(
            self,
            PIType::Tfn
                | PIType::Medicare
                | PIType::Bsb
                | PIType::Name
                | PIType::Address
                | PIType::CreditCard
        )
    }
}

impl std::fmt::Display for PIType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl Serialize for PIType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for PIType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        PIType::from_tag(&tag).ok_or_else(|| D::Error::custom(format!("unknown PI type: {}", tag)))
    }
}

/// Risk classification of a finding, totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Promote one step, saturating at Critical
    pub fn promote(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::Medium,
            RiskLevel::Medium => RiskLevel::High,
            RiskLevel::High => RiskLevel::Critical,
            RiskLevel::Critical => RiskLevel::Critical,
        }
    }

    /// Demote one step, saturating at Low
    pub fn demote(self) -> Self {
        match self {
            RiskLevel::Critical => RiskLevel::High,
            RiskLevel::High => RiskLevel::Medium,
            RiskLevel::Medium => RiskLevel::Low,
            RiskLevel::Low => RiskLevel::Low,
        }
    }

    /// Numeric score used when applying environment multipliers
    pub fn score(self) -> f64 {
        match self {
            RiskLevel::Low => 0.25,
            RiskLevel::Medium => 0.5,
            RiskLevel::High => 0.75,
            RiskLevel::Critical => 1.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single piece of suspected personal information found in a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Category of the match
    #[serde(rename = "type")]
    pub pi_type: PIType,

    /// The matched text exactly as it appears in the file
    #[serde(rename = "match")]
    pub matched: String,

    /// Repo-relative path of the file
    pub file: String,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, bytes)
    pub column: usize,

    /// Up to 50 bytes of file content preceding the match
    pub context_before: String,

    /// Up to 50 bytes of file content following the match
    pub context_after: String,

    /// Detection confidence in [0.0, 1.0]
    pub confidence: f32,

    /// Context trust multiplier in [0.0, 1.0]; 1.0 = no adjustment
    pub context_modifier: f32,

    /// Final risk classification
    pub risk_level: RiskLevel,

    /// Whether an identifier validator accepted the match
    pub validated: bool,

    /// Validator failure detail; empty on success or when no validator exists
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation_error: String,

    /// When the finding was produced
    pub detected_at: DateTime<Utc>,

    /// Detector that produced the finding
    pub detector_name: String,

    /// Byte offset of the match start (canonical overlap key, not persisted)
    #[serde(skip)]
    pub start_byte: usize,

    /// Byte offset of the match end (not persisted)
    #[serde(skip)]
    pub end_byte: usize,
}

impl Finding {
    /// Canonical deduplication key: byte range + type within a file.
    /// Falls back to (line, column, match) when byte offsets are absent,
    /// e.g. on findings deserialised from an artefact.
    pub fn dedup_key(&self) -> (String, usize, usize, String) {
        if self.end_byte > self.start_byte {
            (
                self.file.clone(),
                self.start_byte,
                self.end_byte,
                self.pi_type.tag(),
            )
        } else {
            (
                format!("{}:{}", self.file, self.matched),
                self.line,
                self.column,
                self.pi_type.tag(),
            )
        }
    }

    /// Whether this finding's byte range intersects another's
    pub fn overlaps(&self, other: &Finding) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// A candidate file produced by discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Result of the leading-bytes binary heuristic
    pub is_binary: bool,

    /// Whether the basename starts with '.'
    pub is_hidden: bool,
}

/// A unit of work for the pipeline: a file plus its already-loaded content
#[derive(Debug, Clone)]
pub struct FileJob {
    /// Repo-relative path
    pub path: PathBuf,

    /// Full file content (lossily decoded to UTF-8)
    pub content: String,

    /// The discovery record this job was built from
    pub record: FileRecord,
}

/// Per-file processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStats {
    pub bytes_processed: u64,
    pub lines_processed: u64,
    pub processing_time_ns: u64,
}

/// Result of running the detection pipeline over one file.
/// Emitted exactly once per submitted job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stats: FileStats,
}

impl ProcessingResult {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            findings: Vec::new(),
            error: None,
            stats: FileStats::default(),
        }
    }

    pub fn with_error(path: PathBuf, error: String) -> Self {
        Self {
            path,
            findings: Vec::new(),
            error: Some(error),
            stats: FileStats::default(),
        }
    }
}

/// The repository a scan ran against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub url: String,
    pub local_path: PathBuf,
    pub file_count: usize,
    pub size: u64,
}

/// Aggregate counters assembled by the scan coordinator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_files: usize,
    pub scanned_files: usize,
    pub skipped_files: usize,
    pub total_size: u64,
    pub total_findings: usize,
    pub findings_by_type: HashMap<String, usize>,
    pub findings_by_risk: HashMap<String, usize>,
    pub processing_time_ns: u64,
}

/// The persisted scan artefact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub repository: RepositoryInfo,
    pub scan_started: DateTime<Utc>,
    pub scan_finished: DateTime<Utc>,
    /// Wall-clock duration in nanoseconds
    pub duration: u64,
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    pub stats: ScanSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Recompute the by-type / by-risk counters from the finding list
    pub fn rebuild_summary(&mut self) {
        let mut by_type: HashMap<String, usize> = HashMap::new();
        let mut by_risk: HashMap<String, usize> = HashMap::new();

        for finding in &self.findings {
            *by_type.entry(finding.pi_type.tag()).or_insert(0) += 1;
            *by_risk.entry(finding.risk_level.to_string()).or_insert(0) += 1;
        }

        self.stats.total_findings = self.findings.len();
        self.stats.findings_by_type = by_type;
        self.stats.findings_by_risk = by_risk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_finding(pi_type: PIType, start: usize, end: usize) -> Finding {
        Finding {
            pi_type,
            matched: "123456782".to_string(),
            file: "src/customer.go".to_string(),
            line: 1,
            column: 1,
            context_before: String::new(),
            context_after: String::new(),
            confidence: 0.95,
            context_modifier: 1.0,
            risk_level: RiskLevel::High,
            validated: true,
            validation_error: String::new(),
            detected_at: Utc::now(),
            detector_name: "tfn".to_string(),
            start_byte: start,
            end_byte: end,
        }
    }

    #[test]
    fn test_pi_type_tag_round_trip() {
        let types = [
            PIType::Tfn,
            PIType::Medicare,
            PIType::CreditCard,
            PIType::IpAddress,
            PIType::Secret("AWS_ACCESS_KEY".to_string()),
        ];

        for t in types {
            assert_eq!(PIType::from_tag(&t.tag()), Some(t.clone()));
        }
    }

    #[test]
    fn test_pi_type_serde_uppercase() {
        let json = serde_json::to_string(&PIType::CreditCard).unwrap();
        assert_eq!(json, "\"CREDIT_CARD\"");

        let parsed: PIType = serde_json::from_str("\"SECRET_GITHUB_PAT\"").unwrap();
        assert_eq!(parsed, PIType::Secret("GITHUB_PAT".to_string()));
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_promote_demote_saturate() {
        assert_eq!(RiskLevel::Critical.promote(), RiskLevel::Critical);
        assert_eq!(RiskLevel::Low.demote(), RiskLevel::Low);
        assert_eq!(RiskLevel::Medium.promote(), RiskLevel::High);
        assert_eq!(RiskLevel::High.demote(), RiskLevel::Medium);
    }

    #[test]
    fn test_finding_overlap() {
        let a = sample_finding(PIType::Tfn, 10, 19);
        let b = sample_finding(PIType::Abn, 15, 26);
        let c = sample_finding(PIType::Bsb, 19, 25);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // ranges touch but do not intersect
    }

    #[test]
    fn test_rebuild_summary_counts() {
        let mut result = ScanResult {
            repository: RepositoryInfo::default(),
            scan_started: Utc::now(),
            scan_finished: Utc::now(),
            duration: 0,
            files_scanned: 1,
            findings: vec![
                sample_finding(PIType::Tfn, 0, 9),
                sample_finding(PIType::Tfn, 20, 29),
                sample_finding(PIType::Email, 40, 55),
            ],
            stats: ScanSummary::default(),
            errors: Vec::new(),
            error: None,
        };

        result.rebuild_summary();
        assert_eq!(result.stats.total_findings, 3);
        assert_eq!(result.stats.findings_by_type.get("TFN"), Some(&2));
        assert_eq!(result.stats.findings_by_type.get("EMAIL"), Some(&1));
        assert_eq!(result.stats.findings_by_risk.get("HIGH"), Some(&3));
    }
}
