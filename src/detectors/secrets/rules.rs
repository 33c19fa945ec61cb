/// Secret rule table loading and compilation
///
/// Rules live in an external TOML artefact:
///
/// ```toml
/// [[rules]]
/// id = "aws-access-key-id"
/// description = "AWS access key ID"
/// regex = "AKIA[0-9A-Z]{16}"
/// keywords = ["akia"]
/// entropy = 3.0
///
/// [[allowlists]]
/// regexes = ["EXAMPLE"]
/// ```
///
/// A rule that fails to compile is disabled with a warning; the scanner
/// keeps running with the remaining rules.
use crate::core::PIType;
use log::warn;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rule TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("rule '{id}' has an invalid regex: {source}")]
    InvalidRegex {
        id: String,
        #[source]
        source: regex::Error,
    },
}

/// On-disk shape of the rule file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleSpec>,

    #[serde(default)]
    pub allowlists: Vec<AllowlistSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub id: String,

    #[serde(default)]
    pub description: String,

    pub regex: String,

    /// Cheap case-insensitive content gate; the regex only runs when one
    /// of the keywords appears in the file
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Minimum Shannon entropy of the matched text
    #[serde(default)]
    pub entropy: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllowlistSpec {
    #[serde(default)]
    pub regexes: Vec<String>,
}

/// A rule ready to run
pub struct CompiledRule {
    pub id: String,
    pub description: String,
    pub regex: Regex,
    pub keywords: Vec<String>,
    pub entropy: Option<f64>,
    pub pi_type: PIType,
}

/// Fixed mapping from rule IDs to PI types. Unmapped IDs fall back to a
/// prefixed secret tag derived from the ID so downstream risk scoring can
/// still consume them.
pub fn map_rule_id(id: &str) -> PIType {
    match id {
        "australian-tfn" => PIType::Tfn,
        "australian-abn" => PIType::Abn,
        "australian-medicare" => PIType::Medicare,
        "aws-access-key-id" => PIType::Secret("AWS_ACCESS_KEY".to_string()),
        "aws-secret-access-key" => PIType::Secret("AWS_SECRET_KEY".to_string()),
        "github-pat" => PIType::Secret("GITHUB_PAT".to_string()),
        "slack-token" => PIType::Secret("SLACK_TOKEN".to_string()),
        "stripe-secret-key" => PIType::Secret("STRIPE_SECRET_KEY".to_string()),
        "google-api-key" => PIType::Secret("GOOGLE_API_KEY".to_string()),
        "private-key" => PIType::Secret("PRIVATE_KEY".to_string()),
        "jwt" => PIType::Secret("JWT".to_string()),
        "generic-api-key" => PIType::Secret("GENERIC_API_KEY".to_string()),
        other => PIType::Secret(other.to_uppercase().replace('-', "_")),
    }
}

impl RuleFile {
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Compile every rule, disabling individually broken ones
    pub fn compile(self) -> (Vec<CompiledRule>, Vec<Regex>) {
        let mut compiled = Vec::new();

        for spec in self.rules {
            match Regex::new(&spec.regex) {
                Ok(regex) => compiled.push(CompiledRule {
                    pi_type: map_rule_id(&spec.id),
                    id: spec.id,
                    description: spec.description,
                    regex,
                    keywords: spec.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    entropy: spec.entropy,
                }),
                Err(e) => {
                    warn!("disabling secret rule '{}': invalid regex: {}", spec.id, e);
                }
            }
        }

        let mut allowlists = Vec::new();
        for spec in self.allowlists {
            for pattern in spec.regexes {
                match Regex::new(&pattern) {
                    Ok(regex) => allowlists.push(regex),
                    Err(e) => warn!("disabling allowlist pattern '{}': {}", pattern, e),
                }
            }
        }

        (compiled, allowlists)
    }
}

/// Built-in rule set used when no rule file is configured
pub const DEFAULT_RULES_TOML: &str = r##"
[[rules]]
id = "aws-access-key-id"
description = "AWS access key ID"
regex = "\\bAKIA[0-9A-Z]{16}\\b"
keywords = ["akia"]

[[rules]]
id = "aws-secret-access-key"
description = "AWS secret access key"
regex = "aws_secret_access_key\\s*[:=]\\s*[A-Za-z0-9/+=]{40}"
keywords = ["aws_secret_access_key"]
entropy = 3.5

[[rules]]
id = "github-pat"
description = "GitHub personal access token"
regex = "\\bgh[pousr]_[A-Za-z0-9]{36,}\\b"
keywords = ["ghp_", "gho_", "ghu_", "ghs_", "ghr_"]

[[rules]]
id = "slack-token"
description = "Slack token"
regex = "xox[baprs]-[A-Za-z0-9\\-]{10,}"
keywords = ["xox"]

[[rules]]
id = "stripe-secret-key"
description = "Stripe live secret key"
regex = "\\bsk_live_[A-Za-z0-9]{24,}\\b"
keywords = ["sk_live_"]

[[rules]]
id = "google-api-key"
description = "Google API key"
regex = "\\bAIza[A-Za-z0-9_\\-]{35}\\b"
keywords = ["aiza"]

[[rules]]
id = "private-key"
description = "PEM private key header"
regex = "-----BEGIN (?:RSA |DSA |EC |OPENSSH )?PRIVATE KEY-----"
keywords = ["private key"]

[[rules]]
id = "jwt"
description = "JSON Web Token"
regex = "\\beyJ[A-Za-z0-9_\\-]{10,}\\.[A-Za-z0-9_\\-]{10,}\\.[A-Za-z0-9_\\-]{10,}\\b"
keywords = ["eyj"]

[[rules]]
id = "generic-api-key"
description = "Generic api_key / secret_key assignment"
regex = "(?i)(?:api|secret)[_\\-]?key['\"]?\\s*[:=]\\s*['\"][A-Za-z0-9_\\-]{20,}['\"]"
keywords = ["api_key", "api-key", "apikey", "secret_key", "secret-key"]
entropy = 3.0

[[allowlists]]
regexes = ["EXAMPLE", "example\\.com", "00000000000000000000", "xxxxxxxx"]
"##;
