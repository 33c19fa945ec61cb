/// Repository acquisition: URL validation and shallow cloning
///
/// The scanner core consumes a local working tree; this module turns a
/// repository URL into one. Cloning shells out to the `git` binary with
/// the configured depth and timeout, injecting the GitHub token for
/// private repositories when one is available.
use crate::config::GithubConfig;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum RepoUrlError {
    #[error("invalid repository URL '{0}'")]
    Unparseable(String),

    #[error("repository URL must use https, got '{0}'")]
    NotHttps(String),

    #[error("repository URL has no host")]
    MissingHost,

    #[error("GitHub URL must have at least an owner and a repository segment")]
    TooFewSegments,
}

/// Validate a repository URL: https scheme, a host, and for GitHub at
/// least two non-empty path segments (owner/repo).
pub fn validate_repo_url(raw: &str) -> Result<Url, RepoUrlError> {
    let url = Url::parse(raw).map_err(|_| RepoUrlError::Unparseable(raw.to_string()))?;

    if url.scheme() != "https" {
        return Err(RepoUrlError::NotHttps(url.scheme().to_string()));
    }

    let host = url.host_str().ok_or(RepoUrlError::MissingHost)?;

    if host.eq_ignore_ascii_case("github.com") {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(RepoUrlError::TooFewSegments);
        }
    }

    Ok(url)
}

/// Read a repository list file: one URL per line, '#' comments and blank
/// lines ignored.
pub fn read_repo_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read repo list: {}", path.display()))?;

    Ok(contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}

/// Short name for a repository URL ("owner-repo" for GitHub)
fn clone_dir_name(url: &Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let name = segments.join("-").replace(".git", "");
    if name.is_empty() {
        "repository".to_string()
    } else {
        name
    }
}

/// Shallow-clone a repository into the configured temp directory and
/// return the checkout path.
pub fn clone_repository(url: &Url, config: &GithubConfig) -> Result<PathBuf> {
    let target = config
        .temp_directory
        .join("pi-sentinel")
        .join(clone_dir_name(url));

    if target.exists() {
        fs::remove_dir_all(&target)
            .with_context(|| format!("Failed to clear clone target: {}", target.display()))?;
    }
    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create clone target: {}", target.display()))?;

    let clone_url = authenticated_url(url, config.token.as_deref());

    info!("cloning {} (depth {})", url, config.clone_depth);
    let mut child = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg(config.clone_depth.to_string())
        .arg("--quiet")
        .arg(clone_url.as_str())
        .arg(&target)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to launch git; is it installed?")?;

    let timeout = Duration::from_secs(config.clone_timeout);
    let start = Instant::now();

    loop {
        match child.try_wait().context("Failed to poll git clone")? {
            Some(status) if status.success() => break,
            Some(status) => {
                let stderr = child
                    .stderr
                    .take()
                    .and_then(|mut s| {
                        use std::io::Read;
                        let mut buf = String::new();
                        s.read_to_string(&mut buf).ok().map(|_| buf)
                    })
                    .unwrap_or_default();
                bail!("git clone failed ({}): {}", status, stderr.trim());
            }
            None if start.elapsed() > timeout => {
                let _ = child.kill();
                let _ = child.wait();
                bail!("git clone timed out after {}s", config.clone_timeout);
            }
            None => std::thread::sleep(Duration::from_millis(100)),
        }
    }

    debug!("cloned into {}", target.display());
    Ok(target)
}

/// Remove a checkout created by `clone_repository`
pub fn cleanup_clone(path: &Path) {
    if path.exists() {
        if let Err(err) = fs::remove_dir_all(path) {
            log::warn!("failed to clean up clone {}: {}", path.display(), err);
        }
    }
}

/// Inject a token into an https URL for private-repo access
fn authenticated_url(url: &Url, token: Option<&str>) -> Url {
    match token {
        Some(token) if !token.is_empty() => {
            let mut authed = url.clone();
            // Ignore failures; cloning proceeds unauthenticated
            let _ = authed.set_username("x-access-token");
            let _ = authed.set_password(Some(token));
            authed
        }
        _ => url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_github_url() {
        let url = validate_repo_url("https://github.com/owner/repo").unwrap();
        assert_eq!(url.host_str(), Some("github.com"));
    }

    #[test]
    fn test_github_url_needs_owner_and_repo() {
        assert!(matches!(
            validate_repo_url("https://github.com/owner"),
            Err(RepoUrlError::TooFewSegments)
        ));
        assert!(matches!(
            validate_repo_url("https://github.com/"),
            Err(RepoUrlError::TooFewSegments)
        ));
    }

    #[test]
    fn test_non_https_rejected() {
        assert!(matches!(
            validate_repo_url("http://github.com/owner/repo"),
            Err(RepoUrlError::NotHttps(_))
        ));
        assert!(matches!(
            validate_repo_url("git@github.com:owner/repo.git"),
            Err(_)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_repo_url("not a url at all").is_err());
    }

    #[test]
    fn test_non_github_https_allowed_with_short_path() {
        // The two-segment rule is GitHub-specific
        assert!(validate_repo_url("https://gitlab.example.com/repo").is_ok());
    }

    #[test]
    fn test_clone_dir_name() {
        let url = Url::parse("https://github.com/owner/repo.git").unwrap();
        assert_eq!(clone_dir_name(&url), "owner-repo");
    }

    #[test]
    fn test_authenticated_url_injects_token() {
        let url = Url::parse("https://github.com/owner/repo").unwrap();
        let authed = authenticated_url(&url, Some("token123"));
        assert_eq!(authed.username(), "x-access-token");
        assert_eq!(authed.password(), Some("token123"));

        let plain = authenticated_url(&url, None);
        assert_eq!(plain.username(), "");
    }

    #[test]
    fn test_read_repo_list() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("repos.txt");
        fs::write(
            &path,
            "# compliance targets\nhttps://github.com/a/b\n\nhttps://github.com/c/d\n",
        )
        .unwrap();

        let repos = read_repo_list(&path).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0], "https://github.com/a/b");
    }
}
