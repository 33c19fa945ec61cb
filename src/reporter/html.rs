/// HTML report renderer
use crate::core::ScanResult;
use crate::reporter::mask_finding;
use anyhow::{Context as AnyhowContext, Result};
use chrono::Local;
use std::path::Path;
use tera::{Context, Tera};

pub struct HtmlReporter {
    template: String,
}

impl HtmlReporter {
    pub fn new() -> Self {
        Self {
            template: Self::default_template(),
        }
    }

    /// Render the report and write it to a file
    pub fn write_to_file(&self, result: &ScanResult, output_path: &Path) -> Result<()> {
        let html = self.render(result)?;
        std::fs::write(output_path, html)
            .with_context(|| format!("Failed to write HTML to {}", output_path.display()))?;
        Ok(())
    }

    /// Render the report as a string
    pub fn render(&self, result: &ScanResult) -> Result<String> {
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", &self.template)
            .context("Failed to parse report template")?;

        let mut context = Context::new();
        context.insert("repository", &result.repository.url);
        context.insert("generated", &Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        context.insert("total_files", &result.stats.total_files);
        context.insert("scanned_files", &result.stats.scanned_files);
        context.insert("skipped_files", &result.stats.skipped_files);
        context.insert("total_findings", &result.stats.total_findings);
        context.insert(
            "duration_secs",
            &format!("{:.2}", result.duration as f64 / 1_000_000_000.0),
        );

        let by_risk = |level: &str| -> usize {
            result
                .stats
                .findings_by_risk
                .get(level)
                .copied()
                .unwrap_or(0)
        };
        context.insert("critical_count", &by_risk("CRITICAL"));
        context.insert("high_count", &by_risk("HIGH"));
        context.insert("medium_count", &by_risk("MEDIUM"));
        context.insert("low_count", &by_risk("LOW"));

        let findings: Vec<_> = result
            .findings
            .iter()
            .map(|f| {
                let mut row = std::collections::HashMap::new();
                row.insert("file", f.file.clone());
                row.insert("line", f.line.to_string());
                row.insert("pi_type", f.pi_type.tag());
                row.insert("masked", mask_finding(f));
                row.insert("risk", f.risk_level.to_string());
                row.insert("confidence", format!("{:.2}", f.confidence));
                row.insert("validated", f.validated.to_string());
                row.insert("detector", f.detector_name.clone());
                row
            })
            .collect();
        context.insert("findings", &findings);
        context.insert("errors", &result.errors);

        tera.render("report.html", &context)
            .context("Failed to render report template")
    }

    fn default_template() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PI-Sentinel scan report</title>
<style>
  body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem; color: #222; }
  h1 { font-size: 1.4rem; }
  .cards { display: flex; gap: 1rem; margin: 1rem 0; flex-wrap: wrap; }
  .card { border: 1px solid #ddd; border-radius: 6px; padding: 0.8rem 1.2rem; min-width: 7rem; }
  .card .num { font-size: 1.6rem; font-weight: 600; }
  .critical { color: #b91c1c; }
  .high { color: #dc2626; }
  .medium { color: #d97706; }
  .low { color: #16a34a; }
  table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
  th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #eee; font-size: 0.9rem; }
  th { background: #f8f8f8; }
  .tag { font-weight: 600; }
  footer { margin-top: 2rem; color: #888; font-size: 0.8rem; }
</style>
</head>
<body>
<h1>PI-Sentinel scan report</h1>
<p>Repository: <strong>{{ repository }}</strong> &middot; generated {{ generated }}</p>

<div class="cards">
  <div class="card"><div class="num">{{ total_findings }}</div>findings</div>
  <div class="card critical"><div class="num">{{ critical_count }}</div>critical</div>
  <div class="card high"><div class="num">{{ high_count }}</div>high</div>
  <div class="card medium"><div class="num">{{ medium_count }}</div>medium</div>
  <div class="card low"><div class="num">{{ low_count }}</div>low</div>
  <div class="card"><div class="num">{{ scanned_files }}</div>files scanned</div>
</div>

<p>{{ total_files }} files discovered, {{ skipped_files }} skipped, finished in {{ duration_secs }}s.</p>

{% if findings | length > 0 %}
<table>
  <tr><th>Risk</th><th>Type</th><th>Value</th><th>Location</th><th>Confidence</th><th>Validated</th><th>Detector</th></tr>
  {% for f in findings %}
  <tr>
    <td class="{{ f.risk | lower }}">{{ f.risk }}</td>
    <td class="tag">{{ f.pi_type }}</td>
    <td><code>{{ f.masked }}</code></td>
    <td>{{ f.file }}:{{ f.line }}</td>
    <td>{{ f.confidence }}</td>
    <td>{{ f.validated }}</td>
    <td>{{ f.detector }}</td>
  </tr>
  {% endfor %}
</table>
{% else %}
<p>No findings.</p>
{% endif %}

{% if errors | length > 0 %}
<h2>File errors</h2>
<ul>
  {% for e in errors %}<li>{{ e }}</li>{% endfor %}
</ul>
{% endif %}

<footer>Generated by pi-sentinel. Values are masked; raw matches live in the JSON artefact.</footer>
</body>
</html>"#
            .to_string()
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}
