use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::AuditArgs;
use crate::model::{AuditCounts, AuditRunManifest};
use crate::util::{now_utc_string, write_json_pretty, write_text};

mod classify;
mod report;

use classify::analyse_pages;
use report::render_report;

/// Legacy source identifier to review filename.
pub type Mapping = BTreeMap<String, String>;

pub fn run(args: AuditArgs) -> Result<()> {
    let mapping_path = args.mapping_path();
    let reviews_dir = args.reviews_dir();
    let report_path = args.report_path();

    let mapping = load_mapping(&mapping_path)?;
    info!(
        path = %mapping_path.display(),
        entries = mapping.len(),
        "loaded page mapping"
    );

    let findings = analyse_pages(&mapping, &args.site_root, &reviews_dir);
    let counts = AuditCounts::from_findings(mapping.len(), &findings);

    let report = render_report(&findings, mapping.len());
    write_text(&report_path, &report)?;
    info!(path = %report_path.display(), "wrote audit report");

    if let Some(findings_path) = &args.findings_json {
        let manifest = AuditRunManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            mapping_path: mapping_path.display().to_string(),
            reviews_dir: reviews_dir.display().to_string(),
            report_path: report_path.display().to_string(),
            counts: counts.clone(),
            findings,
        };
        write_json_pretty(findings_path, &manifest)?;
        info!(path = %findings_path.display(), "wrote audit findings");
    }

    info!(
        mapped = counts.mapped_pages,
        placeholder = counts.placeholder_pages,
        keyword_mismatches = counts.keyword_mismatches,
        missing_targets = counts.missing_targets,
        missing_originals = counts.missing_originals,
        "audit completed"
    );

    Ok(())
}

pub fn load_mapping(path: &Path) -> Result<Mapping> {
    if !path.is_file() {
        bail!("mapping file not found: {}", path.display());
    }

    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
