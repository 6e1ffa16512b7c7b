use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub original: String,
    pub target: String,
    pub title: String,
    pub heading: String,
    pub missing_keywords: Option<Vec<String>>,
    pub problems: Vec<String>,
}

impl PageRecord {
    pub fn new(original: &str, target: &str) -> Self {
        Self {
            original: original.to_string(),
            target: target.to_string(),
            ..Self::default()
        }
    }

    pub fn add_problem(&mut self, message: impl Into<String>) {
        self.problems.push(message.into());
    }
}

/// Findings groups in sorted order of the original mapping keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditFindings {
    pub placeholder: Vec<PageRecord>,
    pub keyword_mismatches: Vec<PageRecord>,
    pub missing_targets: Vec<PageRecord>,
    pub missing_originals: Vec<PageRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditCounts {
    pub mapped_pages: usize,
    pub placeholder_pages: usize,
    pub keyword_mismatches: usize,
    pub missing_targets: usize,
    pub missing_originals: usize,
}

impl AuditCounts {
    pub fn from_findings(mapped_pages: usize, findings: &AuditFindings) -> Self {
        Self {
            mapped_pages,
            placeholder_pages: findings.placeholder.len(),
            keyword_mismatches: findings.keyword_mismatches.len(),
            missing_targets: findings.missing_targets.len(),
            missing_originals: findings.missing_originals.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub mapping_path: String,
    pub reviews_dir: String,
    pub report_path: String,
    pub counts: AuditCounts,
    pub findings: AuditFindings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentAction {
    Replaced,
    Inserted,
    NoBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Added,
    AlreadyPresent,
    NoBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageChanges {
    pub vendor_scripts_removed: usize,
    pub header: FragmentAction,
    pub footer: FragmentAction,
    pub script: ScriptAction,
    pub title_healed: bool,
    pub heading_healed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    Rewritten,
    Unchanged,
    Skipped,
}

impl PageOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rewritten => "rewritten",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPageEntry {
    pub path: String,
    pub root_level: bool,
    pub outcome: PageOutcome,
    pub changes: Option<PageChanges>,
    pub sha256_before: Option<String>,
    pub sha256_after: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeCounts {
    pub page_count: usize,
    pub rewritten: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub site_root: String,
    pub reviews_dir: String,
    pub dry_run: bool,
    pub counts: NormalizeCounts,
    pub pages: Vec<NormalizedPageEntry>,
}
