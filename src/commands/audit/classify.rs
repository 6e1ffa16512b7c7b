use std::path::Path;

use tracing::{debug, warn};

use super::Mapping;
use crate::markup::extract_tag_text;
use crate::model::{AuditFindings, PageRecord};
use crate::topic::{contains_placeholder, extract_keywords};
use crate::util::read_text_lossy;

pub const MISSING_TARGET_PROBLEM: &str = "Target review file is missing";
pub const PLACEHOLDER_PROBLEM: &str = "Title or heading still uses placeholder Nuclear Bodies copy";
pub const KEYWORD_PROBLEM: &str = "Key topic keywords from filename are missing in title and heading";

/// Outcome of checking a target page's title and heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentChecks {
    pub placeholder: bool,
    pub keyword_mismatch: bool,
}

/// Classifies every mapping entry into the four findings groups.
///
/// A record appearing in several groups carries every problem found for its
/// entry, so each table shows the full picture for that page.
pub fn analyse_pages(mapping: &Mapping, site_root: &Path, reviews_dir: &Path) -> AuditFindings {
    let mut findings = AuditFindings::default();

    for (original, target) in mapping {
        let mut record = PageRecord::new(original, target);
        let original_missing = !site_root.join(original).exists();

        let target_path = reviews_dir.join(target);
        let mut checks = ContentChecks::default();
        let mut target_missing = false;

        if !target_path.is_file() {
            record.add_problem(MISSING_TARGET_PROBLEM);
            target_missing = true;
        } else {
            match read_text_lossy(&target_path) {
                Ok(content) => checks = inspect_target(&mut record, &content),
                Err(err) => {
                    warn!(path = %target_path.display(), error = %err, "unreadable review page");
                    record.add_problem(format!("Target review file could not be read: {err}"));
                    target_missing = true;
                }
            }
        }

        debug!(
            original = %original,
            target = %target,
            original_missing,
            target_missing,
            placeholder = checks.placeholder,
            keyword_mismatch = checks.keyword_mismatch,
            "classified mapping entry"
        );

        if original_missing {
            findings.missing_originals.push(record.clone());
        }
        if target_missing {
            findings.missing_targets.push(record.clone());
        }
        if checks.placeholder {
            findings.placeholder.push(record.clone());
        }
        if checks.keyword_mismatch {
            findings.keyword_mismatches.push(record);
        }
    }

    findings
}

/// Fills title and heading of `record` from `content` and records placeholder
/// and keyword-coverage problems.
pub fn inspect_target(record: &mut PageRecord, content: &str) -> ContentChecks {
    record.title = extract_tag_text(content, "title");
    record.heading = extract_tag_text(content, "h1");

    let mut checks = ContentChecks::default();

    if contains_placeholder(&record.title) || contains_placeholder(&record.heading) {
        record.add_problem(PLACEHOLDER_PROBLEM);
        checks.placeholder = true;
    }

    let keywords = extract_keywords(&record.target);
    let title = record.title.to_lowercase();
    let heading = record.heading.to_lowercase();
    let missing: Vec<String> = keywords
        .iter()
        .filter(|keyword| !title.contains(keyword.as_str()) && !heading.contains(keyword.as_str()))
        .cloned()
        .collect();

    if is_keyword_mismatch(keywords.len(), keywords.len() - missing.len()) {
        record.missing_keywords = Some(missing);
        record.add_problem(KEYWORD_PROBLEM);
        checks.keyword_mismatch = true;
    }

    checks
}

/// Raised when fewer than `max(1, total / 2)` keywords surface; never for an
/// empty keyword set.
pub fn is_keyword_mismatch(total: usize, found: usize) -> bool {
    total > 0 && found < (total / 2).max(1)
}
