use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::cli::NormalizeArgs;
use crate::model::{NormalizeCounts, NormalizeRunManifest, NormalizedPageEntry, PageOutcome};
use crate::util::{now_utc_string, sha256_hex, write_json_pretty};

mod document;
mod fragments;
mod page;
#[cfg(test)]
mod tests;

use fragments::root_path_for_depth;
use page::{PageContext, normalize_page};

#[derive(Debug, Clone)]
pub struct PageTarget {
    pub path: PathBuf,
    pub root_level: bool,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let reviews_dir = if args.reviews_dir.is_absolute() {
        args.reviews_dir.clone()
    } else {
        args.site_root.join(&args.reviews_dir)
    };
    let nested_root_path = nested_root_path(&args.site_root, &args.reviews_dir)?;

    info!(
        site_root = %args.site_root.display(),
        reviews_dir = %reviews_dir.display(),
        dry_run = args.dry_run,
        "starting normalization"
    );

    let mut targets = discover_root_pages(&args.site_root);
    targets.extend(discover_review_pages(&reviews_dir));

    let mut pages = Vec::with_capacity(targets.len());
    for target in &targets {
        let root_path = if target.root_level {
            root_path_for_depth(0)
        } else {
            nested_root_path.clone()
        };
        let entry = process_page(target, &root_path, args.dry_run);
        debug!(path = %entry.path, outcome = entry.outcome.as_str(), "page processed");
        pages.push(entry);
    }

    let counts = NormalizeCounts {
        page_count: pages.len(),
        rewritten: count_outcome(&pages, PageOutcome::Rewritten),
        unchanged: count_outcome(&pages, PageOutcome::Unchanged),
        skipped: count_outcome(&pages, PageOutcome::Skipped),
    };

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = NormalizeRunManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            site_root: args.site_root.display().to_string(),
            reviews_dir: reviews_dir.display().to_string(),
            dry_run: args.dry_run,
            counts: counts.clone(),
            pages,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote normalization manifest");
    }

    info!(
        pages = counts.page_count,
        rewritten = counts.rewritten,
        unchanged = counts.unchanged,
        skipped = counts.skipped,
        "normalization completed"
    );

    Ok(())
}

/// Normalizes one page in place. I/O and decoding failures skip the page.
pub fn process_page(target: &PageTarget, root_path: &str, dry_run: bool) -> NormalizedPageEntry {
    let mut entry = NormalizedPageEntry {
        path: target.path.display().to_string(),
        root_level: target.root_level,
        outcome: PageOutcome::Skipped,
        changes: None,
        sha256_before: None,
        sha256_after: None,
        warning: None,
    };

    let original = match read_page(&target.path) {
        Ok(original) => original,
        Err(err) => {
            warn!(path = %target.path.display(), error = %err, "failed to read page");
            entry.warning = Some(format!("{err:#}"));
            return entry;
        }
    };

    let filename = target
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let context = PageContext {
        filename,
        root_level: target.root_level,
        root_path: root_path.to_string(),
    };

    info!(path = %target.path.display(), "updating page");
    let normalized = normalize_page(&original, &context);

    entry.sha256_before = Some(sha256_hex(original.as_bytes()));
    entry.sha256_after = Some(sha256_hex(normalized.markup.as_bytes()));
    entry.changes = Some(normalized.changes);

    if normalized.markup == original {
        entry.outcome = PageOutcome::Unchanged;
        return entry;
    }

    if !dry_run {
        if let Err(err) = fs::write(&target.path, &normalized.markup) {
            warn!(path = %target.path.display(), error = %err, "failed to write page");
            entry.warning = Some(format!("failed to write page: {err}"));
            return entry;
        }
    }

    entry.outcome = PageOutcome::Rewritten;
    entry
}

fn read_page(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    String::from_utf8(raw).with_context(|| format!("page is not valid UTF-8: {}", path.display()))
}

pub fn discover_root_pages(site_root: &Path) -> Vec<PageTarget> {
    list_html_files(site_root)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_root_page_name)
        })
        .map(|path| PageTarget {
            path,
            root_level: true,
        })
        .collect()
}

pub fn discover_review_pages(reviews_dir: &Path) -> Vec<PageTarget> {
    if !reviews_dir.is_dir() {
        warn!(path = %reviews_dir.display(), "reviews directory missing");
        return Vec::new();
    }

    list_html_files(reviews_dir)
        .into_iter()
        .map(|path| PageTarget {
            path,
            root_level: false,
        })
        .collect()
}

pub fn is_root_page_name(name: &str) -> bool {
    name == "index.html" || name == "reviews_index.html" || name.ends_with("_category.html")
}

fn list_html_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "failed to list directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "failed to read directory entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "html")
        })
        .collect();
    files.sort();
    files
}

pub fn nested_root_path(site_root: &Path, reviews_dir: &Path) -> Result<String> {
    let relative = if reviews_dir.is_absolute() {
        reviews_dir.strip_prefix(site_root).with_context(|| {
            format!(
                "reviews directory {} is outside site root {}",
                reviews_dir.display(),
                site_root.display()
            )
        })?
    } else {
        reviews_dir
    };

    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
    {
        bail!(
            "reviews directory must lie below the site root: {}",
            reviews_dir.display()
        );
    }

    Ok(root_path_for_depth(directory_depth(relative)))
}

fn directory_depth(relative: &Path) -> usize {
    relative
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .count()
}

fn count_outcome(pages: &[NormalizedPageEntry], outcome: PageOutcome) -> usize {
    pages.iter().filter(|page| page.outcome == outcome).count()
}
