use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sitekit",
    version,
    about = "Template consistency audit and structural normalization for the review site"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report placeholder titles, keyword mismatches and missing pages.
    Audit(AuditArgs),
    /// Rewrite shared header, footer and menu script to the canonical versions.
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    #[arg(long)]
    pub mapping_path: Option<PathBuf>,

    /// Directory of review pages, relative to the site root; defaults to `reviews`.
    #[arg(long)]
    pub reviews_dir: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long)]
    pub findings_json: Option<PathBuf>,
}

impl AuditArgs {
    pub fn mapping_path(&self) -> PathBuf {
        self.mapping_path
            .clone()
            .unwrap_or_else(|| self.site_root.join("docs").join("file-mapping.json"))
    }

    pub fn reviews_dir(&self) -> PathBuf {
        resolve_under(&self.site_root, self.reviews_dir.as_deref(), "reviews")
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_path.clone().unwrap_or_else(|| {
            self.site_root
                .join("reports")
                .join("review_template_audit.md")
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Directory of nested review pages, relative to the site root.
    #[arg(long, default_value = "nuclear_biology_reviews/reviews")]
    pub reviews_dir: PathBuf,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

fn resolve_under(root: &Path, explicit: Option<&Path>, fallback: &str) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join(fallback),
    }
}
