use std::fs;

use super::fragments::root_path_for_depth;
use super::page::{NormalizedPage, PageContext, normalize_page};
use super::*;
use crate::markup::extract_tag_text;
use crate::model::{FragmentAction, ScriptAction};

const PLACEHOLDER_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Nuclear Bodies: Architecture and Function</title>
    <script src="https://cdn.genspark.ai/widget.js"></script>
</head>
<body class="bg-gray-50">
    <header class="old-header"><a href="index.html">Old nav</a></header>
    <main class="max-w-4xl mx-auto">
        <h1>Nuclear Bodies: Architecture and Function</h1>
        <p>Stacked cisternae sort cargo &amp; lipids.</p>
    </main>
    <footer><p>Old footer</p></footer>
    <script id="genspark-tracker">window.tracker = true;</script>
    <script>console.log("genspark loaded");</script>
</body>
</html>
"#;

const BARE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Golgi Apparatus | Nuclear Biology Reviews</title></head>
<body>
<main><h1>Golgi Apparatus</h1><p>Body copy.</p></main>
</body>
</html>
"#;

const NOSCRIPT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Nuclear Bodies: Architecture and Function</title></head>
<body>
<noscript><iframe src="https://www.googletagmanager.com/ns.html?id=GTM-X" height="0" width="0"></iframe></noscript>
<main><h1>Nuclear Bodies: Architecture and Function</h1><p>x</p></main>
<noscript><img src="t.gif" alt="pixel"></noscript>
</body>
</html>
"#;

fn review_context(filename: &str) -> PageContext {
    PageContext {
        filename: filename.to_string(),
        root_level: false,
        root_path: "../..".to_string(),
    }
}

fn root_context(filename: &str) -> PageContext {
    PageContext {
        filename: filename.to_string(),
        root_level: true,
        root_path: ".".to_string(),
    }
}

fn normalize(markup: &str, context: &PageContext) -> NormalizedPage {
    normalize_page(markup, context)
}

#[test]
fn second_pass_is_byte_identical() {
    let context = review_context("golgi-apparatus-review.html");
    let first = normalize(PLACEHOLDER_PAGE, &context);
    let second = normalize(&first.markup, &context);
    let third = normalize(&second.markup, &context);

    assert_eq!(first.markup, second.markup);
    assert_eq!(second.markup, third.markup);
    assert_eq!(second.changes.script, ScriptAction::AlreadyPresent);
    assert_eq!(second.changes.vendor_scripts_removed, 0);
    assert!(!second.changes.title_healed);
    assert!(!second.changes.heading_healed);
}

#[test]
fn noscript_content_survives_repeated_passes() {
    let context = review_context("golgi-apparatus-review.html");
    let first = normalize(NOSCRIPT_PAGE, &context);
    let second = normalize(&first.markup, &context);
    let third = normalize(&second.markup, &context);

    assert_eq!(first.markup, second.markup);
    assert_eq!(second.markup, third.markup);
    assert!(third
        .markup
        .contains(r#"<noscript><img src="t.gif" alt="pixel"></noscript>"#));
    assert!(third.markup.contains(
        r#"<noscript><iframe src="https://www.googletagmanager.com/ns.html?id=GTM-X" height="0" width="0"></iframe></noscript>"#
    ));
    assert!(!third.markup.contains("&lt;img"));
    assert_eq!(extract_tag_text(&third.markup, "h1"), "Golgi Apparatus");
}

#[test]
fn bare_page_converges_after_one_pass() {
    let context = review_context("golgi-apparatus-review.html");
    let first = normalize(BARE_PAGE, &context);
    let second = normalize(&first.markup, &context);

    assert_eq!(first.changes.header, FragmentAction::Inserted);
    assert_eq!(first.changes.footer, FragmentAction::Inserted);
    assert_eq!(first.changes.script, ScriptAction::Added);
    assert_eq!(second.changes.header, FragmentAction::Replaced);
    assert_eq!(second.changes.footer, FragmentAction::Replaced);
    assert_eq!(first.markup, second.markup);
}

#[test]
fn vendor_scripts_are_removed() {
    let normalized = normalize(
        PLACEHOLDER_PAGE,
        &review_context("golgi-apparatus-review.html"),
    );

    assert_eq!(normalized.changes.vendor_scripts_removed, 3);
    assert!(!normalized.markup.contains("genspark"));
    assert!(normalized.markup.contains("mobile-menu-btn"));
}

#[test]
fn header_and_footer_are_replaced_with_canonical_fragments() {
    let normalized = normalize(
        PLACEHOLDER_PAGE,
        &review_context("golgi-apparatus-review.html"),
    );
    let markup = &normalized.markup;

    assert_eq!(normalized.changes.header, FragmentAction::Replaced);
    assert_eq!(normalized.changes.footer, FragmentAction::Replaced);
    assert!(!markup.contains("Old nav"));
    assert!(!markup.contains("Old footer"));
    assert_eq!(markup.matches("<header").count(), 1);
    assert_eq!(markup.matches("<footer").count(), 1);
    assert!(markup.contains(r#"href="../../reviews_index.html""#));
    assert!(markup.contains("Stacked cisternae sort cargo &amp; lipids."));

    let header_at = markup.find("<header").expect("header present");
    let main_at = markup.find("<main").expect("main present");
    let footer_at = markup.find("<footer").expect("footer present");
    assert!(header_at < main_at && main_at < footer_at);
}

#[test]
fn inserted_header_leads_body_and_footer_precedes_script() {
    let normalized = normalize(BARE_PAGE, &root_context("index.html"));
    let markup = &normalized.markup;

    let body_at = markup.find("<body>").expect("body present");
    let header_at = markup.find("<header").expect("header present");
    assert_eq!(header_at, body_at + "<body>".len());

    let footer_at = markup.find("<footer").expect("footer present");
    let script_at = markup.rfind("<script>").expect("script present");
    assert!(footer_at < script_at);
    assert!(markup.contains(r#"href="./index.html""#));
}

#[test]
fn interaction_script_is_not_duplicated() {
    let normalized = normalize(BARE_PAGE, &root_context("index.html"));
    let again = normalize(&normalized.markup, &root_context("index.html"));

    assert_eq!(again.markup.matches("getElementById('mobile-menu-btn')").count(), 1);
}

#[test]
fn placeholder_title_and_heading_are_healed_from_filename() {
    let normalized = normalize(
        PLACEHOLDER_PAGE,
        &review_context("golgi-apparatus-review.html"),
    );

    assert!(normalized.changes.title_healed);
    assert!(normalized.changes.heading_healed);
    assert_eq!(
        extract_tag_text(&normalized.markup, "title"),
        "Golgi Apparatus | Nuclear Biology Reviews"
    );
    assert_eq!(extract_tag_text(&normalized.markup, "h1"), "Golgi Apparatus");
}

#[test]
fn placeholder_topic_page_keeps_its_title() {
    let normalized = normalize(
        PLACEHOLDER_PAGE,
        &review_context("nuclear-bodies-review.html"),
    );

    assert!(!normalized.changes.title_healed);
    assert!(!normalized.changes.heading_healed);
    assert_eq!(
        extract_tag_text(&normalized.markup, "title"),
        "Nuclear Bodies: Architecture and Function"
    );
}

#[test]
fn root_pages_are_never_healed() {
    let normalized = normalize(PLACEHOLDER_PAGE, &root_context("cell_biology_category.html"));

    assert!(!normalized.changes.title_healed);
    assert_eq!(
        extract_tag_text(&normalized.markup, "h1"),
        "Nuclear Bodies: Architecture and Function"
    );
    assert!(normalized.markup.contains(r#"href="./downloads.html""#));
}

#[test]
fn root_path_follows_directory_depth() {
    assert_eq!(root_path_for_depth(0), ".");
    assert_eq!(root_path_for_depth(1), "..");
    assert_eq!(root_path_for_depth(2), "../..");
    assert_eq!(
        directory_depth(Path::new("nuclear_biology_reviews/reviews")),
        2
    );
    assert_eq!(directory_depth(Path::new("./reviews")), 1);
}

#[test]
fn nested_root_path_is_relative_to_site_root() {
    assert_eq!(
        nested_root_path(Path::new("site"), Path::new("nuclear_biology_reviews/reviews"))
            .expect("nested dir"),
        "../.."
    );
    assert_eq!(
        nested_root_path(Path::new("/srv/site"), Path::new("/srv/site/reviews"))
            .expect("absolute dir under root"),
        ".."
    );
}

#[test]
fn nested_root_path_rejects_dirs_outside_site_root() {
    assert!(nested_root_path(Path::new("site"), Path::new("../reviews")).is_err());
    assert!(nested_root_path(Path::new("site"), Path::new("reviews/../../other")).is_err());
    assert!(nested_root_path(Path::new("/srv/site"), Path::new("/srv/other/reviews")).is_err());
}

#[test]
fn run_fails_for_reviews_dir_outside_site_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = NormalizeArgs {
        site_root: dir.path().join("site"),
        reviews_dir: PathBuf::from("../reviews"),
        dry_run: true,
        manifest_path: None,
    };

    assert!(run(args).is_err());
}

#[test]
fn root_page_names_are_recognised() {
    assert!(is_root_page_name("index.html"));
    assert!(is_root_page_name("reviews_index.html"));
    assert!(is_root_page_name("chromatin_category.html"));
    assert!(!is_root_page_name("downloads.html"));
}

#[test]
fn run_rewrites_corpus_and_then_reports_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let site_root = dir.path();
    let reviews_dir = site_root.join("nuclear_biology_reviews/reviews");
    fs::create_dir_all(&reviews_dir).expect("create reviews dir");
    fs::write(site_root.join("index.html"), BARE_PAGE).expect("write index");
    fs::write(site_root.join("downloads.html"), BARE_PAGE).expect("write downloads");
    fs::write(reviews_dir.join("golgi-apparatus-review.html"), PLACEHOLDER_PAGE)
        .expect("write review");
    fs::write(reviews_dir.join("broken-review.html"), b"<title>\xff\xfe</title>")
        .expect("write broken review");

    let manifest_path = site_root.join("manifests/normalize.json");
    let args = NormalizeArgs {
        site_root: site_root.to_path_buf(),
        reviews_dir: PathBuf::from("nuclear_biology_reviews/reviews"),
        dry_run: false,
        manifest_path: Some(manifest_path.clone()),
    };

    run(args.clone()).expect("first run succeeds");
    let review = fs::read_to_string(reviews_dir.join("golgi-apparatus-review.html"))
        .expect("read review");
    assert_eq!(
        extract_tag_text(&review, "title"),
        "Golgi Apparatus | Nuclear Biology Reviews"
    );
    assert_eq!(
        fs::read_to_string(site_root.join("downloads.html")).expect("read downloads"),
        BARE_PAGE
    );

    let first: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).expect("manifest written"))
            .expect("manifest parses");
    assert_eq!(first["counts"]["page_count"], 3);
    assert_eq!(first["counts"]["rewritten"], 2);
    assert_eq!(first["counts"]["skipped"], 1);

    run(args).expect("second run succeeds");
    let second: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).expect("manifest written"))
            .expect("manifest parses");
    assert_eq!(second["counts"]["rewritten"], 0);
    assert_eq!(second["counts"]["unchanged"], 2);
    assert_eq!(second["counts"]["skipped"], 1);
}

#[test]
fn dry_run_leaves_pages_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golgi-apparatus-review.html");
    fs::write(&path, PLACEHOLDER_PAGE).expect("write review");

    let target = PageTarget {
        path: path.clone(),
        root_level: false,
    };
    let entry = process_page(&target, "../..", true);

    assert_eq!(entry.outcome, PageOutcome::Rewritten);
    assert_ne!(entry.sha256_before, entry.sha256_after);
    assert_eq!(fs::read_to_string(&path).expect("read back"), PLACEHOLDER_PAGE);
}

#[test]
fn unreadable_page_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = PageTarget {
        path: dir.path().join("absent-review.html"),
        root_level: false,
    };

    let entry = process_page(&target, "../..", false);
    assert_eq!(entry.outcome, PageOutcome::Skipped);
    assert!(entry.changes.is_none());
    assert!(entry.warning.is_some());
}
