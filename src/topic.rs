//! Topic derivation from page filenames.
//!
//! Review pages are named after their subject (`golgi-apparatus-review.html`),
//! so the filename is the only topical signal the tools trust. Both the audit
//! and the normalizer derive keywords and display titles from it here.

use std::path::Path;

/// Title and heading text of the seed template every review page started from.
pub const PLACEHOLDER_TITLE: &str = "Nuclear Bodies: Architecture and Function";

/// Filename fragment of the page whose real topic is the placeholder's own.
pub const PLACEHOLDER_TOPIC_SLUG: &str = "nuclear-bodies";

/// Suffix appended to healed `<title>` text.
pub const SITE_TITLE_SUFFIX: &str = " | Nuclear Biology Reviews";

const STOPWORDS: &[&str] = &[
    "html",
    "review",
    "reviews",
    "comprehensive",
    "critical",
    "complete",
    "updated",
    "enhanced",
    "standardized",
    "standardised",
    "standard",
    "cell",
    "cells",
    "nuclear",
    "nucleus",
    "biology",
    "biological",
    "and",
    "of",
    "the",
    "for",
    "with",
    "mechanisms",
    "mechanism",
    "processes",
    "pathways",
    "proteins",
    "diseases",
    "disease",
    "analysis",
    "dynamics",
];

// Most specific first; only the first match is stripped.
const QUALIFIER_SUFFIXES: &[&str] = &["-comprehensive-review", "-critical-review", "-review"];

/// Final path component without its extension.
pub fn file_slug(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Ordered, de-duplicated topic keywords of a filename, stopwords removed.
pub fn extract_keywords(name: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in file_slug(name).split(['-', '_']) {
        let token = token.trim().to_lowercase();
        if token.is_empty() || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if !keywords.contains(&token) {
            keywords.push(token);
        }
    }

    keywords
}

/// Human-readable title for a review filename, e.g. `golgi-apparatus-review.html`
/// becomes `Golgi Apparatus`.
pub fn derive_title(filename: &str) -> String {
    let slug = file_slug(filename);
    let stem = QUALIFIER_SUFFIXES
        .iter()
        .find_map(|suffix| slug.strip_suffix(suffix))
        .unwrap_or(slug);

    title_case(&stem.replace('-', " "))
}

/// Upper-cases every letter that follows a non-letter and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}

pub fn contains_placeholder(text: &str) -> bool {
    text.to_lowercase().contains(&PLACEHOLDER_TITLE.to_lowercase())
}

/// Whether the filename names the topic the placeholder text legitimately describes.
pub fn is_placeholder_topic(filename: &str) -> bool {
    filename.to_lowercase().contains(PLACEHOLDER_TOPIC_SLUG)
}
