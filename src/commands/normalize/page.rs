use tracing::info;

use super::document::{Document, Fragment};
use super::fragments::{self, MENU_TOGGLE_MARKER, VENDOR_MARKER};
use crate::markup::collapse_whitespace;
use crate::model::{FragmentAction, PageChanges, ScriptAction};
use crate::topic::{SITE_TITLE_SUFFIX, contains_placeholder, derive_title, is_placeholder_topic};

#[derive(Debug, Clone)]
pub struct PageContext {
    pub filename: String,
    pub root_level: bool,
    pub root_path: String,
}

#[derive(Debug, Clone)]
pub struct NormalizedPage {
    pub markup: String,
    pub changes: PageChanges,
}

/// Re-running on its own output yields identical markup.
pub fn normalize_page(markup: &str, context: &PageContext) -> NormalizedPage {
    let mut document = Document::parse(markup);

    let vendor_scripts_removed = strip_vendor_scripts(&mut document);

    let header = Fragment::parse(&fragments::header(&context.root_path));
    let footer = Fragment::parse(&fragments::footer(&context.root_path));

    let header_action = place_fragment(&mut document, "header", &header, Placement::FirstChild);
    let footer_action = place_fragment(&mut document, "footer", &footer, Placement::LastChild);
    let script_action = ensure_interaction_script(&mut document);

    let (title_healed, heading_healed) = if context.root_level {
        (false, false)
    } else {
        heal_placeholder(&mut document, &context.filename)
    };

    NormalizedPage {
        markup: document.serialize(),
        changes: PageChanges {
            vendor_scripts_removed,
            header: header_action,
            footer: footer_action,
            script: script_action,
            title_healed,
            heading_healed,
        },
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    FirstChild,
    LastChild,
}

fn strip_vendor_scripts(document: &mut Document) -> usize {
    let vendor: Vec<_> = document
        .find_all("script")
        .into_iter()
        .filter(|&id| {
            let marked = |value: Option<&str>| value.is_some_and(|v| v.contains(VENDOR_MARKER));
            marked(document.attr(id, "src"))
                || marked(document.attr(id, "id"))
                || document.text(id).contains(VENDOR_MARKER)
        })
        .collect();

    for id in &vendor {
        document.remove(*id);
    }
    vendor.len()
}

fn place_fragment(
    document: &mut Document,
    tag: &str,
    fragment: &Fragment,
    placement: Placement,
) -> FragmentAction {
    if let Some(existing) = document.find_first(tag) {
        document.replace_with(existing, fragment);
        return FragmentAction::Replaced;
    }

    let Some(body) = document.body() else {
        return FragmentAction::NoBody;
    };
    match placement {
        Placement::FirstChild => document.prepend_child(body, fragment),
        Placement::LastChild => document.append_child(body, fragment),
    }
    FragmentAction::Inserted
}

fn ensure_interaction_script(document: &mut Document) -> ScriptAction {
    let installed = document
        .find_all("script")
        .into_iter()
        .any(|id| document.text(id).contains(MENU_TOGGLE_MARKER));
    if installed {
        return ScriptAction::AlreadyPresent;
    }

    let Some(body) = document.body() else {
        return ScriptAction::NoBody;
    };
    document.append_child(body, &Fragment::parse(fragments::interaction_script()));
    ScriptAction::Added
}

fn heal_placeholder(document: &mut Document, filename: &str) -> (bool, bool) {
    if is_placeholder_topic(filename) {
        return (false, false);
    }
    let derived = derive_title(filename);

    let mut title_healed = false;
    if let Some(title) = document.find_first("title") {
        let current = collapse_whitespace(&document.text(title));
        if contains_placeholder(&current) {
            let healed = format!("{derived}{SITE_TITLE_SUFFIX}");
            info!(page = %filename, from = %current, to = %healed, "fixing title");
            document.set_text(title, &healed);
            title_healed = true;
        }
    }

    let mut heading_healed = false;
    if let Some(heading) = document.find_first("h1") {
        if contains_placeholder(&collapse_whitespace(&document.text(heading))) {
            info!(page = %filename, to = %derived, "fixing heading");
            document.set_text(heading, &derived);
            heading_healed = true;
        }
    }

    (title_healed, heading_healed)
}
