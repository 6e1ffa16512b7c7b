use regex::Regex;

/// Flattened text of the first `<tag>` element in `markup`, or an empty string.
///
/// This is a pattern scan rather than a parse: it assumes the element does not
/// nest another element of the same name, which holds for `title` and `h1`.
pub fn extract_tag_text(markup: &str, tag: &str) -> String {
    let pattern = format!(
        r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>",
        tag = regex::escape(tag)
    );
    let Ok(element) = Regex::new(&pattern) else {
        return String::new();
    };

    let Some(inner) = element.captures(markup).and_then(|captures| captures.get(1)) else {
        return String::new();
    };

    collapse_whitespace(&strip_tags(inner.as_str()))
}

pub fn strip_tags(markup: &str) -> String {
    match Regex::new(r"<[^>]+>") {
        Ok(tag) => tag.replace_all(markup, "").into_owned(),
        Err(_) => markup.to_string(),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
