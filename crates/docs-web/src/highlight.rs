//! Literal, case-insensitive search-term highlighting.
//!
//! The term is user input, so it is always passed through `regex::escape`
//! before a matcher is built: `a.b` must only ever match the three
//! characters `a.b`.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::escape::escape_html_text;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

fn literal_matcher(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Byte ranges of every case-insensitive, non-overlapping occurrence of
/// `term` in `text`.
pub fn match_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    match literal_matcher(term) {
        Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
        None => Vec::new(),
    }
}

/// Wrap every occurrence of `term` in `<mark>` markers. The text is not
/// escaped; an empty term returns `text` unchanged.
pub fn highlight_term(text: &str, term: &str) -> String {
    wrap_matches(text, term, |s| s.to_string())
}

/// Like [`highlight_term`], but HTML-escapes matched and unmatched segments
/// independently so the output is safe to inject as markup.
pub fn highlight_html(text: &str, term: &str) -> String {
    wrap_matches(text, term, escape_html_text)
}

fn wrap_matches(text: &str, term: &str, escape: impl Fn(&str) -> String) -> String {
    let ranges = match_ranges(text, term);
    if ranges.is_empty() {
        return escape(text);
    }

    let mut out = String::with_capacity(text.len() + ranges.len() * 13);
    let mut pos = 0;
    for range in ranges {
        out.push_str(&escape(&text[pos..range.start]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape(&text[range.clone()]));
        out.push_str(MARK_CLOSE);
        pos = range.end;
    }
    out.push_str(&escape(&text[pos..]));
    out
}
