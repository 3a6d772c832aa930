//! Turning free-text model output into list items.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// `*` only counts as a bullet when followed by whitespace, so `**bold**` survives
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[\-•·→▶»]+\s*|\*+(?:\s+|$))").expect("valid bullet regex"));
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid numbering regex"));
static PAREN_NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d+\)\s*").expect("valid numbering regex"));

/// Which list marker a line started with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    None,
    Bullet,
    Number,
}

/// A model output line after list markers were stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub text: String,
    pub marker: Marker,
    /// Leading whitespace width of the raw line; nested items are deeper
    pub indent: usize,
}

impl ListLine {
    pub fn is_marked(&self) -> bool {
        self.marker != Marker::None
    }
}

/// Strip leading bullets, `1.` / `1)` numbering and `(1)` numbering.
/// A line wrapped entirely in `**` or `__` is unwrapped first.
pub fn clean_step(line: &str) -> ListLine {
    let indent = line.len() - line.trim_start().len();
    let mut text = unwrap_emphasis(line.trim());
    let mut marker = Marker::None;

    if let Some(m) = BULLET.find(text) {
        text = &text[m.end()..];
        marker = Marker::Bullet;
    }
    for re in [&*NUMBERED, &*PAREN_NUMBERED] {
        if let Some(m) = re.find(text) {
            text = &text[m.end()..];
            marker = Marker::Number;
        }
    }
    ListLine {
        text: unwrap_emphasis(text.trim()).to_string(),
        marker,
        indent,
    }
}

fn unwrap_emphasis(text: &str) -> &str {
    for delim in ["**", "__"] {
        if let Some(inner) = text
            .strip_prefix(delim)
            .and_then(|rest| rest.strip_suffix(delim))
            && !inner.is_empty()
            && !inner.contains(delim)
        {
            return inner.trim();
        }
    }
    text
}

/// Every non-blank line of the response, cleaned, in order.
pub fn parse_steps(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_step)
        .filter(|l| !l.text.is_empty())
        .map(|l| l.text)
        .collect()
}

/// Up to `count` distinct ideas from the response.
///
/// If any line carries a list marker, prose around the list is ignored and
/// only the outermost marked lines count: least indented first, and numbered
/// items win over bullets at that depth (bullets are then sub-points).
/// Duplicates compare case-insensitively.
pub fn parse_ideas(raw: &str, count: usize) -> Vec<String> {
    let lines: Vec<ListLine> = raw
        .lines()
        .map(clean_step)
        .filter(|l| !l.text.is_empty())
        .collect();

    let top_level = lines
        .iter()
        .filter(|l| l.is_marked())
        .map(|l| l.indent)
        .min();
    let items: Vec<ListLine> = match top_level {
        Some(indent) => {
            let outer: Vec<ListLine> = lines
                .into_iter()
                .filter(|l| l.is_marked() && l.indent == indent)
                .collect();
            let kind = outer.iter().map(|l| l.marker).max().unwrap_or(Marker::Bullet);
            outer.into_iter().filter(|l| l.marker == kind).collect()
        }
        None => lines,
    };

    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|l| l.text)
        .filter(|text| seen.insert(text.to_lowercase()))
        .take(count)
        .collect()
}
