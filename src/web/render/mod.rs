//! Server-side HTML rendering.

pub mod layout;
pub mod markdown;
pub mod pages;

pub use layout::{Tab, page};

use crate::error::AppError;

/// Banner shown above a feature's form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
        }
    }
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::error(err.user_message())
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{}" role="status">{}</div>"#,
            self.kind.css_class(),
            escape_html(&self.message)
        )
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_notice_html_escapes_message() {
        let html = Notice::error("<b>bad</b>").to_html();
        assert!(html.contains("notice-error"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
    }
}
