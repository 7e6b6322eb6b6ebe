//! # Snippet Peek
//!
//! Condensed view of an example snippet for listings. Blank lines are dropped; short
//! snippets are shown whole, long ones as a head and a tail around a count of hidden
//! lines.

use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SnippetPeek {
    pub head: String,
    pub hidden_lines: Option<usize>,
    pub tail: Option<String>,
}

/// Peeks at `code`, keeping `lines` non-blank lines at each end.
///
/// Snippets with at most `lines * 2 + 3` non-blank lines are not cut: hiding fewer
/// than four lines saves nothing worth the marker.
pub fn peek_snippet(code: &str, lines: usize) -> SnippetPeek {
    let kept: Vec<&str> = code.lines().filter(|l| !l.trim().is_empty()).collect();
    let total = kept.len();

    let kept_ends = lines.saturating_mul(2);
    if total <= kept_ends.saturating_add(3) {
        return SnippetPeek {
            head: kept.join("\n"),
            hidden_lines: None,
            tail: None,
        };
    }

    SnippetPeek {
        head: kept[..lines].join("\n"),
        hidden_lines: Some(total - kept_ends),
        tail: Some(kept[total - lines..].join("\n")),
    }
}
