// src/edit.rs
//
// Turns a block's normalized lines into text edits against the original
// snapshot, and applies edit lists.
//
// Edits from one call are sorted by start offset and never overlap, so they
// can all be resolved against the original text.

use std::borrow::Cow;

use crate::indent::split_leading_whitespace;
use crate::line::LineBreak;
use crate::locate::Block;
use crate::span::Span;

/// Replace the bytes in `span` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        TextEdit {
            span,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        TextEdit::new(Span::at(offset), text)
    }

    pub fn delete(span: Span) -> Self {
        TextEdit::new(span, String::new())
    }
}

/// Minimal edits turning `block` (as found in `src`) into `new_lines`.
///
/// Leading and trailing lines that did not change are skipped. When the line
/// count of the remaining range is unchanged every changed line gets its own
/// edit, narrowed to the indentation when only that differs; otherwise the
/// range is replaced in one edit.
pub fn diff(src: &str, block: &Block, new_lines: &[Cow<'_, str>]) -> Vec<TextEdit> {
    let old: Vec<&str> = block.lines.iter().map(|l| l.text(src)).collect();
    let new: Vec<&str> = new_lines.iter().map(|l| l.as_ref()).collect();

    let mut prefix = 0usize;
    while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
        prefix += 1;
    }
    let mut suffix = 0usize;
    while prefix + suffix < old.len()
        && prefix + suffix < new.len()
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let old_mid = prefix..old.len() - suffix;
    let new_mid = &new[prefix..new.len() - suffix];

    if old_mid.is_empty() && new_mid.is_empty() {
        return Vec::new();
    }

    if old_mid.len() == new_mid.len() {
        return old_mid
            .zip(new_mid)
            .filter_map(|(idx, &replacement)| {
                let line = &block.lines[idx];
                let current = old[idx];
                if current == replacement {
                    return None;
                }
                let (old_ws, old_rest) = split_leading_whitespace(current);
                let (new_ws, new_rest) = split_leading_whitespace(replacement);
                if old_rest == new_rest {
                    let start = line.content.start;
                    Some(TextEdit::new(Span::new(start, start + old_ws.len()), new_ws))
                } else {
                    Some(TextEdit::new(line.content, replacement))
                }
            })
            .collect();
    }

    let sep = block_line_break(block).as_str();
    let lines = &block.lines;

    let edit = if old_mid.is_empty() {
        if prefix < lines.len() {
            let mut text = String::new();
            for l in new_mid {
                text.push_str(l);
                text.push_str(sep);
            }
            TextEdit::insert(lines[prefix].content.start, text)
        } else {
            let mut text = String::new();
            for l in new_mid {
                text.push_str(sep);
                text.push_str(l);
            }
            TextEdit::insert(lines[prefix - 1].content.end, text)
        }
    } else if new_mid.is_empty() {
        let (start, end) = if old_mid.end < lines.len() {
            (lines[old_mid.start].content.start, lines[old_mid.end].content.start)
        } else if old_mid.start > 0 {
            (lines[old_mid.start - 1].content.end, lines[old_mid.end - 1].content.end)
        } else {
            (block.span().start, block.span().end)
        };
        TextEdit::delete(Span::new(start, end))
    } else {
        let span = Span::new(
            lines[old_mid.start].content.start,
            lines[old_mid.end - 1].content.end,
        );
        TextEdit::new(span, new_mid.join(sep))
    };
    vec![edit]
}

/// Terminator used for lines the formatter introduces: the first one the
/// block already uses, LF if it has none.
fn block_line_break(block: &Block) -> LineBreak {
    block
        .lines
        .iter()
        .map(|l| l.line_break)
        .find(|b| !b.is_none())
        .unwrap_or(LineBreak::Lf)
}

/// True when `edits` are sorted by start and pairwise disjoint.
pub fn is_ordered(edits: &[TextEdit]) -> bool {
    edits.windows(2).all(|w| {
        let (a, b) = (w[0].span, w[1].span);
        // Two insertions at one offset would have no defined order.
        a.end <= b.start && !(a.is_empty() && b.is_empty() && a.start == b.start)
    })
}

/// Apply ordered, non-overlapping edits to the text they were computed
/// against.
pub fn apply(src: &str, edits: &[TextEdit]) -> String {
    debug_assert!(is_ordered(edits), "edits must be ordered and disjoint");
    let grow: usize = edits.iter().map(|e| e.replacement.len()).sum();
    let mut out = String::with_capacity(src.len() + grow);
    let mut cursor = 0usize;
    for e in edits {
        out.push_str(&src[cursor..e.span.start]);
        out.push_str(&e.replacement);
        cursor = e.span.end;
    }
    out.push_str(&src[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate;
    use pretty_assertions::assert_eq;

    fn only_block(src: &str) -> Block {
        let mut blocks = locate(src, Span::new(0, src.len()));
        let block = blocks.next().unwrap();
        assert!(blocks.next().is_none());
        block
    }

    fn run(src: &str, new: &[&str]) -> (Vec<TextEdit>, String) {
        let block = only_block(src);
        let new: Vec<Cow<str>> = new.iter().map(|l| Cow::Borrowed(*l)).collect();
        let edits = diff(src, &block, &new);
        assert!(is_ordered(&edits));
        let out = apply(src, &edits);
        (edits, out)
    }

    #[test]
    fn identical_lines_yield_nothing() {
        let src = "  /// a\n  /// b\n";
        let (edits, out) = run(src, &["  /// a", "  /// b"]);
        assert!(edits.is_empty());
        assert_eq!(out, src);
    }

    #[test]
    fn indentation_only_change_touches_whitespace() {
        let src = "    /// a\n/// b\n  /// c\n";
        let (edits, out) = run(src, &["    /// a", "    /// b", "    /// c"]);
        assert_eq!(
            edits,
            vec![
                TextEdit::new(Span::new(10, 10), "    "),
                TextEdit::new(Span::new(16, 18), "    "),
            ]
        );
        assert_eq!(out, "    /// a\n    /// b\n    /// c\n");
    }

    #[test]
    fn content_change_replaces_line() {
        let src = "/// a\n/// b c\n";
        let (edits, out) = run(src, &["/// a", "/// b  c"]);
        assert_eq!(edits, vec![TextEdit::new(Span::new(6, 13), "/// b  c")]);
        assert_eq!(out, "/// a\n/// b  c\n");
    }

    #[test]
    fn split_line_inserts_with_block_terminator() {
        let src = "/// a\r\n/// b c\r\n/// d\r\n";
        let (edits, out) = run(src, &["/// a", "/// b", "/// c", "/// d"]);
        assert_eq!(edits.len(), 1);
        assert_eq!(out, "/// a\r\n/// b\r\n/// c\r\n/// d\r\n");
    }

    #[test]
    fn joined_lines_delete_range() {
        let src = "/// a\n/// b\n/// c\n";
        let (_, out) = run(src, &["/// a b c"]);
        assert_eq!(out, "/// a b c\n");
    }

    #[test]
    fn pure_insert_after_last_line() {
        let src = "/// a\n/// b";
        let (edits, out) = run(src, &["/// a", "/// b", "/// c"]);
        assert_eq!(edits, vec![TextEdit::insert(11, "\n/// c")]);
        assert_eq!(out, "/// a\n/// b\n/// c");
    }

    #[test]
    fn pure_insert_before_suffix() {
        let src = "/// a\n/// c\n";
        let (_, out) = run(src, &["/// a", "/// b", "/// c"]);
        assert_eq!(out, "/// a\n/// b\n/// c\n");
    }

    #[test]
    fn pure_delete_of_trailing_lines() {
        let src = "/// a\n/// b\n/// c";
        let (edits, out) = run(src, &["/// a"]);
        assert_eq!(edits, vec![TextEdit::delete(Span::new(5, 17))]);
        assert_eq!(out, "/// a");
    }

    #[test]
    fn apply_keeps_untouched_text() {
        let src = "abcdef";
        let edits = [
            TextEdit::new(Span::new(1, 2), "B"),
            TextEdit::insert(4, "-"),
        ];
        assert_eq!(apply(src, &edits), "aBcd-ef");
    }

    #[test]
    fn ordering_check() {
        assert!(is_ordered(&[
            TextEdit::insert(1, "x"),
            TextEdit::delete(Span::new(1, 3)),
        ]));
        assert!(!is_ordered(&[
            TextEdit::delete(Span::new(0, 3)),
            TextEdit::delete(Span::new(2, 4)),
        ]));
        assert!(!is_ordered(&[TextEdit::insert(1, "x"), TextEdit::insert(1, "y")]));
    }
}
