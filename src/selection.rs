// src/selection.rs
//
// Helpers for callers turning an editor selection into the span handed to
// `format`. The engine itself only ever sees concrete spans.

use memchr::{memchr, memrchr};

use crate::span::Span;

/// Widen an empty selection (a caret) by one character on each side, without
/// crossing the boundaries of the line holding it. Non-empty selections are
/// returned unchanged.
pub fn widen(src: &str, selection: Span) -> Span {
    if !selection.is_empty() {
        return selection;
    }
    let bytes = src.as_bytes();
    let pos = selection.start.min(bytes.len());
    let line_start = memrchr(b'\n', &bytes[..pos]).map(|x| x + 1).unwrap_or(0);
    let mut line_end = memchr(b'\n', &bytes[pos..])
        .map(|x| pos + x)
        .unwrap_or(bytes.len());
    if line_end > line_start && bytes[line_end - 1] == b'\r' && line_end < bytes.len() {
        line_end -= 1;
    }

    let start = if pos > line_start {
        prev_char_boundary(src, pos)
    } else {
        pos
    };
    let end = if pos < line_end {
        next_char_boundary(src, pos)
    } else {
        pos
    };
    Span::new(start, end)
}

fn prev_char_boundary(src: &str, pos: usize) -> usize {
    let mut i = pos - 1;
    while !src.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(src: &str, pos: usize) -> usize {
    let mut i = pos + 1;
    while !src.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_mid_line_grows_both_ways() {
        assert_eq!(widen("abc\ndef", Span::at(5)), Span::new(4, 6));
    }

    #[test]
    fn caret_at_line_start_only_grows_right() {
        assert_eq!(widen("abc\ndef", Span::at(4)), Span::new(4, 5));
    }

    #[test]
    fn caret_at_line_end_only_grows_left() {
        assert_eq!(widen("abc\ndef", Span::at(3)), Span::new(2, 3));
        assert_eq!(widen("abc\r\ndef", Span::at(3)), Span::new(2, 3));
    }

    #[test]
    fn caret_on_empty_line_stays_put() {
        assert_eq!(widen("a\n\nb", Span::at(2)), Span::at(2));
    }

    #[test]
    fn multibyte_neighbours() {
        let src = "é/é";
        assert_eq!(widen(src, Span::at(2)), Span::new(0, 3));
    }

    #[test]
    fn ranges_pass_through() {
        assert_eq!(widen("abc", Span::new(0, 2)), Span::new(0, 2));
    }
}
