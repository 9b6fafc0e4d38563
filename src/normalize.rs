// src/normalize.rs
//
// Outer-indent normalization: every continuation line of a block gets the
// first line's column width, rendered in the configured style. The first
// line is the reference and is never rewritten.

use std::borrow::Cow;

use crate::indent::{measure, render, split_leading_whitespace};
use crate::options::FormattingOptions;

/// Column width of the block's first line indentation.
pub fn reference_width(first_line: &str, options: &FormattingOptions) -> usize {
    let (ws, _) = split_leading_whitespace(first_line);
    measure(ws, options.tab_size)
}

/// Indentation every continuation line should carry.
pub fn continuation_indent(first_line: &str, options: &FormattingOptions) -> String {
    render(reference_width(first_line, options), options.indent_style())
}

/// Normalize the outer indentation of a block's line texts.
///
/// Lines whose whitespace already equals the target are borrowed back
/// unchanged, so a normalized block normalizes to itself.
pub fn normalize<'a>(lines: &[&'a str], options: &FormattingOptions) -> Vec<Cow<'a, str>> {
    let Some((first, rest)) = lines.split_first() else {
        return Vec::new();
    };
    let target = continuation_indent(first, options);

    let mut out = Vec::with_capacity(lines.len());
    out.push(Cow::Borrowed(*first));
    for line in rest {
        out.push(reindent(line, &target));
    }
    out
}

pub(crate) fn reindent<'a>(line: &'a str, target: &str) -> Cow<'a, str> {
    let (ws, tail) = split_leading_whitespace(line);
    if ws == target {
        Cow::Borrowed(line)
    } else {
        let mut s = String::with_capacity(target.len() + tail.len());
        s.push_str(target);
        s.push_str(tail);
        Cow::Owned(s)
    }
}
