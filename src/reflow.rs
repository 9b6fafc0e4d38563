// src/reflow.rs
//
// Content reflow for doc-comment blocks.
//
// - Content is whatever follows the `///` marker and at most one space.
// - Tags (`<...>`, scanned quote-aware) are atomic: whitespace inside a tag,
//   including inside attribute values, is never a break opportunity.
// - Runs of text lines form paragraphs which are joined and greedily packed
//   so no content exceeds the wrap column. A token wider than the column on
//   its own gets a line to itself.
// - Empty content lines and lines holding exactly one tag are copied through
//   and end the current paragraph. Lines between a lone `<code>` line and its
//   matching lone `</code>` line are preformatted and copied through too.
// - A paragraph whose packing matches its existing line breaks is left
//   byte-for-byte alone.

use std::borrow::Cow;
use std::num::NonZeroUsize;

use unicode_width::UnicodeWidthStr;

use crate::indent::{is_space_tab, split_leading_whitespace};
use crate::locate::MARKER;
use crate::normalize::{continuation_indent, reindent};
use crate::options::FormattingOptions;

/* =============================== Tag parsing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TagInfo<'a> {
    name: &'a [u8],
    is_end: bool,
    self_closing: bool,
}

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'.'
}

// `<` only opens a tag when followed by something that can start one, so
// prose like `a < b` stays breakable.
#[inline]
fn opens_tag(s: &[u8], i: usize) -> bool {
    s[i] == b'<'
        && s.get(i + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?' | b'_'))
}

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract tag name, end/self-closing flags from raw `<...>` bytes.
// Tags come from a single line's content or from lines joined with spaces,
// so only spaces and tabs can pad the name or the closing `/`.
fn parse_tag_info(tag: &[u8]) -> TagInfo<'_> {
    let n = tag.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && tag[i] == b'/' {
        is_end = true;
        i += 1;
    }
    while i < n && is_space_tab(tag[i]) {
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    let mut j = n - 1;
    while j > 0 && is_space_tab(tag[j - 1]) {
        j -= 1;
    }
    let self_closing = j >= 2 && tag[j - 1] == b'/';

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/* ================================ Tokens ================================= */

/// Split content into atomic words. A word ends at a space or tab outside
/// any tag; an unterminated `<` is an ordinary character.
fn tokenize(content: &str) -> Vec<&str> {
    let s = content.as_bytes();
    let n = s.len();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < n {
        while i < n && is_space_tab(s[i]) {
            i += 1;
        }
        if i >= n {
            break;
        }
        let start = i;
        while i < n && !is_space_tab(s[i]) {
            if opens_tag(s, i) {
                if let Some(j) = find_tag_end(s, i) {
                    i = j + 1;
                    continue;
                }
            }
            i += 1;
        }
        out.push(&content[start..i]);
    }
    out
}

/// Tag info when `token` is exactly one tag.
fn lone_tag(token: &str) -> Option<TagInfo<'_>> {
    let s = token.as_bytes();
    if !opens_tag(s, 0) {
        return None;
    }
    match find_tag_end(s, 0) {
        Some(end) if end + 1 == s.len() => Some(parse_tag_info(s)),
        _ => None,
    }
}

/* ============================ Line contents ============================== */

/// Content after the marker and at most one following space.
fn content_of(line: &str) -> &str {
    let (_, rest) = split_leading_whitespace(line);
    let after = rest.strip_prefix(MARKER).unwrap_or(rest);
    after.strip_prefix(' ').unwrap_or(after)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Empty,
    CodeOpen,
    CodeClose,
    LoneTag,
    Text,
}

fn content_kind(content: &str) -> ContentKind {
    let tokens = tokenize(content);
    match tokens.as_slice() {
        [] => ContentKind::Empty,
        [only] => match lone_tag(only) {
            Some(tag) if tag.name.eq_ignore_ascii_case(b"code") && !tag.self_closing => {
                if tag.is_end {
                    ContentKind::CodeClose
                } else {
                    ContentKind::CodeOpen
                }
            }
            Some(_) => ContentKind::LoneTag,
            None => ContentKind::Text,
        },
        _ => ContentKind::Text,
    }
}

/* ================================ Packing ================================ */

/// Greedy first-fit packing of tokens into lines of at most `wrap` columns,
/// one space between tokens.
fn pack<'t>(tokens: &[&'t str], wrap: usize) -> Vec<Vec<&'t str>> {
    let mut lines: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut col = 0usize;
    for &tok in tokens {
        let w = UnicodeWidthStr::width(tok);
        if current.is_empty() {
            current.push(tok);
            col = w;
        } else if col + 1 + w <= wrap {
            current.push(tok);
            col += 1 + w;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push(tok);
            col = w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/* ================================ Reflow ================================= */

fn reindent_cow<'a>(line: &Cow<'a, str>, target: &str) -> Cow<'a, str> {
    match line {
        Cow::Borrowed(s) => reindent(*s, target),
        Cow::Owned(s) => Cow::Owned(reindent(s, target).into_owned()),
    }
}

/// Re-break a block's content to `wrap_column` (measured from the end of the
/// marker and its space). Continuation lines, new ones included, are indented
/// to the first line's width in the configured style.
pub fn reflow<'a>(
    lines: &[Cow<'a, str>],
    wrap_column: NonZeroUsize,
    options: &FormattingOptions,
) -> Vec<Cow<'a, str>> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let first_indent = split_leading_whitespace(first).0.to_string();
    let target = continuation_indent(first, options);
    let wrap = wrap_column.get();

    let kinds: Vec<ContentKind> = lines.iter().map(|l| content_kind(content_of(l))).collect();

    let mut out: Vec<Cow<'a, str>> = Vec::with_capacity(lines.len());
    let keep = |out: &mut Vec<Cow<'a, str>>, idx: usize| {
        if idx == 0 {
            out.push(lines[0].clone());
        } else {
            out.push(reindent_cow(&lines[idx], &target));
        }
    };

    let mut i = 0usize;
    while i < lines.len() {
        match kinds[i] {
            ContentKind::Text => {
                let start = i;
                while i < lines.len() && kinds[i] == ContentKind::Text {
                    i += 1;
                }
                let contents: Vec<&str> = lines[start..i].iter().map(|l| content_of(l)).collect();
                let joined = contents.join(" ");
                let tokens = tokenize(&joined);
                let packed = pack(&tokens, wrap);

                // Kept lines must also fit as written: extra spaces between
                // tokens count towards the width. A lone token may overflow.
                let unchanged = packed.len() == contents.len()
                    && packed.iter().zip(&contents).all(|(p, c)| {
                        p.as_slice() == tokenize(c).as_slice()
                            && (p.len() == 1 || UnicodeWidthStr::width(*c) <= wrap)
                    });
                if unchanged {
                    for idx in start..i {
                        keep(&mut out, idx);
                    }
                    continue;
                }

                log::debug!(
                    "reflowed paragraph at block line {}: {} -> {} lines",
                    start,
                    contents.len(),
                    packed.len()
                );
                for (k, words) in packed.iter().enumerate() {
                    let indent = if start == 0 && k == 0 {
                        first_indent.as_str()
                    } else {
                        target.as_str()
                    };
                    let mut line = String::with_capacity(indent.len() + MARKER.len() + 1 + wrap);
                    line.push_str(indent);
                    line.push_str(MARKER);
                    line.push(' ');
                    line.push_str(&words.join(" "));
                    out.push(Cow::Owned(line));
                }
            }
            ContentKind::CodeOpen => {
                let close = (i + 1..lines.len()).find(|&k| kinds[k] == ContentKind::CodeClose);
                let end = close.unwrap_or(i);
                for idx in i..=end {
                    keep(&mut out, idx);
                }
                i = end + 1;
            }
            ContentKind::Empty | ContentKind::LoneTag | ContentKind::CodeClose => {
                keep(&mut out, i);
                i += 1;
            }
        }
    }
    out
}
