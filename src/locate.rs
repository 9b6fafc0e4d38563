// src/locate.rs
//
// Finds doc-comment blocks: maximal runs of consecutive `///` lines. A blank
// line or any other line ends the current block.

use crate::indent::split_leading_whitespace;
use crate::line::{Line, Lines};
use crate::span::Span;

/// The doc-comment marker.
pub const MARKER: &str = "///";

/// What a line is, as far as block location is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Marker,
    Blank,
    Other,
}

/// Classify one line's content (terminator excluded).
pub fn classify(line: &str) -> LineKind {
    let (_, rest) = split_leading_whitespace(line);
    if rest.is_empty() {
        LineKind::Blank
    } else if is_marker_start(rest) {
        LineKind::Marker
    } else {
        LineKind::Other
    }
}

// `////` and longer runs are ordinary comments.
fn is_marker_start(s: &str) -> bool {
    s.starts_with(MARKER) && !s[MARKER.len()..].starts_with('/')
}

/// A doc-comment block. Always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn first(&self) -> &Line {
        &self.lines[0]
    }

    pub fn last(&self) -> &Line {
        &self.lines[self.lines.len() - 1]
    }

    /// From the first line's start to the end of the last line's content.
    pub fn span(&self) -> Span {
        Span::new(self.first().content.start, self.last().content.end)
    }
}

/// Lazy iterator over the blocks overlapping a span. Cloning it restarts
/// from the clone point.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    src: &'a str,
    lines: Lines<'a>,
    span: Span,
    pending: Option<Line>,
}

/// Blocks of `src` overlapping `span`, in document order.
pub fn locate(src: &str, span: Span) -> Blocks<'_> {
    Blocks {
        src,
        lines: crate::line::lines(src),
        span,
        pending: None,
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            let first = match self.pending.take() {
                Some(line) => line,
                None => self.lines.next()?,
            };
            if first.content.start > self.span.end {
                return None;
            }
            if classify(first.text(self.src)) != LineKind::Marker {
                continue;
            }

            let mut block = Block { lines: vec![first] };
            for line in self.lines.by_ref() {
                if classify(line.text(self.src)) == LineKind::Marker {
                    block.lines.push(line);
                } else {
                    self.pending = Some(line);
                    break;
                }
            }

            if block.span().overlaps(self.span) {
                log::trace!(
                    "block at lines {}..={} ({})",
                    block.first().number,
                    block.last().number,
                    block.span()
                );
                return Some(block);
            }
        }
    }
}
