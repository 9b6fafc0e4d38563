// src/line.rs
//
// Line splitting over an immutable text snapshot. Line breaks are recorded,
// never normalized, so edits can reproduce them verbatim.

use memchr::memchr;

use crate::span::Span;

/// Kind of line terminator following a line's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    None,
    Lf,
    CrLf,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::None => "",
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
        }
    }

    pub fn is_none(self) -> bool {
        self == LineBreak::None
    }
}

/// One line of source text: its content span (terminator excluded) and the
/// terminator that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line number.
    pub number: usize,
    pub content: Span,
    pub line_break: LineBreak,
}

impl Line {
    /// Content text of the line, without its terminator.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.content.range()]
    }
}

/// Iterator over the lines of a text, in document order.
///
/// Text ending in a terminator has no trailing empty line; empty text has no
/// lines at all.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    src: &'a [u8],
    pos: usize,
    number: usize,
}

pub fn lines(src: &str) -> Lines<'_> {
    Lines {
        src: src.as_bytes(),
        pos: 0,
        number: 0,
    }
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let n = self.src.len();
        if self.pos >= n {
            return None;
        }
        let start = self.pos;
        let line = match memchr(b'\n', &self.src[start..]) {
            Some(off) => {
                let lf = start + off;
                let crlf = lf > start && self.src[lf - 1] == b'\r';
                let (end, line_break) = if crlf {
                    (lf - 1, LineBreak::CrLf)
                } else {
                    (lf, LineBreak::Lf)
                };
                self.pos = lf + 1;
                Line {
                    number: self.number,
                    content: Span::new(start, end),
                    line_break,
                }
            }
            None => {
                self.pos = n;
                Line {
                    number: self.number,
                    content: Span::new(start, n),
                    line_break: LineBreak::None,
                }
            }
        };
        self.number += 1;
        Some(line)
    }
}
