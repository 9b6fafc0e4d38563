// src/span.rs
//
// Half-open byte ranges into the source text.

use std::fmt;
use std::ops::Range;

/// A byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Empty span at `offset` (an insertion point).
    pub const fn at(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Overlap test used to pick blocks for a selection.
    ///
    /// Two non-empty spans overlap when they share at least one byte. An empty
    /// span overlaps `self` when it lies anywhere within `self`, ends included,
    /// so a caret sitting at the end of a line still selects that line.
    pub fn overlaps(self, other: Span) -> bool {
        if other.is_empty() {
            self.start <= other.start && other.start <= self.end
        } else if self.is_empty() {
            other.start <= self.start && self.start <= other.end
        } else {
            self.start < other.end && other.start < self.end
        }
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
