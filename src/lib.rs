// src/lib.rs
//
// reformadoc — normalizes `///` documentation comment blocks.
//
// - Finds every doc-comment block (maximal run of `///` lines) touching a span.
// - Re-indents continuation lines to the column width of the block's first
//   line, rendered with spaces or with tabs-then-spaces.
// - With a wrap column, re-breaks block content so nothing after the marker
//   exceeds it. Tags and their attribute lists are never split.
// - Returns minimal, ordered, non-overlapping edits against the original text;
//   blocks that are already normalized produce none.
//
// Formatting is a pure function of (text, span, options). Nothing is cached
// between calls, so independent calls may run on any number of threads.

pub mod edit;
pub mod error;
pub mod indent;
pub mod line;
pub mod locate;
pub mod normalize;
pub mod options;
pub mod reflow;
pub mod selection;
pub mod span;

use std::sync::atomic::{AtomicBool, Ordering};

pub use edit::{apply, TextEdit};
pub use error::FormatError;
pub use indent::IndentStyle;
pub use locate::{locate, Block};
pub use options::FormattingOptions;
pub use span::Span;

/// Edits that normalize every doc-comment block overlapping `span`.
///
/// # Panics
///
/// When `span` is reversed, extends past the end of `text`, or does not lie on
/// char boundaries.
pub fn format(text: &str, span: Span, options: &FormattingOptions) -> Vec<TextEdit> {
    check_span(text, span);
    locate(text, span)
        .flat_map(|block| format_block(text, &block, options))
        .collect()
}

/// Like [`format`], checking `cancel` before each block. A block is either
/// fully processed or not started; on cancellation nothing is returned.
///
/// # Panics
///
/// Under the same conditions as [`format`].
pub fn format_cancellable(
    text: &str,
    span: Span,
    options: &FormattingOptions,
    cancel: &AtomicBool,
) -> Result<Vec<TextEdit>, FormatError> {
    check_span(text, span);
    let mut edits = Vec::new();
    for (done, block) in locate(text, span).enumerate() {
        if cancel.load(Ordering::Relaxed) {
            log::debug!("cancelled after {done} block(s)");
            return Err(FormatError::Cancelled);
        }
        edits.extend(format_block(text, &block, options));
    }
    Ok(edits)
}

fn check_span(text: &str, span: Span) {
    assert!(span.start <= span.end, "reversed span {span}");
    assert!(
        span.end <= text.len(),
        "span {span} outside text of length {}",
        text.len()
    );
    assert!(
        text.is_char_boundary(span.start) && text.is_char_boundary(span.end),
        "span {span} splits a character"
    );
}

fn format_block(text: &str, block: &Block, options: &FormattingOptions) -> Vec<TextEdit> {
    let original: Vec<&str> = block.lines.iter().map(|l| l.text(text)).collect();
    let mut lines = normalize::normalize(&original, options);
    if let Some(wrap) = options.wrap_column {
        lines = reflow::reflow(&lines, wrap, options);
    }
    let edits = edit::diff(text, block, &lines);
    log::debug!(
        "block {} (lines {}..={}): {} edit(s)",
        block.span(),
        block.first().number,
        block.last().number,
        edits.len()
    );
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt_all(src: &str, options: FormattingOptions) -> String {
        let edits = format(src, Span::new(0, src.len()), &options);
        apply(src, &edits)
    }

    #[test]
    fn only_blocks_in_span_are_touched() {
        let src = "  /// a\n/// b\n\n  /// c\n/// d\n";
        let second = src.find("/// c").unwrap();
        let edits = format(src, Span::new(second, second + 1), &FormattingOptions::default());
        assert_eq!(apply(src, &edits), "  /// a\n/// b\n\n  /// c\n  /// d\n");
    }

    #[test]
    fn edits_from_several_blocks_stay_ordered() {
        let src = "  /// a\n/// b\nx\n  /// c\n/// d\n";
        let edits = format(src, Span::new(0, src.len()), &FormattingOptions::default());
        assert_eq!(edits.len(), 2);
        assert!(edit::is_ordered(&edits));
        assert_eq!(fmt_all(src, FormattingOptions::default()), "  /// a\n  /// b\nx\n  /// c\n  /// d\n");
    }

    #[test]
    fn cancellation_returns_nothing() {
        let src = "  /// a\n/// b\n";
        let cancel = AtomicBool::new(true);
        let got = format_cancellable(src, Span::new(0, src.len()), &FormattingOptions::default(), &cancel);
        assert_eq!(got, Err(FormatError::Cancelled));
    }

    #[test]
    #[should_panic(expected = "outside text")]
    fn span_past_end_panics() {
        format("/// a", Span::new(0, 99), &FormattingOptions::default());
    }

    #[test]
    #[should_panic(expected = "splits a character")]
    fn span_inside_character_panics() {
        format("é", Span::new(1, 2), &FormattingOptions::default());
    }

    #[test]
    #[should_panic(expected = "reversed span")]
    fn reversed_span_panics() {
        format("/// a", Span::new(3, 1), &FormattingOptions::default());
    }
}
