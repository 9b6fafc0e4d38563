// src/indent.rs
//
// Column arithmetic for leading whitespace. `render` and `measure` are the
// only places tab stops are computed; everything else goes through them.

use std::num::NonZeroUsize;

/// How a column width is written out as whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces,
    /// Tabs of the given width, then spaces for the remainder.
    Tabs { tab_size: NonZeroUsize },
}

/// Render `width` columns of indentation in `style`.
pub fn render(width: usize, style: IndentStyle) -> String {
    match style {
        IndentStyle::Spaces => " ".repeat(width),
        IndentStyle::Tabs { tab_size } => {
            let t = tab_size.get();
            let mut s = String::with_capacity(width / t + width % t);
            s.extend(std::iter::repeat('\t').take(width / t));
            s.extend(std::iter::repeat(' ').take(width % t));
            s
        }
    }
}

/// Column width of a whitespace prefix. A tab advances to the next multiple
/// of `tab_size`; the first character that is neither space nor tab stops
/// the walk.
pub fn measure(ws: &str, tab_size: NonZeroUsize) -> usize {
    let t = tab_size.get();
    let mut col = 0usize;
    for b in ws.bytes() {
        match b {
            b' ' => col += 1,
            b'\t' => col += t - col % t,
            _ => break,
        }
    }
    col
}

#[inline]
pub(crate) fn is_space_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Split a line into its leading spaces/tabs and the rest.
pub fn split_leading_whitespace(line: &str) -> (&str, &str) {
    let n = line
        .bytes()
        .position(|b| !is_space_tab(b))
        .unwrap_or(line.len());
    line.split_at(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[rstest]
    #[case(0, IndentStyle::Spaces, "")]
    #[case(4, IndentStyle::Spaces, "    ")]
    #[case(4, IndentStyle::Tabs { tab_size: nz(4) }, "\t")]
    #[case(4, IndentStyle::Tabs { tab_size: nz(3) }, "\t ")]
    #[case(9, IndentStyle::Tabs { tab_size: nz(4) }, "\t\t ")]
    #[case(2, IndentStyle::Tabs { tab_size: nz(8) }, "  ")]
    fn render_cases(#[case] width: usize, #[case] style: IndentStyle, #[case] expected: &str) {
        assert_eq!(render(width, style), expected);
    }

    #[rstest]
    #[case("", 4, 0)]
    #[case("    ", 4, 4)]
    #[case("\t", 4, 4)]
    #[case("\t", 3, 3)]
    #[case("  \t", 4, 4)]
    #[case("    \t", 4, 8)]
    #[case(" \t ", 3, 4)]
    #[case("  x  ", 4, 2)]
    fn measure_cases(#[case] ws: &str, #[case] tab: usize, #[case] expected: usize) {
        assert_eq!(measure(ws, nz(tab)), expected);
    }

    #[test]
    fn render_is_stable_under_measure() {
        for t in 1..=8 {
            for w in 0..40 {
                for style in [IndentStyle::Spaces, IndentStyle::Tabs { tab_size: nz(t) }] {
                    let once = render(w, style);
                    assert_eq!(measure(&once, nz(t)), w);
                    assert_eq!(render(measure(&once, nz(t)), style), once);
                }
            }
        }
    }

    #[test]
    fn split_whitespace() {
        assert_eq!(split_leading_whitespace(" \t/// x"), (" \t", "/// x"));
        assert_eq!(split_leading_whitespace("   "), ("   ", ""));
        assert_eq!(split_leading_whitespace("x"), ("", "x"));
    }
}
