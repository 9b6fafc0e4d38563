// src/options.rs

use std::num::NonZeroUsize;

use crate::indent::IndentStyle;

const DEFAULT_TAB_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

/// Options for one formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOptions {
    pub use_tabs: bool,
    pub tab_size: NonZeroUsize,
    /// Maximum content width after the marker. `None` disables reflow.
    pub wrap_column: Option<NonZeroUsize>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        FormattingOptions {
            use_tabs: false,
            tab_size: DEFAULT_TAB_SIZE,
            wrap_column: None,
        }
    }
}

impl FormattingOptions {
    pub fn with_use_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    pub fn with_tab_size(mut self, tab_size: NonZeroUsize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_wrap_column(mut self, wrap_column: Option<NonZeroUsize>) -> Self {
        self.wrap_column = wrap_column;
        self
    }

    /// Style used to render continuation-line indentation. Without
    /// `use_tabs` this is always spaces, whatever the input contains.
    pub fn indent_style(&self) -> IndentStyle {
        if self.use_tabs {
            IndentStyle::Tabs {
                tab_size: self.tab_size,
            }
        } else {
            IndentStyle::Spaces
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = FormattingOptions::default();
        assert!(!o.use_tabs);
        assert_eq!(o.tab_size.get(), 4);
        assert_eq!(o.wrap_column, None);
        assert_eq!(o.indent_style(), IndentStyle::Spaces);
    }

    #[test]
    fn tabs_style_carries_tab_size() {
        let o = FormattingOptions::default()
            .with_use_tabs(true)
            .with_tab_size(NonZeroUsize::new(3).unwrap());
        assert_eq!(
            o.indent_style(),
            IndentStyle::Tabs {
                tab_size: NonZeroUsize::new(3).unwrap()
            }
        );
    }
}
