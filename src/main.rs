// src/main.rs
//
// reformadoc — normalize `///` documentation comment blocks in a source file
//
// - Continuation lines of each block take the column width of the block's
//   first line (spaces, or tabs-then-spaces with --use-tabs).
// - With a wrap column, block content is re-broken so text after `/// ` stays
//   within it. Tags and their attributes are never split.
// - Only blocks touching the selected range are rewritten.
//
// CLI flags:
//   --use-tabs          : indent continuation lines with tabs, then spaces
//   --tab-size N        : tab width used to measure and render (default 4)
//   --wrap-column N     : enable reflow to N columns after the marker
//   --guide N           : editor guide column (repeatable); the widest one is
//                         the wrap column when --wrap-column is absent
//   --range START..END  : byte range to format (default: whole file)
//   --offset N          : caret position; widened one char each way on its line
//   --check             : exit with status 1 if anything would change, write nothing

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use reformadoc::{apply, format, selection, FormattingOptions, Span};
use thiserror::Error;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Indent continuation lines with tabs followed by spaces
    #[arg(long = "use-tabs", action = ArgAction::SetTrue)]
    use_tabs: bool,

    /// Width of a tab stop
    #[arg(long = "tab-size", default_value = "4")]
    tab_size: NonZeroUsize,

    /// Reflow block content to this many columns after the marker
    #[arg(long = "wrap-column")]
    wrap_column: Option<NonZeroUsize>,

    /// Editor guide column; the largest is used when --wrap-column is absent
    #[arg(long = "guide")]
    guides: Vec<NonZeroUsize>,

    /// Byte range START..END to format
    #[arg(long, conflicts_with = "offset", value_parser = parse_range)]
    range: Option<Span>,

    /// Caret byte offset to format around
    #[arg(long)]
    offset: Option<usize>,

    /// Report whether the file would change instead of writing it
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,

    /// Input file
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("range {span} does not fit a text of {len} bytes")]
    OutOfBounds { span: Span, len: usize },

    #[error("range {span} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}

fn parse_range(s: &str) -> Result<Span, String> {
    let (a, b) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got `{s}`"))?;
    let start: usize = a.trim().parse().map_err(|e| format!("bad start `{a}`: {e}"))?;
    let end: usize = b.trim().parse().map_err(|e| format!("bad end `{b}`: {e}"))?;
    if start > end {
        return Err(format!("start {start} is after end {end}"));
    }
    Ok(Span::new(start, end))
}

impl Cli {
    fn options(&self) -> FormattingOptions {
        // An explicit wrap column wins; otherwise fall back to the guides.
        let wrap_column = self.wrap_column.or_else(|| self.guides.iter().copied().max());
        FormattingOptions::default()
            .with_use_tabs(self.use_tabs)
            .with_tab_size(self.tab_size)
            .with_wrap_column(wrap_column)
    }

    fn span(&self, src: &str) -> Result<Span, CliError> {
        let span = match (self.range, self.offset) {
            (Some(range), _) => range,
            (None, Some(offset)) => Span::at(offset),
            (None, None) => Span::new(0, src.len()),
        };
        if span.end > src.len() {
            return Err(CliError::OutOfBounds {
                span,
                len: src.len(),
            });
        }
        if !src.is_char_boundary(span.start) || !src.is_char_boundary(span.end) {
            return Err(CliError::NotCharBoundary { span });
        }
        Ok(selection::widen(src, span))
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let src = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let options = cli.options();
    let span = cli.span(&src)?;
    log::info!(
        "formatting {} in {span} (use_tabs={}, tab_size={}, wrap_column={:?})",
        cli.input.display(),
        options.use_tabs,
        options.tab_size,
        options.wrap_column
    );

    let edits = format(&src, span, &options);
    if cli.check {
        if edits.is_empty() {
            return Ok(ExitCode::SUCCESS);
        }
        log::warn!("{}: {} edit(s) pending", cli.input.display(), edits.len());
        return Ok(ExitCode::FAILURE);
    }

    let out_path = cli.output.as_ref().unwrap_or(&cli.input);
    if edits.is_empty() && cli.output.is_none() {
        log::info!("{} already formatted", cli.input.display());
        return Ok(ExitCode::SUCCESS);
    }
    let out = apply(&src, &edits);
    fs::write(out_path, out).map_err(|source| CliError::Write {
        path: out_path.clone(),
        source,
    })?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            eprintln!("reformadoc: {e}");
            ExitCode::from(2)
        }
    }
}
