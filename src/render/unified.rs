//! Minimal reading of unified-diff text for the side-by-side fallback.
//!
//! This is not a patch parser. The first [`HEADER_LINES`] lines are taken as
//! the header block whatever they contain, and every later line is
//! classified by its first character alone.

/// Number of leading lines treated as the header block.
pub const HEADER_LINES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLineKind<'a> {
    Header(&'a str),
    Addition(&'a str),
    Deletion(&'a str),
    Context(&'a str),
    /// Hunk markers, "\ No newline" notes, blank lines and anything else.
    Unrecognized(&'a str),
}

/// Classify each line of `diff`. Never fails.
pub fn parse_unified(diff: &str) -> Vec<DiffLineKind<'_>> {
    split_lines(diff)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i < HEADER_LINES {
                DiffLineKind::Header(line)
            } else {
                classify(line)
            }
        })
        .collect()
}

fn classify(line: &str) -> DiffLineKind<'_> {
    if let Some(rest) = line.strip_prefix('+') {
        DiffLineKind::Addition(rest)
    } else if let Some(rest) = line.strip_prefix('-') {
        DiffLineKind::Deletion(rest)
    } else if let Some(rest) = line.strip_prefix(' ') {
        DiffLineKind::Context(rest)
    } else {
        DiffLineKind::Unrecognized(line)
    }
}

/// Split text into lines: `\n` separated, a trailing `\r` dropped, and no
/// empty element for a final newline.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Added/removed line counts outside the header block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

pub fn diff_stats(diff: &str) -> DiffStats {
    parse_unified(diff)
        .iter()
        .fold(DiffStats::default(), |mut stats, line| {
            match line {
                DiffLineKind::Addition(_) => stats.additions += 1,
                DiffLineKind::Deletion(_) => stats.deletions += 1,
                _ => {}
            }
            stats
        })
}
