use crate::api::types::PairResult;

use super::unified::{parse_unified, split_lines, DiffLineKind};

/// One aligned row of a two-column view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub left: Option<String>,
    pub right: Option<String>,
    /// Both sides present and unequal.
    pub differs: bool,
}

impl RenderLine {
    pub fn new(left: Option<&str>, right: Option<&str>) -> Self {
        let differs = matches!((left, right), (Some(l), Some(r)) if l != r);
        Self {
            left: left.map(str::to_string),
            right: right.map(str::to_string),
            differs,
        }
    }
}

/// A row in the diff-text fallback: either split into columns or printed as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRow {
    Line(RenderLine),
    Verbatim(String),
}

/// How a single pair should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairView {
    /// The server found no differences; nothing to align.
    Identical,
    /// Both contents were available and aligned by position.
    Content(Vec<RenderLine>),
    /// Reconstructed from unified-diff text.
    DiffText {
        header: Vec<String>,
        rows: Vec<RenderRow>,
    },
    /// Not identical, but there is nothing to show.
    Unavailable,
}

/// Decide and build the view for one result.
///
/// Contents win over diff text when both are present. Pure function of `result`.
pub fn render_pair(result: &PairResult) -> PairView {
    if result.identical {
        return PairView::Identical;
    }
    match (
        result.file1_content.as_deref(),
        result.file2_content.as_deref(),
        result.diff.as_deref(),
    ) {
        (Some(left), Some(right), _) => PairView::Content(align_lines(left, right)),
        (_, _, Some(diff)) => render_diff_text(diff),
        _ => PairView::Unavailable,
    }
}

/// Positional alignment: row `i` holds line `i` of each side.
///
/// Does not resynchronise after insertions or deletions.
pub fn align_lines(left: &str, right: &str) -> Vec<RenderLine> {
    let lines1 = split_lines(left);
    let lines2 = split_lines(right);
    let n = lines1.len().max(lines2.len());

    (0..n)
        .map(|i| RenderLine::new(lines1.get(i).copied(), lines2.get(i).copied()))
        .collect()
}

fn render_diff_text(diff: &str) -> PairView {
    let mut header = Vec::new();
    let mut rows = Vec::new();

    for line in parse_unified(diff) {
        let row = match line {
            DiffLineKind::Header(text) => {
                header.push(text.to_string());
                continue;
            }
            DiffLineKind::Addition(text) => RenderRow::Line(RenderLine::new(None, Some(text))),
            DiffLineKind::Deletion(text) => RenderRow::Line(RenderLine::new(Some(text), None)),
            DiffLineKind::Context(text) => RenderRow::Line(RenderLine::new(Some(text), Some(text))),
            DiffLineKind::Unrecognized(text) => RenderRow::Verbatim(text.to_string()),
        };
        rows.push(row);
    }

    PairView::DiffText { header, rows }
}
