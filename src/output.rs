use std::io::{self, Write};

use serde::Deserialize;

use crate::api::types::{BatchResponse, PairError, PairResult};
use crate::render::unified::split_lines;
use crate::render::{diff_stats, render_pair, PairView, RenderLine, RenderRow};

pub const DEFAULT_COLUMN_WIDTH: usize = 50;
pub const MAX_COLUMN_WIDTH: usize = 1000;

const TAB: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// The batch response as pretty JSON
    #[serde(alias = "json")]
    #[value(alias = "json")]
    Structured,
    /// Per-pair summary, no alignment
    #[serde(alias = "text")]
    #[value(alias = "text")]
    Plain,
    /// Two aligned columns per pair
    #[default]
    SideBySide,
}

/// Writes a reconciled batch in the selected mode.
pub struct Formatter {
    mode: OutputMode,
    column_width: usize,
}

impl Formatter {
    pub fn new(mode: OutputMode, column_width: usize) -> Self {
        Self {
            mode,
            column_width: clamp_width(column_width),
        }
    }

    pub fn write<W: Write>(&self, out: &mut W, batch: &BatchResponse) -> io::Result<()> {
        match self.mode {
            OutputMode::Structured => {
                serde_json::to_writer_pretty(&mut *out, batch)?;
                writeln!(out)
            }
            OutputMode::Plain | OutputMode::SideBySide => self.write_text(out, batch),
        }
    }

    fn rule(&self) -> String {
        "-".repeat(self.column_width * 2 + 3)
    }

    fn write_text<W: Write>(&self, out: &mut W, batch: &BatchResponse) -> io::Result<()> {
        let rule = self.rule();

        writeln!(out, "=== DIFF RESULTS ===")?;
        writeln!(out)?;
        for result in &batch.results {
            writeln!(out, "Pair {}: {} vs {}", result.index, result.file1, result.file2)?;
            match self.mode {
                OutputMode::Plain => write_summary(out, result)?,
                _ => self.write_side_by_side(out, result)?,
            }
            writeln!(out, "{rule}")?;
        }

        if !batch.errors.is_empty() {
            writeln!(out)?;
            writeln!(out, "=== ERRORS ===")?;
            writeln!(out)?;
            for PairError { index, error, .. } in &batch.errors {
                writeln!(out, "Pair {index}: {error}")?;
                writeln!(out, "{rule}")?;
            }
        }
        Ok(())
    }

    fn write_side_by_side<W: Write>(&self, out: &mut W, result: &PairResult) -> io::Result<()> {
        match render_pair(result) {
            PairView::Identical => writeln!(out, "Identical"),
            PairView::Unavailable => writeln!(out, "(no content available)"),
            PairView::Content(lines) => {
                let w = self.column_width;
                let titles = format!(
                    "{:^w$} | {:^w$}",
                    cell(&result.file1, w),
                    cell(&result.file2, w)
                );
                writeln!(out, "{}", titles.trim_end())?;
                writeln!(out, "{}", self.rule())?;
                for line in &lines {
                    writeln!(out, "{}", self.row(line))?;
                }
                Ok(())
            }
            PairView::DiffText { header, rows } => {
                writeln!(out, "Note: using unified diff text for side-by-side view")?;
                for line in &header {
                    writeln!(out, "{line}")?;
                }
                for row in &rows {
                    match row {
                        RenderRow::Line(line) => writeln!(out, "{}", self.row(line))?,
                        RenderRow::Verbatim(text) => writeln!(out, "{text}")?,
                    }
                }
                Ok(())
            }
        }
    }

    fn row(&self, line: &RenderLine) -> String {
        let w = self.column_width;
        let left = line.left.as_deref().map(|s| cell(s, w)).unwrap_or_default();
        let right = line.right.as_deref().map(|s| cell(s, w)).unwrap_or_default();
        let row = format!("{left:<w$} {} {right}", gutter(line));
        row.trim_end().to_string()
    }
}

/// Keep widths in `1..=MAX_COLUMN_WIDTH`.
pub fn clamp_width(width: usize) -> usize {
    width.clamp(1, MAX_COLUMN_WIDTH)
}

/// `|` same, `*` changed, `<` left only, `>` right only.
fn gutter(line: &RenderLine) -> char {
    match (&line.left, &line.right) {
        _ if line.differs => '*',
        (Some(_), None) => '<',
        (None, Some(_)) => '>',
        _ => '|',
    }
}

/// Display form of one side: tabs expanded, cut to `width` chars.
fn cell(text: &str, width: usize) -> String {
    text.replace('\t', TAB).chars().take(width).collect()
}

fn write_summary<W: Write>(out: &mut W, result: &PairResult) -> io::Result<()> {
    writeln!(out, "Identical: {}", result.identical)?;
    if result.identical {
        return Ok(());
    }
    if let Some(diff) = result.diff.as_deref() {
        let stats = diff_stats(diff);
        writeln!(out, "Changes: +{} -{}", stats.additions, stats.deletions)
    } else if let (Some(left), Some(right)) = (&result.file1_content, &result.file2_content) {
        writeln!(
            out,
            "Lines: {} vs {}",
            split_lines(left).len(),
            split_lines(right).len()
        )
    } else {
        writeln!(out, "Changes: no content available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize, file1: &str, file2: &str, identical: bool) -> PairResult {
        PairResult {
            index,
            file1: file1.to_string(),
            file2: file2.to_string(),
            identical,
            diff: None,
            file1_content: None,
            file2_content: None,
            extra: Default::default(),
        }
    }

    fn render(mode: OutputMode, width: usize, batch: &BatchResponse) -> String {
        let mut buf = Vec::new();
        Formatter::new(mode, width).write(&mut buf, batch).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_identical_pair_prints_only_marker() {
        let batch = BatchResponse {
            results: vec![result(0, "a.txt", "a.txt", true)],
            errors: vec![],
            ..Default::default()
        };
        let text = render(OutputMode::SideBySide, 5, &batch);
        assert_eq!(
            text,
            "=== DIFF RESULTS ===\n\nPair 0: a.txt vs a.txt\nIdentical\n-------------\n"
        );
    }

    #[test]
    fn test_huge_width_is_capped() {
        let mut r = result(0, "l", "r", false);
        r.file1_content = Some("x".repeat(MAX_COLUMN_WIDTH + 10));
        r.file2_content = Some("y".to_string());
        let batch = BatchResponse {
            results: vec![result(1, "a.txt", "a.txt", true), r],
            ..Default::default()
        };
        let text = render(OutputMode::SideBySide, usize::MAX, &batch);
        let rule = "-".repeat(MAX_COLUMN_WIDTH * 2 + 3);
        assert!(text.contains(&format!("Identical\n{rule}\n")));

        let row = text.lines().find(|l| l.starts_with('x')).unwrap();
        assert_eq!(row, format!("{} * y", "x".repeat(MAX_COLUMN_WIDTH)));
    }

    #[test]
    fn test_zero_width_becomes_one() {
        assert_eq!(clamp_width(0), 1);
        assert_eq!(clamp_width(72), 72);
        assert_eq!(clamp_width(usize::MAX), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_error_only_batch() {
        let batch = BatchResponse {
            results: vec![],
            errors: vec![PairError {
                index: 0,
                error: "y.txt not found".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render(OutputMode::SideBySide, 5, &batch);
        assert_eq!(
            text,
            "=== DIFF RESULTS ===\n\n\n=== ERRORS ===\n\nPair 0: y.txt not found\n-------------\n"
        );
    }

    #[test]
    fn test_side_by_side_rows_are_truncated_and_marked() {
        let mut r = result(1, "l", "r", false);
        r.file1_content = Some("abcdefgh\nsame\ngone\n".to_string());
        r.file2_content = Some("abcdefgX\nsame\n".to_string());
        let text = render(
            OutputMode::SideBySide,
            5,
            &BatchResponse {
                results: vec![r],
                errors: vec![],
                ..Default::default()
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "Pair 1: l vs r");
        assert_eq!(lines[4], "-------------");
        assert_eq!(lines[5], "abcde * abcde");
        assert_eq!(lines[6], "same  | same");
        assert_eq!(lines[7], "gone  <");
        assert_eq!(lines[8], "-------------");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_truncation_does_not_touch_data() {
        let mut r = result(0, "l", "r", false);
        r.file1_content = Some("a very long line indeed".to_string());
        r.file2_content = Some("short".to_string());
        let batch = BatchResponse {
            results: vec![r.clone()],
            errors: vec![],
            ..Default::default()
        };
        render(OutputMode::SideBySide, 4, &batch);
        assert_eq!(batch.results[0], r);
    }

    #[test]
    fn test_fallback_rows() {
        let mut r = result(0, "l", "r", false);
        r.diff = Some("h1\nh2\nh3\nh4\n@@ -1 +1 @@\n+added\n-removed\n \tctx".to_string());
        let text = render(
            OutputMode::SideBySide,
            8,
            &BatchResponse {
                results: vec![r],
                errors: vec![],
                ..Default::default()
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            &lines[3..12],
            &[
                "Note: using unified diff text for side-by-side view",
                "h1",
                "h2",
                "h3",
                "h4",
                "@@ -1 +1 @@",
                "         > added",
                "removed  <",
                "    ctx  |     ctx",
            ]
        );
    }

    #[test]
    fn test_unavailable_marker() {
        let text = render(
            OutputMode::SideBySide,
            10,
            &BatchResponse {
                results: vec![result(0, "x", "y", false)],
                errors: vec![],
                ..Default::default()
            },
        );
        assert!(text.contains("Pair 0: x vs y\n(no content available)\n"));
    }

    #[test]
    fn test_plain_summaries() {
        let mut with_diff = result(1, "a", "b", false);
        with_diff.diff = Some("1\n2\n3\n4\n+x\n+y\n-z".to_string());
        let mut with_content = result(2, "c", "d", false);
        with_content.file1_content = Some("1\n2\n3\n".to_string());
        with_content.file2_content = Some("1\n".to_string());
        let batch = BatchResponse {
            results: vec![
                result(0, "s", "s", true),
                with_diff,
                with_content,
                result(3, "e", "f", false),
            ],
            errors: vec![],
            ..Default::default()
        };
        let text = render(OutputMode::Plain, 5, &batch);
        assert!(text.contains("Pair 0: s vs s\nIdentical: true\n---"));
        assert!(text.contains("Pair 1: a vs b\nIdentical: false\nChanges: +2 -1\n"));
        assert!(text.contains("Pair 2: c vs d\nIdentical: false\nLines: 3 vs 1\n"));
        assert!(text.contains("Pair 3: e vs f\nIdentical: false\nChanges: no content available\n"));
        assert!(!text.contains(" | "));
    }

    #[test]
    fn test_structured_is_the_batch_as_json() {
        let mut r = result(0, "a", "b", false);
        r.file1_content = Some("x".to_string());
        let batch = BatchResponse {
            results: vec![r],
            errors: vec![PairError {
                index: 1,
                error: "nope".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render(OutputMode::Structured, 50, &batch);
        let back: BatchResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, batch);
        assert!(text.contains("\"file1Content\": \"x\""));
    }

    #[test]
    fn test_mode_names_and_aliases() {
        use clap::ValueEnum;
        assert_eq!(
            OutputMode::from_str("side-by-side", false).unwrap(),
            OutputMode::SideBySide
        );
        assert_eq!(OutputMode::from_str("json", false).unwrap(), OutputMode::Structured);
        assert_eq!(OutputMode::from_str("text", false).unwrap(), OutputMode::Plain);

        #[derive(Deserialize)]
        struct Wrapper {
            output: OutputMode,
        }
        let w: Wrapper = toml::from_str("output = \"json\"").unwrap();
        assert_eq!(w.output, OutputMode::Structured);
        let w: Wrapper = toml::from_str("output = \"side-by-side\"").unwrap();
        assert_eq!(w.output, OutputMode::SideBySide);
    }
}
