//! Line selection for `.code` and `.doc` embeds.

/// One end of an explicit line range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// A literal 1-based line number.
    Line(usize),
    /// The first line containing this text (case-insensitive).
    Text(String),
}

impl Bound {
    /// Interpret a directive argument: all-digit arguments are line numbers,
    /// anything else is text to search for.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
            // Too large for usize still means "past the end"; slicing clamps it.
            return Self::Line(arg.parse().unwrap_or(usize::MAX));
        }
        Self::Text(arg.to_owned())
    }

    fn resolve(&self, lines: &[&str]) -> Result<usize, MissingLine> {
        match self {
            Self::Line(line) => Ok(*line),
            Self::Text(text) => find(lines, text).map(|idx| idx + 1),
        }
    }
}

/// Which lines of a source file to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRange {
    /// Every line.
    Whole,
    /// Lines strictly between `START <name>` and `END <name>`.
    Region(String),
    /// Inclusive 1-based `[start, end]`.
    Bounds(Bound, Bound),
}

impl LineRange {
    /// Build a range from the arguments following the source.
    ///
    /// More than two arguments select the whole file.
    #[must_use]
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [region] => Self::Region(region.clone()),
            [start, end] => Self::Bounds(Bound::parse(start), Bound::parse(end)),
            _ => Self::Whole,
        }
    }
}

/// A boundary line that could not be located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not find {text:?}")]
pub struct MissingLine {
    /// The text that was searched for.
    pub text: String,
}

/// Index of the first line containing `text`, ignoring case.
#[must_use]
pub fn line_containing(lines: &[&str], text: &str) -> Option<usize> {
    let needle = text.to_lowercase();
    lines
        .iter()
        .position(|line| line.to_lowercase().contains(&needle))
}

fn find(lines: &[&str], text: &str) -> Result<usize, MissingLine> {
    line_containing(lines, text).ok_or_else(|| MissingLine {
        text: text.to_owned(),
    })
}

/// Slice `lines` according to `range`.
///
/// Explicit bounds are clamped to the file; a range that ends before it
/// starts selects nothing.
pub fn select<'a, 'b>(lines: &'a [&'b str], range: &LineRange) -> Result<&'a [&'b str], MissingLine> {
    match range {
        LineRange::Whole => Ok(lines),
        LineRange::Region(name) => {
            let start = find(lines, &format!("START {name}"))? + 1;
            let end = find(lines, &format!("END {name}"))?;
            Ok(slice(lines, start, end))
        }
        LineRange::Bounds(start, end) => {
            let start = start.resolve(lines)?;
            let end = end.resolve(lines)?;
            Ok(slice(lines, start.saturating_sub(1), end))
        }
    }
}

fn slice<'a, 'b>(lines: &'a [&'b str], start: usize, end: usize) -> &'a [&'b str] {
    let end = end.min(lines.len());
    if start >= end {
        return &[];
    }
    &lines[start..end]
}

/// Whether a line carries the trailing `omit` marker.
///
/// Trailing `*` and `/` are ignored so `/* OMIT */` works in C-style comments.
#[must_use]
pub fn is_omitted(line: &str) -> bool {
    let content = line.trim().trim_end_matches(['*', '/']).trim_end();
    let len = content.len();
    len >= 4
        && content.is_char_boundary(len - 4)
        && content[len - 4..].eq_ignore_ascii_case("omit")
}

/// Drop every omitted line.
#[must_use]
pub fn strip_omitted<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines.iter().copied().filter(|line| !is_omitted(line)).collect()
}
