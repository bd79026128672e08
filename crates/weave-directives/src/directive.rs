//! Recognized directive kinds.

use crate::DirectiveError;
use crate::range::LineRange;

/// A parsed `[[...]]` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `.import <source>`: splice in the raw content of a file or URL.
    Import {
        /// Path or URL.
        source: String,
    },
    /// `.run <program> [args...]`: embed a command and its output.
    Run {
        /// Program to execute.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
    },
    /// `.code` / `.doc <source> [region | start end]`: embed a slice of a file.
    Embed {
        /// Wrap the slice in a fenced code block (`.code`) or not (`.doc`).
        fenced: bool,
        /// Path or URL.
        source: String,
        /// Lines to keep.
        range: LineRange,
    },
}

impl Directive {
    /// Build a directive from its words.
    ///
    /// Returns `Ok(None)` when the first word is not a known directive name,
    /// so the caller can leave the span untouched.
    pub fn parse(words: &[String]) -> Result<Option<Self>, DirectiveError> {
        let Some((name, rest)) = words.split_first() else {
            return Ok(None);
        };

        let directive = match name.as_str() {
            ".import" => Self::Import {
                source: first(rest, ".import", "a source path or URL")?,
            },
            ".run" => Self::Run {
                program: first(rest, ".run", "a command")?,
                args: rest[1..].to_vec(),
            },
            ".code" | ".doc" => {
                let source = first(rest, name_of(name), "a source path or URL")?;
                let range_args = &rest[1..];
                if range_args.len() > 2 {
                    tracing::warn!(
                        directive = %name,
                        source = %source,
                        extra = range_args.len(),
                        "Too many range arguments, embedding the whole file"
                    );
                }
                Self::Embed {
                    fenced: name == ".code",
                    source,
                    range: LineRange::from_args(range_args),
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(directive))
    }
}

fn name_of(name: &str) -> &'static str {
    if name == ".code" { ".code" } else { ".doc" }
}

fn first(
    rest: &[String],
    directive: &'static str,
    expected: &'static str,
) -> Result<String, DirectiveError> {
    rest.first()
        .cloned()
        .ok_or(DirectiveError::MissingArgument {
            directive,
            expected,
        })
}
