//! Expansion of `[[...]]` directives embedded in markdown sources.
//!
//! A directive is a single-line span whose contents are split like shell
//! words; the first word selects what happens:
//!
//! - `[[.import <path-or-url>]]`: splice in the raw content
//! - `[[.run <cmd> [args...]]]`: run a command, embed it and its output in a fence
//! - `[[.code <path-or-url> [region | start end]]]`: embed a slice of a file in a fence
//! - `[[.doc <path-or-url> [region | start end]]]`: the same slice without the fence
//!
//! Anything else is left untouched. Expansion repeats until the text stops
//! changing, so imported content can contain further directives.
//!
//! Embedded slices drop every line ending in `omit` (case-insensitive,
//! ignoring a trailing `*/`), and a single range argument names a region
//! bounded by lines containing `START <name>` and `END <name>`.
//!
//! # Example
//!
//! ```no_run
//! use weave_directives::Expander;
//!
//! let expander = Expander::new().with_code_root("..");
//! let _markdown = expander.expand("[[.code cmd/main.go setup]]")?;
//! # Ok::<(), weave_directives::DirectiveError>(())
//! ```

mod args;
mod command;
mod directive;
mod error;
mod expander;
pub mod range;
mod source;

pub use args::{SplitError, split_args};
pub use command::{CommandOutput, run_command};
pub use directive::Directive;
pub use error::DirectiveError;
pub use expander::{DEFAULT_CODE_LANGUAGE, DEFAULT_MAX_PASSES, Expander};
pub use source::{SourceLoader, is_url};
