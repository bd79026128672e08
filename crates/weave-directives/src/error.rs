//! Directive expansion errors.

use std::path::PathBuf;

/// Fatal error raised while expanding directives.
///
/// Any of these aborts the document and with it the whole build.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// A recognized directive was written without its required argument.
    #[error("{directive} requires {expected}")]
    MissingArgument {
        /// Directive name, e.g. `.import`.
        directive: &'static str,
        /// What was expected, e.g. `a source path or URL`.
        expected: &'static str,
    },

    /// Remote content could not be fetched.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Transport or HTTP status error.
        message: String,
    },

    /// A local source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The resolved file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A boundary marker or line text is missing from the embedded source.
    #[error("could not find {text:?} in {source_name}")]
    MarkerNotFound {
        /// The text that was searched for.
        text: String,
        /// The source argument as written in the directive.
        source_name: String,
    },

    /// The command of a `.run` directive could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// The command line as written in the directive.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Expansion kept changing the document.
    #[error("directives still changing the document after {passes} passes")]
    NoFixedPoint {
        /// Number of passes performed.
        passes: usize,
    },
}
