//! Site build errors.

use std::path::PathBuf;

use crate::pipeline::PipelineError;

/// Error returned by [`SiteBuilder::build`](crate::SiteBuilder::build).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The markdown source directory does not exist.
    #[error("docs directory not found: {}", .0.display())]
    DocsDirNotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A preprocessing stage rejected a document.
    #[error("failed to preprocess {}: {source}", path.display())]
    Preprocess {
        /// The markdown source.
        path: PathBuf,
        /// The failing stage and its error.
        source: PipelineError,
    },

    /// A template failed to load or render.
    #[error("template {name}: {source}")]
    Template {
        /// Template name.
        name: String,
        /// minijinja error.
        source: minijinja::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn template(name: impl Into<String>) -> impl FnOnce(minijinja::Error) -> Self {
        let name = name.into();
        move |source| Self::Template { name, source }
    }
}
