//! Ordered preprocessing stages applied to markdown before conversion.
//!
//! The builder owns a [`Pipeline`] and runs it on every document, so a stage
//! registered here always sees the raw source before pulldown-cmark does.

use weave_directives::Expander;

/// Error returned by a single stage.
pub type StageError = Box<dyn std::error::Error + Send + Sync>;

/// One markdown-to-markdown transform.
pub trait Preprocessor {
    /// Stage name used in logs and error messages.
    fn name(&self) -> &str;

    /// Transform a document's markdown source.
    fn process(&self, source: &str) -> Result<String, StageError>;
}

impl Preprocessor for Expander {
    fn name(&self) -> &str {
        "directives"
    }

    fn process(&self, source: &str) -> Result<String, StageError> {
        Ok(self.expand(source)?)
    }
}

/// A stage failed; the document cannot be built.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {source}")]
pub struct PipelineError {
    /// Name of the failing stage.
    pub stage: String,
    /// The stage's error.
    #[source]
    pub source: StageError,
}

/// Stages run in registration order, each on the previous stage's output.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Preprocessor>>,
}

impl Pipeline {
    /// Create an empty pipeline. Documents pass through unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn with_stage<P: Preprocessor + 'static>(mut self, stage: P) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the registered stages, in order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name())
    }

    /// Run every stage over `source`.
    pub fn run(&self, source: &str) -> Result<String, PipelineError> {
        let mut text = source.to_owned();
        for stage in &self.stages {
            text = stage.process(&text).map_err(|source| PipelineError {
                stage: stage.name().to_owned(),
                source,
            })?;
        }
        Ok(text)
    }
}
