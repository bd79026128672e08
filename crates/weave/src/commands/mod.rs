//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod expand;

pub(crate) use build::BuildArgs;
pub(crate) use expand::ExpandArgs;

use weave_config::DirectivesConfig;
use weave_directives::Expander;

/// Directive expander configured from `[directives]`.
pub(crate) fn expander_from_config(config: &DirectivesConfig) -> Expander {
    Expander::new()
        .with_import_root(config.import_root.clone())
        .with_code_root(config.code_root.clone())
        .with_code_language(config.code_language.clone())
        .with_fetch_timeout(config.fetch_timeout)
        .with_max_passes(config.max_passes)
}
