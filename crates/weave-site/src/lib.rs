//! Static site building for weave.
//!
//! This crate provides:
//! - [`SiteBuilder`]: scans the docs directory, preprocesses and converts
//!   every markdown document, wraps it in the theme layout, copies assets
//!   and renders the extra template pages
//! - [`Pipeline`]: ordered [`Preprocessor`] stages run on raw markdown
//! - [`Theme`]: minijinja templates loaded from the theme directory
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use weave_directives::Expander;
//! use weave_site::{BuildConfig, Pipeline, SiteBuilder};
//!
//! let config = BuildConfig {
//!     site_name: "Documentation".to_owned(),
//!     docs_dir: PathBuf::from("docs"),
//!     site_dir: PathBuf::from("site"),
//!     theme_dir: PathBuf::from("theme"),
//!     pages: weave_config::default_pages(),
//! };
//! let pipeline = Pipeline::new().with_stage(Expander::new());
//!
//! let report = SiteBuilder::new(config, pipeline).build()?;
//! println!("{} documents", report.documents);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod markdown;
mod pipeline;
mod scanner;
mod theme;

pub use builder::{BuildConfig, BuildReport, SiteBuilder};
pub use error::BuildError;
pub use markdown::{MarkdownConverter, RenderResult};
pub use pipeline::{Pipeline, PipelineError, Preprocessor, StageError};
pub use theme::{DocumentView, NavItem, Theme};
