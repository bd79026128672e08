//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use weave_config::{Config, ExtraPage};

use crate::error::BuildError;
use crate::markdown::{MarkdownConverter, RenderResult};
use crate::pipeline::Pipeline;
use crate::scanner::{DocumentRef, scan_documents};
use crate::theme::{DocumentView, NavItem, Theme};

/// Configuration for static site building.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site name exposed to templates.
    pub site_name: String,
    /// Markdown source directory.
    pub docs_dir: PathBuf,
    /// Output directory.
    pub site_dir: PathBuf,
    /// Theme template directory.
    pub theme_dir: PathBuf,
    /// Pages rendered from theme templates after the documents.
    pub pages: Vec<ExtraPage>,
}

impl BuildConfig {
    /// Take the resolved site settings from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_name: config.site_resolved.name.clone(),
            docs_dir: config.site_resolved.docs_dir.clone(),
            site_dir: config.site_resolved.site_dir.clone(),
            theme_dir: config.site_resolved.theme_dir.clone(),
            pages: config.pages.clone(),
        }
    }
}

/// What a build wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Markdown documents rendered.
    pub documents: usize,
    /// Static files copied.
    pub assets: usize,
    /// Extra template pages rendered.
    pub pages: usize,
}

struct RenderedDocument {
    doc: DocumentRef,
    title: String,
    html: String,
}

/// Builds a static documentation site.
///
/// Every document runs through the preprocessing [`Pipeline`] before it is
/// converted, then the converted page is wrapped in the theme layout. Extra
/// pages are rendered last and may overwrite document output (the home page
/// usually replaces `index.html`).
pub struct SiteBuilder {
    config: BuildConfig,
    pipeline: Pipeline,
    converter: MarkdownConverter,
}

impl SiteBuilder {
    /// Create a builder that preprocesses documents with `pipeline`.
    #[must_use]
    pub fn new(config: BuildConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            pipeline,
            converter: MarkdownConverter::new(),
        }
    }

    /// Replace the markdown converter.
    #[must_use]
    pub fn with_converter(mut self, converter: MarkdownConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Preprocess and convert one markdown source.
    pub fn render_markdown(&self, source: &str, path: &Path) -> Result<RenderResult, BuildError> {
        let expanded = self
            .pipeline
            .run(source)
            .map_err(|source| BuildError::Preprocess {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.converter.convert(&expanded))
    }

    /// Build the site into the configured output directory.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let BuildConfig {
            site_name,
            docs_dir,
            site_dir,
            theme_dir,
            pages,
        } = &self.config;

        if !docs_dir.is_dir() {
            return Err(BuildError::DocsDirNotFound(docs_dir.clone()));
        }

        tracing::info!(
            docs_dir = %docs_dir.display(),
            site_dir = %site_dir.display(),
            stages = ?self.pipeline.stage_names().collect::<Vec<_>>(),
            "Building site"
        );

        let theme = Theme::load(theme_dir, site_name).map_err(BuildError::template("theme"))?;
        let tree = scan_documents(docs_dir).map_err(BuildError::io(docs_dir))?;
        fs::create_dir_all(site_dir).map_err(BuildError::io(site_dir))?;

        let rendered = tree
            .documents
            .into_iter()
            .map(|doc| self.render_document(doc))
            .collect::<Result<Vec<_>, _>>()?;

        let nav: Vec<NavItem> = rendered
            .iter()
            .map(|page| NavItem {
                title: page.title.clone(),
                url: page.doc.url(),
                active: false,
            })
            .collect();

        for (index, page) in rendered.iter().enumerate() {
            let mut page_nav = nav.clone();
            page_nav[index].active = true;

            let base_url = page.doc.base_url();
            let html = theme
                .render_document(&DocumentView {
                    title: &page.title,
                    content: &page.html,
                    base_url: &base_url,
                    nav: &page_nav,
                })
                .map_err(BuildError::template(theme.layout()))?;
            write_file(&site_dir.join(page.doc.output_path()), &html)?;
        }

        for asset in &tree.assets {
            let target = site_dir.join(asset);
            create_parent(&target)?;
            fs::copy(docs_dir.join(asset), &target).map_err(BuildError::io(&target))?;
        }

        for page in pages {
            let html = theme
                .render_page(&page.template, &page.page)
                .map_err(BuildError::template(&page.template))?;
            write_file(&site_dir.join(&page.output), &html)?;
            tracing::info!(template = %page.template, output = %page.output, "Rendered page");
        }

        let report = BuildReport {
            documents: rendered.len(),
            assets: tree.assets.len(),
            pages: pages.len(),
        };
        tracing::info!(
            documents = report.documents,
            assets = report.assets,
            pages = report.pages,
            "Site build completed"
        );
        Ok(report)
    }

    fn render_document(&self, doc: DocumentRef) -> Result<RenderedDocument, BuildError> {
        tracing::debug!(path = %doc.source_path.display(), "Rendering document");
        let source = fs::read_to_string(&doc.source_path).map_err(BuildError::io(&doc.source_path))?;
        let result = self.render_markdown(&source, &doc.source_path)?;
        let title = result.title.unwrap_or_else(|| doc.fallback_title());

        Ok(RenderedDocument {
            doc,
            title,
            html: result.html,
        })
    }
}

fn create_parent(path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    create_parent(path)?;
    fs::write(path, contents).map_err(BuildError::io(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Preprocessor, StageError};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use weave_directives::Expander;

    struct Project {
        dir: TempDir,
    }

    impl Project {
        fn new() -> Self {
            let project = Self {
                dir: tempfile::tempdir().unwrap(),
            };
            project.write("theme/home.html", "<h1>{{ site_name }}</h1><p>{{ page }}</p>");
            project.write("theme/community.html", "community:{{ page }}");
            project
        }

        fn write(&self, relative: &str, content: &str) {
            let path = self.dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.dir.path().join(relative)).unwrap()
        }

        fn config(&self) -> BuildConfig {
            let root = self.dir.path();
            BuildConfig {
                site_name: "srclib".to_owned(),
                docs_dir: root.join("docs"),
                site_dir: root.join("site"),
                theme_dir: root.join("theme"),
                pages: vec![
                    ExtraPage {
                        template: "home.html".to_owned(),
                        output: "index.html".to_owned(),
                        page: "home".to_owned(),
                    },
                    ExtraPage {
                        template: "community.html".to_owned(),
                        output: "community.html".to_owned(),
                        page: "community".to_owned(),
                    },
                ],
            }
        }

        fn builder(&self) -> SiteBuilder {
            let expander = Expander::new()
                .with_import_root(self.dir.path().join("docs"))
                .with_code_root(self.dir.path());
            SiteBuilder::new(self.config(), Pipeline::new().with_stage(expander))
        }
    }

    #[test]
    fn test_build_writes_documents_assets_and_pages() {
        let project = Project::new();
        project.write("docs/index.md", "# Welcome\n");
        project.write("docs/guide.md", "# Guide\n\n[[.code src/main.go]]\n");
        project.write("docs/img/logo.svg", "<svg/>");
        project.write("src/main.go", "package main\nfunc main() {} // OMIT\n");

        let report = project.builder().build().unwrap();

        assert_eq!(
            report,
            BuildReport {
                documents: 2,
                assets: 1,
                pages: 2,
            }
        );

        let guide = project.read("site/guide/index.html");
        assert!(guide.contains("<title>Guide - srclib</title>"));
        assert!(guide.contains("<code class=\"language-go\">package main\n</code>"));
        assert!(!guide.contains("func main"));

        assert_eq!(project.read("site/img/logo.svg"), "<svg/>");
        assert_eq!(
            project.read("site/index.html"),
            "<h1>srclib</h1><p>home</p>"
        );
        assert_eq!(project.read("site/community.html"), "community:community");
    }

    #[test]
    fn test_build_uses_theme_layout() {
        let project = Project::new();
        project.write("theme/main.html", "{{ title }}|{{ base_url }}|{{ content }}");
        project.write("docs/notes.md", "plain text\n");

        project.builder().build().unwrap();

        assert_eq!(
            project.read("site/notes/index.html"),
            "notes|..&#x2f;|<p>plain text</p>\n"
        );
    }

    #[test]
    fn test_build_missing_docs_dir() {
        let project = Project::new();
        let err = project.builder().build().unwrap_err();
        assert!(matches!(err, BuildError::DocsDirNotFound(_)));
    }

    #[test]
    fn test_missing_marker_aborts_before_pages() {
        let project = Project::new();
        project.write("docs/guide.md", "[[.code src/main.go setup]]\n");
        project.write("src/main.go", "package main\n");

        let err = project.builder().build().unwrap_err();

        let message = err.to_string();
        assert!(message.contains("guide.md"));
        assert!(message.contains("START setup"));
        assert!(message.contains("src/main.go"));
        assert!(!project.dir.path().join("site/index.html").exists());
    }

    #[test]
    fn test_missing_page_template_fails() {
        let project = Project::new();
        project.write("docs/index.md", "# Home\n");
        let mut config = project.config();
        config.pages.push(ExtraPage {
            template: "about.html".to_owned(),
            output: "about.html".to_owned(),
            page: "about".to_owned(),
        });

        let err = SiteBuilder::new(config, Pipeline::new()).build().unwrap_err();
        assert!(matches!(err, BuildError::Template { ref name, .. } if name == "about.html"));
    }

    #[test]
    fn test_pipeline_runs_before_conversion() {
        struct Shout;

        impl Preprocessor for Shout {
            fn name(&self) -> &str {
                "shout"
            }

            fn process(&self, source: &str) -> Result<String, StageError> {
                Ok(source.replace("quiet", "# LOUD"))
            }
        }

        let project = Project::new();
        let builder = SiteBuilder::new(project.config(), Pipeline::new().with_stage(Shout));
        let result = builder
            .render_markdown("quiet", Path::new("inline.md"))
            .unwrap();

        assert_eq!(result.title.as_deref(), Some("LOUD"));
        assert_eq!(result.html, "<h1>LOUD</h1>\n");
    }
}
