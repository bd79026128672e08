//! Theme templates rendered with minijinja.
//!
//! Templates are loaded by name from the theme directory. Document pages use
//! the theme's `main.html` when present and a built-in layout otherwise.
//! `site_name` is available to every template as a global.

use std::path::Path;

use minijinja::{Environment, Value, context};
use serde::Serialize;

/// Layout template a theme may provide for document pages.
const THEME_LAYOUT: &str = "main.html";

/// Name of the built-in fallback layout.
const BUILTIN_LAYOUT: &str = "weave/layout.html";

const BUILTIN_LAYOUT_SOURCE: &str = include_str!("templates/layout.html");

/// Navigation entry passed to layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Page title.
    pub title: String,
    /// Site-relative URL.
    pub url: String,
    /// Whether this entry is the page being rendered.
    pub active: bool,
}

/// Data for wrapping one converted document in the layout.
pub struct DocumentView<'a> {
    /// Page title.
    pub title: &'a str,
    /// Converted HTML body, inserted unescaped.
    pub content: &'a str,
    /// Relative prefix back to the site root.
    pub base_url: &'a str,
    /// Site navigation.
    pub nav: &'a [NavItem],
}

/// Loaded theme.
pub struct Theme {
    env: Environment<'static>,
    layout: &'static str,
}

impl Theme {
    /// Load templates from `theme_dir`.
    ///
    /// A missing directory is not an error here; page templates that are
    /// requested later will fail to resolve instead.
    pub fn load(theme_dir: &Path, site_name: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(theme_dir.to_path_buf()));
        env.add_template(BUILTIN_LAYOUT, BUILTIN_LAYOUT_SOURCE)?;
        env.add_global("site_name", site_name.to_owned());

        let layout = if theme_dir.join(THEME_LAYOUT).is_file() {
            THEME_LAYOUT
        } else {
            BUILTIN_LAYOUT
        };
        tracing::debug!(theme_dir = %theme_dir.display(), layout, "Loaded theme");

        Ok(Self { env, layout })
    }

    /// Name of the template used for document pages.
    #[must_use]
    pub fn layout(&self) -> &str {
        self.layout
    }

    /// Wrap a converted document in the layout.
    pub fn render_document(&self, view: &DocumentView<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(self.layout)?.render(context! {
            page => "document",
            title => view.title,
            content => Value::from_safe_string(view.content.to_owned()),
            base_url => view.base_url,
            nav => view.nav,
        })
    }

    /// Render a standalone template with `page` set to `page`.
    pub fn render_page(&self, template: &str, page: &str) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context! { page => page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nav() -> Vec<NavItem> {
        vec![
            NavItem {
                title: "Home".to_owned(),
                url: String::new(),
                active: false,
            },
            NavItem {
                title: "Guide".to_owned(),
                url: "guide/".to_owned(),
                active: true,
            },
        ]
    }

    #[test]
    fn test_builtin_layout_when_theme_has_none() {
        let dir = tempfile::tempdir().unwrap();
        let theme = Theme::load(dir.path(), "srclib").unwrap();
        assert_eq!(theme.layout(), BUILTIN_LAYOUT);

        let nav = nav();
        let html = theme
            .render_document(&DocumentView {
                title: "Guide",
                content: "<p>Body & more</p>",
                base_url: "../",
                nav: &nav,
            })
            .unwrap();

        assert!(html.contains("<title>Guide - srclib</title>"));
        assert!(html.contains("<p>Body & more</p>"));
        assert!(html.contains(r#"<li class="active"><a href="#));
        assert!(html.contains(">Guide</a></li>"));
        assert!(html.contains(">Home</a></li>"));
    }

    #[test]
    fn test_theme_main_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("main.html"),
            "[{{ page }}|{{ site_name }}|{{ title }}]{{ content }}",
        )
        .unwrap();
        let theme = Theme::load(dir.path(), "Docs").unwrap();
        assert_eq!(theme.layout(), THEME_LAYOUT);

        let html = theme
            .render_document(&DocumentView {
                title: "A <b>",
                content: "<em>x</em>",
                base_url: "./",
                nav: &[],
            })
            .unwrap();
        assert_eq!(html, "[document|Docs|A &lt;b&gt;]<em>x</em>");
    }

    #[test]
    fn test_render_page_sets_page_variable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("home.html"),
            "{% if page == 'home' %}home of {{ site_name }}{% endif %}",
        )
        .unwrap();
        let theme = Theme::load(dir.path(), "srclib").unwrap();

        assert_eq!(theme.render_page("home.html", "home").unwrap(), "home of srclib");
    }

    #[test]
    fn test_render_page_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let theme = Theme::load(dir.path(), "srclib").unwrap();
        let err = theme.render_page("community.html", "community").unwrap_err();
        assert_eq!(err.kind(), minijinja::ErrorKind::TemplateNotFound);
    }
}
