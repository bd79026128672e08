//! Discovery of documents and static assets under the docs directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A markdown source found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Absolute path to the `.md` file.
    pub source_path: PathBuf,
    /// Path relative to the docs directory.
    pub relative: PathBuf,
}

impl DocumentRef {
    /// Output file relative to the site directory.
    ///
    /// `index.md` stays `index.html`; any other `name.md` becomes
    /// `name/index.html` so pages get directory URLs.
    pub fn output_path(&self) -> PathBuf {
        let parent = self.relative.parent().unwrap_or(Path::new(""));
        if self.is_index() {
            parent.join("index.html")
        } else {
            let stem = self.relative.file_stem().unwrap_or_default();
            parent.join(stem).join("index.html")
        }
    }

    /// Site-relative URL with a trailing slash (`""` for the root index).
    pub fn url(&self) -> String {
        let dir = self.output_path();
        let dir = dir.parent().unwrap_or(Path::new(""));
        let mut url = String::new();
        for component in dir.components() {
            if let Component::Normal(part) = component {
                url.push_str(&part.to_string_lossy());
                url.push('/');
            }
        }
        url
    }

    /// Relative prefix leading from this page back to the site root.
    pub fn base_url(&self) -> String {
        let depth = self.url().matches('/').count();
        if depth == 0 {
            "./".to_owned()
        } else {
            "../".repeat(depth)
        }
    }

    /// File stem, used as the title when the page has no H1.
    pub fn fallback_title(&self) -> String {
        let stem = self.relative.file_stem().unwrap_or_default();
        if self.is_index() {
            let parent = self
                .relative
                .parent()
                .and_then(Path::file_name)
                .unwrap_or(stem);
            return parent.to_string_lossy().into_owned();
        }
        stem.to_string_lossy().into_owned()
    }

    fn is_index(&self) -> bool {
        self.relative
            .file_name()
            .is_some_and(|name| name.eq_ignore_ascii_case("index.md"))
    }
}

/// Everything the builder needs from the docs directory.
#[derive(Debug, Default)]
pub(crate) struct SourceTree {
    /// Markdown documents, sorted by relative path.
    pub documents: Vec<DocumentRef>,
    /// Other files (relative paths), copied verbatim.
    pub assets: Vec<PathBuf>,
}

/// Walk `docs_dir`, skipping hidden entries.
pub(crate) fn scan_documents(docs_dir: &Path) -> io::Result<SourceTree> {
    let mut tree = SourceTree::default();
    scan_directory(docs_dir, Path::new(""), &mut tree)?;
    tree.documents.sort_by(|a, b| a.relative.cmp(&b.relative));
    tree.assets.sort();
    Ok(tree)
}

fn scan_directory(dir: &Path, prefix: &Path, tree: &mut SourceTree) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let relative = prefix.join(&name);

        if entry.file_type()?.is_dir() {
            scan_directory(&path, &relative, tree)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            tree.documents.push(DocumentRef {
                source_path: path,
                relative,
            });
        } else {
            tree.assets.push(relative);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(relative: &str) -> DocumentRef {
        DocumentRef {
            source_path: PathBuf::from("/docs").join(relative),
            relative: PathBuf::from(relative),
        }
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(doc("index.md").output_path(), PathBuf::from("index.html"));
        assert_eq!(
            doc("guide.md").output_path(),
            PathBuf::from("guide/index.html")
        );
        assert_eq!(
            doc("api/index.md").output_path(),
            PathBuf::from("api/index.html")
        );
        assert_eq!(
            doc("api/toolchains.md").output_path(),
            PathBuf::from("api/toolchains/index.html")
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(doc("index.md").url(), "");
        assert_eq!(doc("guide.md").url(), "guide/");
        assert_eq!(doc("api/index.md").url(), "api/");
        assert_eq!(doc("api/toolchains.md").url(), "api/toolchains/");
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(doc("index.md").base_url(), "./");
        assert_eq!(doc("guide.md").base_url(), "../");
        assert_eq!(doc("api/toolchains.md").base_url(), "../../");
    }

    #[test]
    fn test_fallback_titles() {
        assert_eq!(doc("getting-started.md").fallback_title(), "getting-started");
        assert_eq!(doc("api/index.md").fallback_title(), "api");
        assert_eq!(doc("index.md").fallback_title(), "index");
    }

    #[test]
    fn test_scan_documents() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("api")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("index.md"), "# Home").unwrap();
        std::fs::write(root.join("api/usage.md"), "# Usage").unwrap();
        std::fs::write(root.join("logo.png"), [0u8; 4]).unwrap();
        std::fs::write(root.join(".hidden.md"), "x").unwrap();
        std::fs::write(root.join(".git/config"), "x").unwrap();

        let tree = scan_documents(root).unwrap();

        let relatives: Vec<_> = tree.documents.iter().map(|d| d.relative.clone()).collect();
        assert_eq!(
            relatives,
            vec![PathBuf::from("api/usage.md"), PathBuf::from("index.md")]
        );
        assert_eq!(tree.assets, vec![PathBuf::from("logo.png")]);
        assert_eq!(tree.documents[1].source_path, root.join("index.md"));
    }

    #[test]
    fn test_scan_missing_directory() {
        assert!(scan_documents(Path::new("/nonexistent/docs")).is_err());
    }
}
