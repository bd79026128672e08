//! Fixed-point directive expansion.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::args::split_args;
use crate::command::run_command;
use crate::directive::Directive;
use crate::range::{LineRange, select, strip_omitted};
use crate::source::SourceLoader;
use crate::DirectiveError;

/// A `[[...]]` span on a single line. Non-greedy, so `[[a]] [[b]]` is two spans.
static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("invalid directive regex"));

/// Default number of passes before a document is considered non-converging.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Fence tag for `.code` sources whose extension is not recognized.
pub const DEFAULT_CODE_LANGUAGE: &str = "go";

/// Expands `.import`, `.run`, `.code` and `.doc` directives in markdown text.
///
/// Expansion repeats until a pass leaves the text unchanged, so content pulled
/// in by one directive may itself contain directives. Unknown directives are
/// left exactly as written.
///
/// # Example
///
/// ```
/// use weave_directives::Expander;
///
/// let expander = Expander::new();
/// let text = "Keep [[.unknown thing]] as is.";
/// assert_eq!(expander.expand(text).unwrap(), text);
/// ```
pub struct Expander {
    loader: SourceLoader,
    import_root: PathBuf,
    code_root: PathBuf,
    code_language: Option<String>,
    max_passes: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    /// Create an expander resolving relative sources against the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: SourceLoader::default(),
            import_root: PathBuf::from("."),
            code_root: PathBuf::from("."),
            code_language: None,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Set the base directory for relative `.import` paths.
    #[must_use]
    pub fn with_import_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.import_root = root.into();
        self
    }

    /// Set the base directory for relative `.code` and `.doc` paths.
    #[must_use]
    pub fn with_code_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.code_root = root.into();
        self
    }

    /// Tag every `.code` fence with `language` instead of inferring it.
    #[must_use]
    pub fn with_code_language(mut self, language: Option<String>) -> Self {
        self.code_language = language;
        self
    }

    /// Bound remote fetches by `timeout`.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.loader = SourceLoader::new(timeout);
        self
    }

    /// Set how many passes a document may take, including the final
    /// pass that confirms nothing changed.
    #[must_use]
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    /// Expand directives until the text stops changing.
    pub fn expand(&self, text: &str) -> Result<String, DirectiveError> {
        let mut current = text.to_owned();

        for pass in 1..=self.max_passes {
            let next = self.expand_once(&current)?;
            if next == current {
                tracing::debug!(passes = pass, "Directive expansion converged");
                return Ok(next);
            }
            current = next;
        }

        Err(DirectiveError::NoFixedPoint {
            passes: self.max_passes,
        })
    }

    /// Run a single pass, resolving every span found in `text`.
    pub fn expand_once(&self, text: &str) -> Result<String, DirectiveError> {
        if !text.contains("[[") {
            return Ok(text.to_owned());
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for captures in DIRECTIVE_PATTERN.captures_iter(text) {
            let (Some(span), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            output.push_str(&text[last..span.start()]);
            match self.resolve(inner.as_str())? {
                Some(replacement) => output.push_str(&replacement),
                None => output.push_str(span.as_str()),
            }
            last = span.end();
        }

        output.push_str(&text[last..]);
        Ok(output)
    }

    /// Resolve the inside of one span. `None` leaves the span untouched.
    fn resolve(&self, raw: &str) -> Result<Option<String>, DirectiveError> {
        let words = match split_args(raw) {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!(directive = raw, error = %e, "Leaving unparsable directive as is");
                return Ok(None);
            }
        };

        if words.is_empty() {
            tracing::warn!("Leaving empty directive as is");
            return Ok(None);
        }

        let Some(directive) = Directive::parse(&words)? else {
            tracing::debug!(directive = raw, "Leaving unrecognized directive as is");
            return Ok(None);
        };

        let replacement = match directive {
            Directive::Import { source } => self.loader.load(&source, &self.import_root)?,
            Directive::Run { program, args } => Self::run(raw, &program, &args)?,
            Directive::Embed {
                fenced,
                source,
                range,
            } => self.embed(&source, &range, fenced)?,
        };

        Ok(Some(replacement))
    }

    fn run(raw: &str, program: &str, args: &[String]) -> Result<String, DirectiveError> {
        let command_line = raw
            .trim_start()
            .strip_prefix(".run")
            .unwrap_or(raw)
            .trim();

        tracing::debug!(command = command_line, "Running command");
        let result = run_command(program, args).map_err(|source| DirectiveError::Spawn {
            command: command_line.to_owned(),
            source,
        })?;

        if !result.status.success() {
            tracing::warn!(
                command = command_line,
                status = %result.status,
                "Command failed, embedding its output"
            );
        }

        Ok(format!(
            "```\n$ {command_line}\n{}\n```",
            result.output.trim_end()
        ))
    }

    fn embed(&self, source: &str, range: &LineRange, fenced: bool) -> Result<String, DirectiveError> {
        let content = self.loader.load(source, &self.code_root)?;
        let lines: Vec<&str> = content.lines().collect();

        let selected = select(&lines, range).map_err(|missing| DirectiveError::MarkerNotFound {
            text: missing.text,
            source_name: source.to_owned(),
        })?;
        let mut kept = strip_omitted(selected);

        if !fenced {
            return Ok(kept.join("\n"));
        }

        let language = self
            .code_language
            .as_deref()
            .or_else(|| infer_language(source))
            .unwrap_or(DEFAULT_CODE_LANGUAGE);
        let open = format!("```{language}");
        kept.insert(0, &open);
        kept.push("```");
        Ok(kept.join("\n"))
    }
}

/// Fence tag for a source, from its file extension.
fn infer_language(source: &str) -> Option<&'static str> {
    let extension = Path::new(source).extension()?.to_str()?;
    let language = match extension.to_ascii_lowercase().as_str() {
        "go" => "go",
        "rs" => "rust",
        "py" => "python",
        "rb" => "ruby",
        "js" | "mjs" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "cpp",
        "sh" | "bash" => "bash",
        "json" => "json",
        "toml" => "toml",
        "yml" | "yaml" => "yaml",
        "md" => "markdown",
        _ => return None,
    };
    Some(language)
}
