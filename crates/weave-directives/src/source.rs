//! Loading directive sources from URLs or the local filesystem.

use std::path::Path;
use std::time::Duration;

use ureq::Agent;

use crate::DirectiveError;

/// Whether a directive source names a remote document.
#[must_use]
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Create an HTTP agent. `None` disables the global timeout.
fn create_agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .timeout_global(timeout)
        .http_status_as_error(false)
        .build()
        .into()
}

/// Reads `.import`, `.code` and `.doc` sources.
///
/// URLs are fetched over HTTP; anything else is a path, resolved against the
/// root passed to [`load`](Self::load) when relative.
pub struct SourceLoader {
    agent: Agent,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SourceLoader {
    /// Create a loader whose fetches give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            agent: create_agent(timeout),
        }
    }

    /// Load the full text of `source`.
    pub fn load(&self, source: &str, root: &Path) -> Result<String, DirectiveError> {
        if is_url(source) {
            return self.fetch(source);
        }

        let path = root.join(source);
        tracing::debug!(path = %path.display(), "Reading directive source");
        std::fs::read_to_string(&path).map_err(|source| DirectiveError::Read { path, source })
    }

    fn fetch(&self, url: &str) -> Result<String, DirectiveError> {
        tracing::debug!(url, "Fetching directive source");
        let fetch_error = |message: String| DirectiveError::Fetch {
            url: url.to_owned(),
            message,
        };

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| fetch_error(e.to_string()))
    }
}
