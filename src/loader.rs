//! Content loading with fallback to the bundled default.
//!
//! A [`ContentState`] starts out holding the default document with its loading
//! flag set. One call to [`ContentState::load`] asks a [`ContentSource`] for a
//! partial document, merges it over the default, publishes the result, and
//! clears the flag. Every failure (transport, non-2xx status, unparseable
//! body, unreadable file) is logged and leaves the default in place:
//!
//! ```text
//! new()        loading = true,  document = default
//!   │
//! load(src) ── Ok(partial) ──→ loading = false, document = merge(default, partial)
//!   │
//!   └──────── Err(e) ────────→ loading = false, document = default, fallback = e
//! ```
//!
//! There is exactly one fetch per state: no retries, no refresh. A settled
//! state ignores further `load` calls.

use crate::content::{ContentDocument, PartialContentDocument, default_content, merge};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed content document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the effective document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Bundled default, either because no source was asked or because it failed.
    Default,
    Remote { url: String },
    File { path: PathBuf },
}

impl fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentOrigin::Default => write!(f, "default"),
            ContentOrigin::Remote { url } => write!(f, "remote ({url})"),
            ContentOrigin::File { path } => write!(f, "file ({})", path.display()),
        }
    }
}

/// Something that can produce a partial content document.
pub trait ContentSource {
    /// Where a successful fetch would have come from.
    fn origin(&self) -> ContentOrigin;

    fn fetch(&self) -> Result<PartialContentDocument, LoadError>;
}

/// `GET <url>` with no auth, query, or body. Success is any 2xx with a JSON object body.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl ContentSource for HttpSource {
    fn origin(&self) -> ContentOrigin {
        ContentOrigin::Remote {
            url: self.url.clone(),
        }
    }

    fn fetch(&self) -> Result<PartialContentDocument, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        let body = response.text()?;
        Ok(PartialContentDocument::from_json(&body)?)
    }
}

/// A local JSON file in the same shape the endpoint serves.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for FileSource {
    fn origin(&self) -> ContentOrigin {
        ContentOrigin::File {
            path: self.path.clone(),
        }
    }

    fn fetch(&self) -> Result<PartialContentDocument, LoadError> {
        let body = std::fs::read_to_string(&self.path)?;
        Ok(PartialContentDocument::from_json(&body)?)
    }
}

/// The document the page renders from, plus the loading flag.
#[derive(Debug)]
pub struct ContentState {
    document: Arc<ContentDocument>,
    loading: bool,
    origin: ContentOrigin,
    fallback: Option<LoadError>,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentState {
    /// Default document, loading flag set.
    pub fn new() -> Self {
        Self {
            document: Arc::new(default_content().clone()),
            loading: true,
            origin: ContentOrigin::Default,
            fallback: None,
        }
    }

    /// Current effective document. Valid at every point of the lifecycle.
    pub fn document(&self) -> Arc<ContentDocument> {
        Arc::clone(&self.document)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn origin(&self) -> &ContentOrigin {
        &self.origin
    }

    /// The error that forced the default, if the source failed.
    pub fn fallback(&self) -> Option<&LoadError> {
        self.fallback.as_ref()
    }

    /// Fetch once from `source` and settle. Never fails.
    pub fn load(&mut self, source: &dyn ContentSource) {
        if !self.loading {
            log::debug!("Content already settled, skipping fetch from {}", source.origin());
            return;
        }
        match source.fetch() {
            Ok(partial) => {
                self.document = Arc::new(merge(default_content(), partial));
                self.origin = source.origin();
                log::info!("Loaded content from {}", self.origin);
            }
            Err(e) => {
                log::warn!(
                    "Error loading content from {}: {e}; using default content",
                    source.origin()
                );
                self.fallback = Some(e);
            }
        }
        self.loading = false;
    }

    /// Settle on the default without asking any source.
    pub fn settle_offline(&mut self) {
        if self.loading {
            log::debug!("Offline: using default content");
            self.loading = false;
        }
    }
}
