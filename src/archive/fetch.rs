//! HTTP record fetching
//!
//! The fetcher trait keeps the network layer swappable; the default
//! implementation resolves metadata and the record photo over HTTP with a
//! shared blocking agent. Nothing is retried: a failed fetch aborts the
//! current record load.

use crate::archive::metadata;
use crate::error::{Result, ShellacError};
use crate::types::RecordInfo;
use image::RgbaImage;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on a fetched record photo (pixels decode to ~4x this)
const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

/// Record metadata and photo retrieval backend
pub trait RecordFetcher: Send + Sync {
    /// Resolve a normalized identifier to record metadata.
    fn fetch_record(&self, identifier: &str) -> Result<RecordInfo>;

    /// Fetch and decode the record photo.
    fn fetch_image(&self, url: &str) -> Result<RgbaImage>;

    /// Get the name of this fetcher (for logging)
    fn name(&self) -> &'static str;
}

/// Blocking HTTP fetcher over a shared agent.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("shellac/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    fn get(&self, url: &str) -> Result<ureq::Response> {
        debug!(url, "fetching");
        self.agent.get(url).call().map_err(|e| ShellacError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFetcher for HttpFetcher {
    fn fetch_record(&self, identifier: &str) -> Result<RecordInfo> {
        let url = metadata::files_xml_url(identifier);
        let files_xml = self
            .get(&url)?
            .into_string()
            .map_err(|e| ShellacError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let info = metadata::resolve_record(identifier, &files_xml)?;
        info!(identifier, title = %info.title, "record resolved");
        Ok(info)
    }

    fn fetch_image(&self, url: &str) -> Result<RgbaImage> {
        let response = self.get(url)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| ShellacError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let image = image::load_from_memory(&bytes).map_err(|e| ShellacError::InvalidImage {
            reason: format!("could not decode '{url}': {e}"),
        })?;
        Ok(image.to_rgba8())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
