//! On-demand cache revalidation webhook
//!
//! The CMS calls the webhook when entries are published, unpublished or
//! deleted. A request carrying the shared secret invalidates everything cached
//! under the [`ARTICLES_TAG`] tag. This module holds the request handling only;
//! it is independent of any HTTP server.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Cache tag attached to every article fetch
pub const ARTICLES_TAG: &str = "articles";

/// Header carrying the shared secret on POST requests
pub const SECRET_HEADER: &str = "x-revalidate-secret";

/// Header naming the CMS webhook that fired
pub const WEBHOOK_NAME_HEADER: &str = "x-contentful-webhook-name";

/// Query parameter carrying the shared secret on GET requests
pub const SECRET_QUERY_PARAM: &str = "secret";

/// Errors raised while invalidating cached data
#[derive(Error, Debug)]
pub enum CacheError {
    /// A stamp file or its directory could not be written
    #[error("Failed to write cache stamp {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    /// In-memory state was poisoned by a panicking writer
    #[error("Cache state is unavailable")]
    Poisoned,
}

/// Something that can mark cached data as stale by tag
pub trait CacheInvalidator {
    /// Mark every cached entry associated with `tag` as stale
    fn invalidate_tag(&self, tag: &str) -> Result<(), CacheError>;
}

/// In-memory tag generations; a bump means "stale"
#[derive(Debug, Default)]
pub struct MemoryTagCache {
    generations: Mutex<HashMap<String, u64>>,
}

impl MemoryTagCache {
    /// Create a cache with no invalidations recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `tag` has been invalidated
    pub fn generation(&self, tag: &str) -> u64 {
        self.generations
            .lock()
            .map(|g| g.get(tag).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl CacheInvalidator for MemoryTagCache {
    fn invalidate_tag(&self, tag: &str) -> Result<(), CacheError> {
        let mut generations = self.generations.lock().map_err(|_| CacheError::Poisoned)?;
        *generations.entry(tag.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

/// Tag invalidation persisted as one timestamp file per tag
///
/// A build compares a tag's stamp with the time it last fetched data.
#[derive(Debug, Clone)]
pub struct StampFileCache {
    dir: PathBuf,
    now_ms: fn() -> u64,
}

impl StampFileCache {
    /// Store stamps under `dir`, created on first invalidation
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            now_ms: unix_millis,
        }
    }

    /// Path of the stamp file for `tag`
    pub fn stamp_path(&self, tag: &str) -> PathBuf {
        self.dir.join(format!("{}.stamp", tag))
    }

    /// Time of the last invalidation of `tag`, in Unix milliseconds
    pub fn last_invalidated(&self, tag: &str) -> Option<u64> {
        fs::read_to_string(self.stamp_path(tag))
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }

    /// The directory holding the stamps
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CacheInvalidator for StampFileCache {
    fn invalidate_tag(&self, tag: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io(self.dir.clone(), e))?;
        let path = self.stamp_path(tag);
        fs::write(&path, (self.now_ms)().to_string()).map_err(|e| CacheError::Io(path, e))?;
        log::debug!("Wrote cache stamp for tag '{}'", tag);
        Ok(())
    }
}

/// Current time in Unix milliseconds
pub fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// HTTP method of a webhook request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Manual trigger
    Get,
    /// CMS webhook delivery
    Post,
    /// Anything else; rejected with 405
    #[default]
    Other,
}

impl Method {
    /// Parse an HTTP method name
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// The parts of an incoming HTTP request the webhook looks at
#[derive(Debug, Clone, Default)]
pub struct RevalidateRequest {
    /// Request method
    pub method: Method,
    /// Header names are matched case-insensitively
    pub headers: Vec<(String, String)>,
    /// Decoded query parameters
    pub query: Vec<(String, String)>,
    /// Raw request body, if any
    pub body: Option<String>,
}

impl RevalidateRequest {
    /// A POST request as sent by the CMS webhook
    pub fn post(secret: Option<&str>, body: Option<&str>) -> Self {
        Self {
            method: Method::Post,
            headers: secret
                .map(|s| vec![(SECRET_HEADER.to_string(), s.to_string())])
                .unwrap_or_default(),
            query: Vec::new(),
            body: body.map(str::to_string),
        }
    }

    /// A GET request for manual triggering
    pub fn get(secret: Option<&str>) -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            query: secret
                .map(|s| vec![(SECRET_QUERY_PARAM.to_string(), s.to_string())])
                .unwrap_or_default(),
            body: None,
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// First value of a header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// JSON body returned by the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidateBody {
    /// Whether the cache was invalidated
    pub revalidated: bool,
    /// Unix milliseconds at which revalidation happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now: Option<u64>,
    /// Human-readable outcome
    pub message: String,
    /// Name of the webhook that triggered revalidation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

impl RevalidateBody {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            revalidated: false,
            now: None,
            message: message.into(),
            webhook: None,
        }
    }
}

/// Status code and JSON body of a webhook response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevalidateResponse {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: RevalidateBody,
}

impl RevalidateResponse {
    fn new(status: u16, body: RevalidateBody) -> Self {
        Self { status, body }
    }

    /// Serialized JSON body
    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Handle a webhook request
///
/// # Parameters
/// * `request` - The incoming request
/// * `configured_secret` - The server-side secret; `None` or empty means unconfigured
/// * `cache` - Where the `articles` tag is invalidated
/// * `now_ms` - Current time in Unix milliseconds, echoed on success
///
/// # Returns
/// * `RevalidateResponse` - 200 on success, 401 on a wrong secret, 405 for
///   other methods, 500 when unconfigured or invalidation fails
pub fn handle(
    request: &RevalidateRequest,
    configured_secret: Option<&str>,
    cache: &dyn CacheInvalidator,
    now_ms: u64,
) -> RevalidateResponse {
    let (provided, manual) = match request.method {
        Method::Post => (request.header(SECRET_HEADER), false),
        Method::Get => (request.query_param(SECRET_QUERY_PARAM), true),
        Method::Other => {
            return RevalidateResponse::new(405, RevalidateBody::failure("Method not allowed"));
        }
    };

    let Some(expected) = configured_secret.filter(|s| !s.is_empty()) else {
        log::error!("Revalidation secret is not configured");
        return RevalidateResponse::new(
            500,
            RevalidateBody::failure("Server configuration error"),
        );
    };

    if !provided.is_some_and(|p| constant_time_eq(p.as_bytes(), expected.as_bytes())) {
        log::warn!("Invalid revalidation secret received");
        return RevalidateResponse::new(401, RevalidateBody::failure("Invalid secret"));
    }

    let webhook = if manual {
        None
    } else {
        let name = request.header(WEBHOOK_NAME_HEADER).unwrap_or("unknown");
        let (content_type, entry_id) = describe_event(request.body.as_deref());
        log::info!(
            "[Revalidate] Webhook: {}, ContentType: {}, EntryID: {}",
            name,
            content_type,
            entry_id
        );
        Some(name.to_string())
    };

    if let Err(e) = cache.invalidate_tag(ARTICLES_TAG) {
        log::error!("[Revalidate] Error: {}", e);
        return RevalidateResponse::new(500, RevalidateBody::failure(e.to_string()));
    }

    let message = if manual {
        "Cache revalidated successfully (manual trigger)"
    } else {
        "Cache revalidated successfully"
    };

    RevalidateResponse::new(
        200,
        RevalidateBody {
            revalidated: true,
            now: Some(now_ms),
            message: message.to_string(),
            webhook,
        },
    )
}

/// Content type and entry id from a CMS event body, "unknown" when absent
fn describe_event(body: Option<&str>) -> (String, String) {
    let value: Option<Value> = body.and_then(|b| serde_json::from_str(b).ok());
    let field = |pointer: &str| {
        value
            .as_ref()
            .and_then(|v| v.pointer(pointer))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };
    (field("/sys/contentType/sys/id"), field("/sys/id"))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
