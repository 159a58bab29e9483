//! Resource slots: the entries of a user-edited, ordered image collection.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Extension used when neither the URL nor the MIME type names one.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Content type used when a fetched resource does not report one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "svg"];

/// Locator of a resource already persisted on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteUrl(String);

impl RemoteUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Image extension taken from the last path segment, if recognised.
    pub fn extension(&self) -> Option<&'static str> {
        let path = match url::Url::parse(&self.0) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => self.0.split(['?', '#']).next().unwrap_or_default().to_string(),
        };
        let segment = path.rsplit('/').next()?;
        let (_, ext) = segment.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        KNOWN_EXTENSIONS.iter().copied().find(|known| *known == ext)
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteUrl {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RemoteUrl {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Uploadable bytes held locally.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl LocalBlob {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are elided so logs stay readable.
impl fmt::Debug for LocalBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBlob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One displayed entry of an ordered collection.
///
/// The kind of a slot is fixed at creation. Removing an image deletes its
/// slot; it never turns an `Existing` slot into a `Pending` one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSlot {
    /// Already persisted, addressed by its remote locator.
    Existing(RemoteUrl),
    /// Newly added, held as local bytes until uploaded.
    Pending(LocalBlob),
}

impl ResourceSlot {
    pub fn existing(url: impl Into<RemoteUrl>) -> Self {
        Self::Existing(url.into())
    }

    pub fn pending(blob: LocalBlob) -> Self {
        Self::Pending(blob)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn remote_url(&self) -> Option<&RemoteUrl> {
        match self {
            Self::Existing(url) => Some(url),
            Self::Pending(_) => None,
        }
    }
}

/// Ordered existing locators as last confirmed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalSnapshot(Vec<RemoteUrl>);

impl OriginalSnapshot {
    pub fn new(urls: Vec<RemoteUrl>) -> Self {
        Self(urls)
    }

    pub fn as_slice(&self) -> &[RemoteUrl] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slots mirroring the snapshot, used to open an edit session.
    pub fn to_slots(&self) -> Vec<ResourceSlot> {
        self.0.iter().cloned().map(ResourceSlot::Existing).collect()
    }
}

impl FromIterator<RemoteUrl> for OriginalSnapshot {
    fn from_iter<T: IntoIterator<Item = RemoteUrl>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Image extension for a MIME type such as `image/png`.
pub fn extension_from_mime(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/bmp" => Some("bmp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// Extension for a re-fetched resource: URL suffix, then MIME type, then
/// [`DEFAULT_IMAGE_EXTENSION`].
pub fn infer_extension(url: &RemoteUrl, content_type: Option<&str>) -> &'static str {
    url.extension()
        .or_else(|| content_type.and_then(extension_from_mime))
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}
