//! Image references and how each kind is resolved to bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{MementoError, Result};

/// Extension used when a reference does not reveal one.
pub const DEFAULT_EXTENSION: &str = "jpg";

const MAX_EXTENSION_LEN: usize = 5;

/// Where an image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Path on the journal's own server, e.g. `/static/originals/a.jpg`.
    SameOrigin(String),
    /// Bytes embedded in a `data:` URI.
    Inline(InlineImage),
    /// Absolute `http(s)` URL on another host.
    External(Url),
    /// `blob:` handle for an image the user has not saved yet. Owned by the
    /// editing session; never resolvable here.
    LocalPreview,
    /// Anything else.
    Unsupported,
}

impl ImageSource {
    /// Classify a reference. Malformed `data:` URIs are reported as errors.
    pub fn classify(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.starts_with("//") {
            return Url::parse(&format!("https:{}", reference))
                .map(ImageSource::External)
                .or(Ok(ImageSource::Unsupported));
        }
        if reference.starts_with('/') {
            return Ok(ImageSource::SameOrigin(reference.to_string()));
        }

        let scheme = reference
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        match scheme.as_str() {
            "data" => InlineImage::parse(reference).map(ImageSource::Inline),
            "blob" => Ok(ImageSource::LocalPreview),
            "http" | "https" => Ok(Url::parse(reference)
                .map(ImageSource::External)
                .unwrap_or(ImageSource::Unsupported)),
            _ => Ok(ImageSource::Unsupported),
        }
    }
}

/// Decoded `data:` URI payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl InlineImage {
    /// Decode `data:[<media type>][;params][;base64],<payload>`.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Fetch` if the URI has no payload separator or
    /// the base64 payload does not decode.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .get(5..)
            .filter(|_| uri[..5].eq_ignore_ascii_case("data:"))
            .ok_or_else(|| MementoError::Fetch("not a data URI".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| MementoError::Fetch("data URI has no payload".to_string()))?;

        let mut params = header.split(';');
        let media_type = params
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("application/octet-stream")
            .to_ascii_lowercase();
        let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        let bytes = if is_base64 {
            let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| MementoError::Fetch(format!("invalid base64 image data: {}", e)))?
        } else {
            percent_decode_str(payload).collect()
        };

        Ok(Self { media_type, bytes })
    }

    pub fn extension(&self) -> &'static str {
        extension_for_media_type(&self.media_type)
    }
}

/// References longer than this are cut when logged or written into a
/// document; inline payloads run to megabytes.
pub const SHORT_REFERENCE_CHARS: usize = 60;

/// The first [`SHORT_REFERENCE_CHARS`] characters of a reference.
pub fn short_reference(reference: &str) -> &str {
    reference
        .char_indices()
        .nth(SHORT_REFERENCE_CHARS)
        .map(|(index, _)| &reference[..index])
        .unwrap_or(reference)
}

/// Extension from the last path segment of a reference, ignoring any query
/// or fragment. Falls back to [`DEFAULT_EXTENSION`].
pub fn extension_from_reference(reference: &str) -> String {
    let path = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

fn extension_for_media_type(media_type: &str) -> &'static str {
    match media_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        "image/heic" => "heic",
        _ => DEFAULT_EXTENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reference() {
        let long = format!("data:image/png;base64,{}", "A".repeat(500));
        assert_eq!(short_reference(&long).len(), SHORT_REFERENCE_CHARS);
        assert_eq!(short_reference("/a.jpg"), "/a.jpg");
        assert_eq!(short_reference(&"é".repeat(70)).chars().count(), SHORT_REFERENCE_CHARS);
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(
            ImageSource::classify("/static/originals/a.jpg").unwrap(),
            ImageSource::SameOrigin("/static/originals/a.jpg".to_string())
        );
        assert!(matches!(
            ImageSource::classify("https://cdn.example.com/x.png").unwrap(),
            ImageSource::External(_)
        ));
        assert!(matches!(
            ImageSource::classify("//cdn.example.com/x.png").unwrap(),
            ImageSource::External(url) if url.scheme() == "https"
        ));
        assert_eq!(
            ImageSource::classify("blob:http://localhost/1234").unwrap(),
            ImageSource::LocalPreview
        );
        assert_eq!(
            ImageSource::classify("relative/a.jpg").unwrap(),
            ImageSource::Unsupported
        );
        assert!(matches!(
            ImageSource::classify("data:image/png;base64,iVBORw0K").unwrap(),
            ImageSource::Inline(_)
        ));
    }

    #[test]
    fn test_inline_base64() {
        let image = InlineImage::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_inline_percent_encoded() {
        let image = InlineImage::parse("data:image/svg+xml,%3Csvg%3E%3C%2Fsvg%3E").unwrap();
        assert_eq!(image.bytes, b"<svg></svg>");
        assert_eq!(image.extension(), "svg");
    }

    #[test]
    fn test_inline_malformed() {
        assert!(InlineImage::parse("data:image/png;base64").is_err());
        assert!(InlineImage::parse("data:image/png;base64,@@@").is_err());
        assert!(ImageSource::classify("data:nothing").is_err());
    }

    #[test]
    fn test_extension_from_reference() {
        assert_eq!(extension_from_reference("/static/originals/a.PNG"), "png");
        assert_eq!(extension_from_reference("https://x.io/p/photo.webp?w=200#top"), "webp");
        assert_eq!(extension_from_reference("https://x.io/p/photo"), "jpg");
        assert_eq!(extension_from_reference("https://x.io/v1.2/photo"), "jpg");
        assert_eq!(extension_from_reference("/a/b.verylongext"), "jpg");
    }
}
