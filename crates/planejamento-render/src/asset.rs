//! Logo asset with text fallback

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Lines drawn in place of the logo when it cannot be loaded
pub const LOGO_PLACEHOLDER: [&str; 3] = ["CIDADE DE", "SÃO PAULO", "EDUCAÇÃO"];

/// Header logo state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoAsset {
    /// Decoded image bytes with their MIME type
    Loaded { mime: &'static str, bytes: Vec<u8> },
    /// The image is unavailable; the text placeholder is drawn
    Failed,
}

impl LogoAsset {
    /// Load the logo from disk, degrading to [`LogoAsset::Failed`]
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "logo not loaded, using placeholder");
                LogoAsset::Failed
            }
        }
    }

    /// Load from an optional path; `None` means the placeholder
    pub fn load_optional(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path),
            None => LogoAsset::Failed,
        }
    }

    /// Wrap raw image bytes, sniffing PNG or JPEG
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match sniff_mime(&bytes) {
            Some(mime) => {
                tracing::debug!(mime, size = bytes.len(), "logo loaded");
                LogoAsset::Loaded { mime, bytes }
            }
            None => {
                tracing::warn!("logo is neither PNG nor JPEG, using placeholder");
                LogoAsset::Failed
            }
        }
    }

    /// Whether the image itself will be drawn
    pub fn is_loaded(&self) -> bool {
        matches!(self, LogoAsset::Loaded { .. })
    }

    /// `data:` URL for embedding into SVG
    pub fn data_url(&self) -> Option<String> {
        match self {
            LogoAsset::Loaded { mime, bytes } => {
                Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
            }
            LogoAsset::Failed => None,
        }
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_fails() {
        let logo = LogoAsset::load(Path::new("/nonexistent/logo.png"));
        assert_eq!(logo, LogoAsset::Failed);
        assert!(logo.data_url().is_none());
    }

    #[test]
    fn test_png_bytes() {
        let logo = LogoAsset::from_bytes(b"\x89PNG\r\n\x1a\nrest".to_vec());
        assert!(logo.is_loaded());
        assert!(logo.data_url().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_jpeg_bytes() {
        let logo = LogoAsset::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert!(matches!(logo, LogoAsset::Loaded { mime: "image/jpeg", .. }));
    }

    #[test]
    fn test_unknown_bytes_fail() {
        assert_eq!(LogoAsset::from_bytes(b"GIF89a".to_vec()), LogoAsset::Failed);
        assert_eq!(LogoAsset::load_optional(None), LogoAsset::Failed);
    }
}
