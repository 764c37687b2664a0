//! The page being captured, as given on the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use sieve_core::{
    capture::{CapturedTab, TabSource},
    Result, SieveError,
};

/// URL and title from flags, screenshot read from an image file.
pub struct PageSource {
    pub url: String,
    pub title: String,
    pub screenshot: Option<PathBuf>,
}

impl TabSource for PageSource {
    fn capture_active_tab(&self) -> Result<CapturedTab> {
        let screenshot = match &self.screenshot {
            Some(path) => {
                let bytes = fs::read(path).map_err(|e| SieveError::FileSystem {
                    path: path.clone(),
                    source: e,
                })?;
                debug!("Read {} byte screenshot from {}", bytes.len(), path.display());
                Some(data_url(mime_type(path), &bytes))
            }
            None => None,
        };

        Ok(CapturedTab {
            url: self.url.clone(),
            title: self.title.clone(),
            screenshot,
        })
    }
}

fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_screenshot_becomes_data_url() {
        let mut file = tempfile::Builder::new()
            .suffix(".JPG")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(b"hello").expect("write");

        let source = PageSource {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            screenshot: Some(file.path().to_path_buf()),
        };
        let tab = source.capture_active_tab().expect("capture");

        assert_eq!(tab.screenshot.as_deref(), Some("data:image/jpeg;base64,aGVsbG8="));
        assert_eq!(tab.title, "Example");
    }

    #[test]
    fn test_missing_screenshot_file() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let path = file.path().to_path_buf();
        drop(file);

        let source = PageSource {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            screenshot: Some(path),
        };
        assert!(matches!(
            source.capture_active_tab(),
            Err(SieveError::FileSystem { .. })
        ));
    }

    #[test]
    fn test_no_screenshot() {
        let source = PageSource {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            screenshot: None,
        };
        assert_eq!(source.capture_active_tab().expect("capture").screenshot, None);
    }
}
