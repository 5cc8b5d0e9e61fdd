use std::sync::Arc;

use base64::prelude::*;
use dioxus::html::FileEngine;
use portal::capability::ImageSource;
use portal::CapabilityError;

/// A file picked in a chat form, read lazily into a `data:` URL.
pub struct FileAttachment {
    engine: Arc<dyn FileEngine>,
    name: String,
}

impl FileAttachment {
    /// The first file the engine holds, if any.
    pub fn first(engine: Arc<dyn FileEngine>) -> Option<Self> {
        let name = engine.files().into_iter().next()?;
        Some(Self { engine, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

impl ImageSource for FileAttachment {
    async fn read_data_url(self) -> Result<String, CapabilityError> {
        let bytes = self
            .engine
            .read_file(&self.name)
            .await
            .ok_or_else(|| CapabilityError::Failed(format!("could not read {}", self.name)))?;
        Ok(data_url(mime_for(&self.name), &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for("badge.PNG"), "image/png");
        assert_eq!(mime_for("wallet.photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("notes"), "application/octet-stream");
    }

    #[test]
    fn test_data_url_encoding() {
        assert_eq!(data_url("image/gif", b"GIF89a"), "data:image/gif;base64,R0lGODlh");
    }
}
