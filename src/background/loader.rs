use async_trait::async_trait;
use base64::Engine;
use std::path::Path;

use crate::error::{SyncError, SyncResult};

/// Opaque loaded background, ready for the view (a `data:` URL).
pub type Asset = String;

#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, path: &str) -> SyncResult<Asset>;
}

/// Reads images from disk and inlines them as base64 data URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub fn mime_for_path(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/png",
    }
}

pub fn to_data_url(path: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_for_path(path), encoded)
}

#[async_trait]
impl AssetLoader for FsImageLoader {
    async fn load(&self, path: &str) -> SyncResult<Asset> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| SyncError::AssetUnavailable {
                path: path.to_string(),
                reason: err.to_string(),
            })?;

        if bytes.is_empty() {
            return Err(SyncError::AssetUnavailable {
                path: path.to_string(),
                reason: "file is empty".into(),
            });
        }

        Ok(to_data_url(path, &bytes))
    }
}
