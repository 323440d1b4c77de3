//! In-process image host used when no CDN is configured and in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use super::{ImageHost, MediaError, UploadedImage};

#[derive(Debug, Default)]
pub struct MemoryImageHost {
    images: Mutex<HashMap<String, Bytes>>,
    next_id: AtomicU64,
    fail_uploads: AtomicBool,
}

impl MemoryImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail until switched back.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.images.lock().await.contains_key(public_id)
    }

    pub async fn len(&self) -> usize {
        self.images.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ImageHost for MemoryImageHost {
    async fn upload(
        &self,
        image: Bytes,
        _content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, MediaError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(MediaError::Rejected {
                status: 503,
                detail: "uploads disabled".to_string(),
            });
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let public_id = format!("{folder}/img{n}");
        let url = format!("memory://{public_id}");
        self.images.lock().await.insert(public_id.clone(), image);
        Ok(UploadedImage { url, public_id })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.images.lock().await.remove(public_id);
        Ok(())
    }
}
