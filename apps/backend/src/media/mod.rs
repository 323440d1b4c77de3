//! Image hosting collaborator.
//!
//! Photos live on a third-party CDN; the database only keeps the public URL
//! and the host's identifier. Handlers talk to the host through
//! [`ImageHost`] so tests and local development can swap in
//! [`MemoryImageHost`].

pub mod cloudinary;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use cloudinary::CloudinaryClient;
pub use memory::MemoryImageHost;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Where a stored image can be fetched from, and how to delete it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image host request failed: {0}")]
    Request(String),
    #[error("image host rejected request with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("image host returned an unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MediaError {
    fn from(e: reqwest::Error) -> Self {
        MediaError::Request(e.to_string())
    }
}

impl From<MediaError> for DomainError {
    fn from(e: MediaError) -> Self {
        DomainError::infra(InfraErrorKind::ImageHost, e.to_string())
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Store `image` under `folder`.
    async fn upload(
        &self,
        image: Bytes,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, MediaError>;

    /// Remove a previously uploaded image. Deleting an id the host no longer
    /// knows is not an error.
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Folder photos of one institute are uploaded into.
pub fn institute_folder(institute_id: i32) -> String {
    format!("institutes/{institute_id}/photos")
}
