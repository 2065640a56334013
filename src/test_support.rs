use crate::{
    services::cloudinary_service::{ImageHost, UploadedImage},
    utils::error::AppError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Image host that hands out predictable URLs and counts uploads.
#[derive(Default)]
pub struct StubImageHost {
    uploads: AtomicUsize,
    fail: bool,
}

impl StubImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// URL returned by the `n`th upload (1-based).
    pub fn url_for(&self, n: usize) -> String {
        format!("https://res.cloudinary.com/demo/image/upload/photo-{}.jpg", n)
    }
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(&self, _source: &str, public_id: Option<&str>) -> Result<UploadedImage, AppError> {
        if self.fail {
            return Err(AppError::ImageUpload("Cloudinary is unreachable".into()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(UploadedImage {
            secure_url: self.url_for(n),
            public_id: public_id.map(str::to_string).unwrap_or_else(|| format!("photo-{}", n)),
        })
    }
}
