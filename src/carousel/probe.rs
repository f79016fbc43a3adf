use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::Url;

use super::ratio::Dimensions;

/// Syntactic URL check used for image URLs and redirection links.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Confirms an image URL is loadable and reads its natural size.
///
/// `add` awaits [`ImageProbe::load`] before touching the list, so an
/// implementation may go to the network.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn verify_image_load(&self, url: &str) -> bool;

    async fn dimensions(&self, url: &str) -> Result<Dimensions>;

    /// Verify then measure. Probes that can do both with one fetch override this.
    async fn load(&self, url: &str) -> Result<Dimensions> {
        if !self.verify_image_load(url).await {
            anyhow::bail!("Image failed to load. Please check the URL.");
        }
        self.dimensions(url).await
    }
}

/// Probe for `file://` URLs, decoding only the image header.
///
/// Header reads run on the blocking pool, so a Tokio runtime must be current.
#[derive(Debug, Clone, Default)]
pub struct FileImageProbe;

impl FileImageProbe {
    pub fn new() -> Self {
        Self
    }

    fn resolve(url: &str) -> Result<PathBuf> {
        let parsed = Url::parse(url).context("Failed to parse image URL")?;
        if parsed.scheme() != "file" {
            anyhow::bail!("Unsupported scheme {:?} for local image probe", parsed.scheme());
        }
        parsed
            .to_file_path()
            .map_err(|_| anyhow::anyhow!("URL does not name a local file: {url}"))
    }

    async fn read_header(url: &str) -> Result<Dimensions> {
        let path = Self::resolve(url)?;
        tokio::task::spawn_blocking(move || get_image_dimensions(&path))
            .await
            .context("Image header read was cancelled")?
    }
}

#[async_trait]
impl ImageProbe for FileImageProbe {
    async fn verify_image_load(&self, url: &str) -> bool {
        match Self::read_header(url).await {
            Ok(dims) => !dims.is_empty(),
            Err(err) => {
                tracing::debug!(url, error = %err, "image probe failed");
                false
            }
        }
    }

    async fn dimensions(&self, url: &str) -> Result<Dimensions> {
        Self::read_header(url).await
    }

    async fn load(&self, url: &str) -> Result<Dimensions> {
        Self::read_header(url)
            .await
            .context("Image failed to load. Please check the URL.")
    }
}

pub fn get_image_dimensions<P: AsRef<Path>>(image_path: P) -> Result<Dimensions> {
    let dims = image::image_dimensions(image_path.as_ref()).context("Failed to open image")?;
    Ok(dims.into())
}
