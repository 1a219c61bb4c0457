//! Async poster loading
//!
//! Decoding and resizing are CPU-bound, so the work runs on tokio's
//! blocking pool and the UI only ever receives a finished handle.

use iced::widget::image::Handle;
use tokio::task;

use super::{resolve, PosterCache, PosterError, Tier};

/// Load one tier of a poster into an image handle.
///
/// Errors are logged and swallowed: `None` means "keep the placeholder".
/// Without a cache the source file is handed to iced as-is.
pub async fn load_poster(
    reference: String,
    tier: Tier,
    cache: Option<PosterCache>,
) -> Option<Handle> {
    let result = task::spawn_blocking({
        let reference = reference.clone();
        move || load_poster_blocking(&reference, tier, cache.as_ref())
    })
    .await
    .map_err(|e| PosterError::Join(e.to_string()))
    .and_then(|inner| inner);

    match result {
        Ok(handle) => Some(handle),
        Err(PosterError::Remote(reference)) => {
            tracing::debug!(%reference, "skipping remote poster");
            None
        }
        Err(e) => {
            tracing::warn!(%reference, tier = tier.dir_name(), "⚠️  poster unavailable: {}", e);
            None
        }
    }
}

/// Blocking implementation of poster loading
fn load_poster_blocking(
    reference: &str,
    tier: Tier,
    cache: Option<&PosterCache>,
) -> Result<Handle, PosterError> {
    let source = resolve(reference)?;

    match cache {
        Some(cache) => {
            let cached = cache.ensure_tier(&source, reference, tier)?;
            Ok(Handle::from_path(cached))
        }
        None if source.exists() => Ok(Handle::from_path(source)),
        None => Err(PosterError::MissingSource(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[tokio::test]
    async fn test_missing_poster_yields_none() {
        let handle = load_poster("/nonexistent/poster.jpg".to_string(), Tier::Thumb, None).await;
        assert!(handle.is_none());
    }

    #[tokio::test]
    async fn test_remote_poster_yields_none() {
        let handle = load_poster(
            "https://image.tmdb.org/t/p/w500/a.jpg".to_string(),
            Tier::Full,
            None,
        )
        .await;
        assert!(handle.is_none());
    }

    #[tokio::test]
    async fn test_local_poster_is_cached_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("poster.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(400, 600, Rgb([10, 20, 30]));
        img.save(&source).unwrap();

        let cache = PosterCache::new(dir.path().join("cache"));
        let reference = source.to_string_lossy().to_string();

        let handle = load_poster(reference.clone(), Tier::Thumb, Some(cache.clone())).await;

        assert!(handle.is_some());
        assert!(cache.tier_path(&reference, Tier::Thumb).exists());
    }
}
