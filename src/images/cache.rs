//! On-disk cache of resized poster tiers
//!
//! Each tier lives in its own directory under the cache root:
//! - thumb/ (256px wide, list rows)
//! - full/  (1280px wide, detail screen)

use image::imageops::FilterType;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PosterError, Tier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterCache {
    root: PathBuf,
}

impl PosterCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default cache root
    /// Returns ~/.cache/poster-list on Linux
    pub fn default_root() -> Option<PathBuf> {
        dirs_next::cache_dir()
            .or_else(dirs_next::home_dir)
            .map(|path| path.join("poster-list"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the given tier of a reference is (or would be) cached.
    /// Named by the BLAKE3 hash of the reference so names survive upgrades.
    pub fn tier_path(&self, reference: &str, tier: Tier) -> PathBuf {
        let hash = blake3::hash(reference.as_bytes());
        self.root
            .join(tier.dir_name())
            .join(format!("{}.png", hash.to_hex()))
    }

    /// Return the cached tier for `reference`, generating it from `source`
    /// on a miss
    pub fn ensure_tier(
        &self,
        source: &Path,
        reference: &str,
        tier: Tier,
    ) -> Result<PathBuf, PosterError> {
        let cached = self.tier_path(reference, tier);
        if cached.exists() {
            return Ok(cached);
        }

        if !source.exists() {
            return Err(PosterError::MissingSource(source.to_path_buf()));
        }

        // Decode once, resize, save
        let img = image::open(source).map_err(|source_err| PosterError::Image {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        generate_tier(&img, tier, &cached)?;

        tracing::debug!(
            tier = tier.dir_name(),
            width = img.width(),
            path = %cached.display(),
            "generated poster tier"
        );
        Ok(cached)
    }
}

/// Resize (width-constrained, never upscaled) and save a single tier.
///
/// The tier is written next to its final name and renamed into place, so
/// an interrupted save never leaves a truncated file at `path`.
fn generate_tier(img: &image::DynamicImage, tier: Tier, path: &Path) -> Result<(), PosterError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PosterError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let target_width = tier.width();
    let resized = if img.width() > target_width {
        img.resize(target_width, target_width * 10, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    let partial = partial_path(path);
    resized
        .save_with_format(&partial, ImageFormat::Png)
        .map_err(|source| PosterError::Image {
            path: partial.clone(),
            source,
        })?;

    fs::rename(&partial, path).map_err(|source| PosterError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn write_poster(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_tier_paths_differ_per_tier_and_reference() {
        let cache = PosterCache::new("/tmp/cache");
        let a_thumb = cache.tier_path("/a.jpg", Tier::Thumb);
        let a_full = cache.tier_path("/a.jpg", Tier::Full);
        let b_thumb = cache.tier_path("/b.jpg", Tier::Thumb);

        assert_ne!(a_thumb, a_full);
        assert_ne!(a_thumb, b_thumb);
        assert!(a_thumb.starts_with("/tmp/cache/thumb"));
        assert_eq!(a_thumb, cache.tier_path("/a.jpg", Tier::Thumb));
    }

    #[test]
    fn test_tier_names_are_stable_hashes() {
        let cache = PosterCache::new("/tmp/cache");
        assert_eq!(
            cache.tier_path("", Tier::Full),
            Path::new("/tmp/cache/full")
                .join("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262.png")
        );
    }

    #[test]
    fn test_generated_tier_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_poster(dir.path(), "poster.png", 300, 450);
        let cache = PosterCache::new(dir.path().join("cache"));

        let cached = cache
            .ensure_tier(&source, &source.to_string_lossy(), Tier::Thumb)
            .unwrap();

        let names: Vec<PathBuf> = fs::read_dir(cached.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(names, vec![cached.clone()]);
        assert!(!partial_path(&cached).exists());
    }

    #[test]
    fn test_leftover_partial_file_is_not_served() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_poster(dir.path(), "poster.png", 300, 450);
        let reference = source.to_string_lossy().to_string();
        let cache = PosterCache::new(dir.path().join("cache"));

        // An earlier save that died halfway
        let target = cache.tier_path(&reference, Tier::Thumb);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(partial_path(&target), b"\x89PNG trunc").unwrap();

        let cached = cache.ensure_tier(&source, &reference, Tier::Thumb).unwrap();

        assert_eq!(image::open(&cached).unwrap().width(), 256);
    }

    #[test]
    fn test_ensure_tier_downscales_wide_posters() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_poster(dir.path(), "wide.png", 600, 900);
        let cache = PosterCache::new(dir.path().join("cache"));

        let cached = cache
            .ensure_tier(&source, &source.to_string_lossy(), Tier::Thumb)
            .unwrap();

        let thumb = image::open(&cached).unwrap();
        assert_eq!(thumb.width(), 256);
        assert_eq!(thumb.height(), 384);
    }

    #[test]
    fn test_ensure_tier_never_upscales() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_poster(dir.path(), "small.png", 100, 150);
        let cache = PosterCache::new(dir.path().join("cache"));

        let cached = cache
            .ensure_tier(&source, &source.to_string_lossy(), Tier::Full)
            .unwrap();

        assert_eq!(image::open(&cached).unwrap().width(), 100);
    }

    #[test]
    fn test_ensure_tier_hits_existing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_poster(dir.path(), "poster.png", 300, 450);
        let reference = source.to_string_lossy().to_string();
        let cache = PosterCache::new(dir.path().join("cache"));

        let first = cache.ensure_tier(&source, &reference, Tier::Thumb).unwrap();
        // Removing the source proves the second call never touches it
        fs::remove_file(&source).unwrap();
        let second = cache.ensure_tier(&source, &reference, Tier::Thumb).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_tier_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().join("cache"));
        let missing = dir.path().join("nope.jpg");

        let err = cache
            .ensure_tier(&missing, "/nope.jpg", Tier::Thumb)
            .unwrap_err();
        assert!(matches!(err, PosterError::MissingSource(_)));
    }

    #[test]
    fn test_ensure_tier_rejects_undecodable_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        fs::write(&source, b"definitely not a jpeg").unwrap();
        let cache = PosterCache::new(dir.path().join("cache"));

        let err = cache
            .ensure_tier(&source, "/broken.jpg", Tier::Thumb)
            .unwrap_err();
        assert!(matches!(err, PosterError::Image { .. }));
    }
}
