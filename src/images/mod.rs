/// Poster loading module
///
/// This module handles:
/// - Resolving a poster reference to a local source file
/// - Generating and caching resized tiers (cache.rs)
/// - Loading tiers off the UI thread into iced image handles (loader.rs)
///
/// Every failure stays inside this module: callers get `None` and the
/// UI keeps its placeholder.

pub mod cache;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

pub use cache::PosterCache;
pub use loader::load_poster;

/// Cache tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 256px wide, for list rows
    Thumb,
    /// 1280px wide, for the detail screen
    Full,
}

impl Tier {
    pub fn width(self) -> u32 {
        match self {
            Tier::Thumb => 256,
            Tier::Full => 1280,
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Tier::Thumb => "thumb",
            Tier::Full => "full",
        }
    }
}

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Remote poster references are not fetched: {0}")]
    Remote(String),

    #[error("Poster source does not exist: {0}")]
    MissingSource(PathBuf),

    #[error("Poster I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process poster {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Poster task failed: {0}")]
    Join(String),
}

/// Turn a poster reference into a local file path.
///
/// `file://` references are stripped to their path; `http://` and
/// `https://` references are rejected since nothing is fetched remotely.
pub fn resolve(reference: &str) -> Result<PathBuf, PosterError> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Err(PosterError::Remote(reference.to_string()));
    }

    let path = reference.strip_prefix("file://").unwrap_or(reference);
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_path() {
        assert_eq!(
            resolve("/srv/posters/a.jpg").unwrap(),
            PathBuf::from("/srv/posters/a.jpg")
        );
    }

    #[test]
    fn test_resolve_strips_file_scheme() {
        assert_eq!(
            resolve("file:///srv/posters/a.jpg").unwrap(),
            PathBuf::from("/srv/posters/a.jpg")
        );
    }

    #[test]
    fn test_resolve_rejects_remote() {
        let err = resolve("https://image.tmdb.org/t/p/w500/a.jpg").unwrap_err();
        assert!(matches!(err, PosterError::Remote(_)));
    }

    #[test]
    fn test_tiers_are_ordered_by_width() {
        assert!(Tier::Thumb.width() < Tier::Full.width());
        assert_ne!(Tier::Thumb.dir_name(), Tier::Full.dir_name());
    }
}
