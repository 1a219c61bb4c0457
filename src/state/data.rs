//! Shared data structures for the list state
//!
//! These structs represent the data model that flows between
//! the data source, the reconciler and the UI layer.

use serde::{Deserialize, Serialize};

/// Stable row identifier, never reused within a catalog
pub type ItemId = i64;

/// Represents a single media entry in the list
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    /// Unique, stable ID
    pub id: ItemId,
    /// Poster path fragment (e.g., "/d0d0gI46dadUPwF4t5XluXR96eA.jpg")
    pub image_path: String,
    /// Overview text shown when the row is expanded
    pub description: String,
    /// Whether the overview is currently visible
    #[serde(default)]
    pub is_expanded: bool,
}

/// Ordered rows in display order
pub type RowList = Vec<RowRecord>;

impl RowRecord {
    /// Create a new, collapsed row
    pub fn new(id: ItemId, image_path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            image_path: image_path.into(),
            description: description.into(),
            is_expanded: false,
        }
    }

    /// Copy of this row with the expansion flag replaced
    pub fn with_expanded(&self, is_expanded: bool) -> Self {
        Self {
            is_expanded,
            ..self.clone()
        }
    }

    /// Build the display reference for this row's poster.
    ///
    /// Plain concatenation: the base is expected to carry no trailing
    /// separator and the path fragment to start with one.
    pub fn image_ref(&self, base: &str) -> String {
        format!("{}{}", base, self.image_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_collapsed() {
        let row = RowRecord::new(1, "/a.jpg", "overview");
        assert!(!row.is_expanded);
    }

    #[test]
    fn test_with_expanded_keeps_other_fields() {
        let row = RowRecord::new(7, "/a.jpg", "overview");
        let expanded = row.with_expanded(true);

        assert!(expanded.is_expanded);
        assert_eq!(expanded.id, row.id);
        assert_eq!(expanded.image_path, row.image_path);
        assert_eq!(expanded.description, row.description);
        // The original value is untouched
        assert!(!row.is_expanded);
    }

    #[test]
    fn test_image_ref_concatenates() {
        let row = RowRecord::new(1, "/d0d0gI46dadUPwF4t5XluXR96eA.jpg", "");
        assert_eq!(
            row.image_ref("https://image.tmdb.org/t/p/w500"),
            "https://image.tmdb.org/t/p/w500/d0d0gI46dadUPwF4t5XluXR96eA.jpg"
        );
    }

    #[test]
    fn test_deserialize_defaults_expansion() {
        let row: RowRecord =
            serde_json::from_str(r#"{"id":3,"image_path":"/x.jpg","description":"d"}"#).unwrap();
        assert_eq!(row, RowRecord::new(3, "/x.jpg", "d"));
    }
}
