//! Overlay style catalog.
//!
//! The catalog is immutable and loaded once. A style's `index` is its stable
//! identity: selection events and publish metadata both refer to styles by
//! index, never by name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Vec3;

/// Position offset shared by every built-in style, relative to the face anchor.
pub const DEFAULT_POSITION_OFFSET: Vec3 = Vec3::new(0.0, -0.03, 0.06);

/// Built-in styles: (display name, scale).
const BUILTIN_STYLES: [(&str, [f32; 3]); 5] = [
    ("Mustache_1", [0.0005, 0.00035, 0.00005]),
    ("Mustache_2", [0.002, 0.002, 0.003594]),
    ("Mustache_3", [0.0004, 0.0004, 0.00008]),
    ("Mustache_4", [0.002, 0.002, 0.005]),
    ("Mustache_5", [0.0005, 0.0005, 0.000686]),
];

/// One overlay style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Stable identity, equal to the style's position in the catalog.
    pub index: usize,
    /// Reference to the 3D asset (e.g. `Mustache_1.scn`).
    pub asset_ref: String,
    /// Fixed scale applied to the loaded node.
    pub scale: Vec3,
    /// Position relative to the face anchor.
    pub position_offset: Vec3,
    /// Human readable name; also used as publish title/tag and preview image name.
    pub display_name: String,
}

impl StyleDescriptor {
    /// File name of the static preview image for this style.
    pub fn preview_ref(&self) -> String {
        format!("{}.png", self.display_name)
    }
}

/// Errors building a catalog from custom descriptors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleCatalogError {
    #[error("Style catalog is empty")]
    Empty,

    #[error("Style at position {position} declares index {declared}")]
    IndexMismatch { position: usize, declared: usize },
}

/// Immutable, ordered list of overlay styles.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: Vec<StyleDescriptor>,
}

impl StyleCatalog {
    /// The fixed five-entry catalog shipped with the app.
    pub fn builtin() -> Self {
        let styles = BUILTIN_STYLES
            .iter()
            .enumerate()
            .map(|(index, (name, scale))| StyleDescriptor {
                index,
                asset_ref: format!("{name}.scn"),
                scale: Vec3::from(*scale),
                position_offset: DEFAULT_POSITION_OFFSET,
                display_name: (*name).to_string(),
            })
            .collect();

        Self { styles }
    }

    /// Build a catalog from explicit descriptors.
    ///
    /// Each descriptor's `index` must equal its position.
    pub fn from_descriptors(styles: Vec<StyleDescriptor>) -> Result<Self, StyleCatalogError> {
        if styles.is_empty() {
            return Err(StyleCatalogError::Empty);
        }
        for (position, style) in styles.iter().enumerate() {
            if style.index != position {
                return Err(StyleCatalogError::IndexMismatch {
                    position,
                    declared: style.index,
                });
            }
        }
        Ok(Self { styles })
    }

    /// Number of styles (N).
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Whether `index` lies in `[0, N)`.
    pub fn contains(&self, index: usize) -> bool {
        index < self.styles.len()
    }

    /// Look up a style by index.
    pub fn get(&self, index: usize) -> Option<&StyleDescriptor> {
        self.styles.get(index)
    }

    /// Iterate styles in index order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.iter()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_styles_in_order() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        for (i, style) in catalog.iter().enumerate() {
            assert_eq!(style.index, i);
            assert_eq!(style.display_name, format!("Mustache_{}", i + 1));
            assert_eq!(style.asset_ref, format!("Mustache_{}.scn", i + 1));
            assert_eq!(style.position_offset, DEFAULT_POSITION_OFFSET);
        }
    }

    #[test]
    fn builtin_first_style_scale() {
        let catalog = StyleCatalog::builtin();
        let first = catalog.get(0).unwrap();
        assert_eq!(first.scale, Vec3::new(0.0005, 0.00035, 0.00005));
        assert_eq!(first.preview_ref(), "Mustache_1.png");
    }

    #[test]
    fn contains_checks_range() {
        let catalog = StyleCatalog::builtin();
        assert!(catalog.contains(0));
        assert!(catalog.contains(4));
        assert!(!catalog.contains(5));
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn from_descriptors_rejects_index_mismatch() {
        let mut styles: Vec<_> = StyleCatalog::builtin().iter().cloned().collect();
        styles.swap(0, 1);
        let err = StyleCatalog::from_descriptors(styles).unwrap_err();
        assert_eq!(
            err,
            StyleCatalogError::IndexMismatch {
                position: 0,
                declared: 1
            }
        );
    }

    #[test]
    fn from_descriptors_rejects_empty() {
        assert_eq!(
            StyleCatalog::from_descriptors(Vec::new()).unwrap_err(),
            StyleCatalogError::Empty
        );
    }
}
