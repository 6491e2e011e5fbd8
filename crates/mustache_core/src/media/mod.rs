//! Media library boundary.
//!
//! The publish pipeline reads finished recordings through [`MediaLibrary`]:
//! permission status, the newest video asset, and a chunked byte stream for
//! that asset. [`DirectoryMediaLibrary`] backs it with the recordings folder.

mod directory;
mod library;

pub use directory::DirectoryMediaLibrary;
pub use library::{ChunkStream, MediaError, MediaLibrary, PermissionStatus, VideoAsset};
