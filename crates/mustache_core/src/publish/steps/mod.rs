//! Publish step implementations.
//!
//! Each step handles one stage of getting a finished recording to the
//! catalog.

mod cover;
mod fetch;
mod metadata;
mod permission;
mod resolve_asset;
mod upload;

pub use cover::CoverStep;
pub use fetch::FetchStep;
pub use metadata::MetadataStep;
pub use permission::PermissionStep;
pub use resolve_asset::ResolveAssetStep;
pub use upload::UploadStep;
