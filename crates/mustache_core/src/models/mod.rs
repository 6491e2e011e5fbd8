//! Data models for Virtual Mustache.
//!
//! This module contains the plain data structures shared across the crate:
//! - Geometry (`Vec3`) used for overlay transforms
//! - The fixed style catalog (`StyleDescriptor`, `StyleCatalog`)
//! - Published catalog entries (`CatalogEntry`)
//! - The per-attempt upload payload (`PublishJob`)

mod catalog;
mod geometry;
mod job;
mod style;

pub use catalog::CatalogEntry;
pub use geometry::Vec3;
pub use job::{PublishJob, CREATED_AT_FORMAT};
pub use style::{StyleCatalog, StyleCatalogError, StyleDescriptor, DEFAULT_POSITION_OFFSET};
