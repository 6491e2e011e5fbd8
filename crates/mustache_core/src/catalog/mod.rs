//! Remote video catalog.
//!
//! HTTP endpoints, relative to the configured base URL:
//!
//! | Operation      | Request                     |
//! |----------------|-----------------------------|
//! | list           | `GET /video/videos`         |
//! | delete         | `DELETE /video/{id}`        |
//! | upload         | `POST /upload` (multipart)  |
//! | play URL       | `/video/play/{id}`          |
//! | cover image    | `GET /video/image/{id}`     |
//!
//! List responses use the `{code, msg, data}` envelope; see [`wire`].

mod client;
mod errors;
mod view;
pub mod wire;

pub use client::{CatalogClient, VideoUploader};
pub use errors::{CatalogError, CatalogResult, DecodeError};
pub use view::CatalogView;
