//! Models Module
//!
//! Data types produced by the album and track APIs, plus the value type
//! stored in the shared cache.

mod album;
mod cached;
mod image;
mod track;

pub use album::{Album, AlbumRef, Artist};
pub use cached::CachedValue;
pub use image::{FormatRef, ImageConstants, ImageFormat};
pub use track::Track;
