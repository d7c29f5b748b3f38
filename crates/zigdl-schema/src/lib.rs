//! Shared data model for zigdl: the version catalog, artifact descriptors,
//! SHA-256 digests and platform keys.
//!
//! Nothing in this crate performs I/O. Fetching and downloading live in
//! `zigdl-core`.

pub mod catalog;
pub mod hash;
pub mod platform;

// Re-exports
pub use catalog::{
    ArtifactDescriptor, CatalogError, DEV_SENTINEL, PlatformArtifactMap, ReleaseVersion,
    VersionCatalog,
};
pub use hash::*;
pub use platform::PlatformKey;
