//! # engine_asset
//!
//! CPU-side assets and the versioning contract that lets derived caches
//! decide what to rebuild.
//!
//! This crate provides:
//!
//! - [`AssetId`] — process-wide unique asset identifiers.
//! - [`Cacheable`], [`CacheState`], [`SyncState`] — source versions and the
//!   per-consumer record of which version was last mirrored.
//! - [`Asset`] trait and [`AssetType`] tag.
//! - [`Mesh`], [`Texture`], [`RenderableTexture`], [`Cubemap`],
//!   [`RenderableCubemap`], [`ShaderProgram`], [`Material`].

pub mod asset;
pub mod cache;
pub mod cubemap;
pub mod error;
pub mod id;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use asset::{Asset, AssetHeader, AssetType};
pub use cache::{CacheState, Cacheable, SyncState};
pub use cubemap::{CubeFace, Cubemap, RenderableCubemap};
pub use error::AssetError;
pub use id::AssetId;
pub use material::Material;
pub use mesh::Mesh;
pub use shader::{ShaderProgram, ShaderStage};
pub use texture::{RenderableTexture, Texture};
