//! # engine_render
//!
//! The GPU side of the asset cache. Every CPU asset that has a GPU
//! representation is mirrored by exactly one derived object, built on first
//! request and refreshed only when the source version moves.
//!
//! This crate provides:
//!
//! - [`GlResourceManager`] — asset id keyed cache of derived objects.
//! - [`GlMesh`] — interleaved vertex and index buffers.
//! - [`GlTexture`] — textures, render targets, cubemaps and cube targets.
//! - [`GlShaderProgram`] — compiled stage set.
//! - [`CacheStats`] — counts of live entries, builds and rebuilds.

pub mod gl_mesh;
pub mod gl_shader;
pub mod gl_texture;
pub mod manager;

pub use gl_mesh::{GlMesh, VERTEX_STRIDE};
pub use gl_shader::GlShaderProgram;
pub use gl_texture::{GlCubemap, GlRenderCubemap, GlRenderTarget, GlTexture, GlTexture2D};
pub use manager::{CacheStats, GlResourceManager};
