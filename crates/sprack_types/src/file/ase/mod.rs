//! Sprite document support.
//!
//! This module decodes the layered, animated sprite document format produced
//! by pixel-art editors (`.aseprite` / `.ase` files) into an in-memory
//! [`Document`].
//!
//! # File Structure
//!
//! A document is a 128-byte header followed by frames. Each frame is a
//! 16-byte frame header followed by chunks; every chunk starts with its size
//! and a type tag, so unknown or partially understood chunks are skipped by
//! size. See [`decoder`] for the chunk table.
//!
//! Layers, tags, the palette, tilesets and slices are usually all stored in
//! frame 0. Cels may appear in any frame and refer to layers by index.
//!
//! # Features
//!
//! - **Decoding**: every chunk needed to render frames, including linked cels,
//!   tilemaps, slices and user data
//! - **Pixel types**: decode into [`Rgba`](crate::color::Rgba), `[u8; 4]` or
//!   `image::Rgba<u8>` via the [`Pixel`](crate::color::Pixel) trait
//! - **Warnings**: recoverable oddities are collected on the document and
//!   logged instead of failing the decode
//! - **Writing**: [`FileBuilder`] serializes small documents for fixtures and
//!   tools
//!
//! # Examples
//!
//! ```no_run
//! use sprack_types::file::ase::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//!
//! for (index, layer) in doc.layers().iter().enumerate() {
//!     println!("{index}: {layer}");
//! }
//! for tag in doc.tags() {
//!     println!("{tag}");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod cel;
pub mod constants;
pub mod decoder;
mod document;
mod header;
mod layer;
mod palette;
mod pixel;
mod slice;
mod tag;
mod tileset;
mod user_data;

#[cfg(test)]
mod tests;

pub use builder::{CelPayload, CelRecord, FileBuilder, FrameBuilder, LayerRecord, TagRecord, TilesetRecord};
pub use cel::{Cel, CelContent, ImageCel, Tile, TileMasks, TilemapCel};
pub use document::{Document, Frame};
pub use header::{ColorDepth, Header};
pub use layer::{BlendMode, Layer, LayerFlags, LayerKind};
pub use palette::Palette;
pub use pixel::decode_pixels;
pub use slice::{Point, Rect, Slice, SliceKey};
pub use tag::{LoopDirection, Tag};
pub use tileset::Tileset;
pub use user_data::UserData;
