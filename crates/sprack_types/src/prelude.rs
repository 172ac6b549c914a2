//! Prelude module for `sprack_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use sprack_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! for layer in doc.layers() {
//!     println!("{layer}");
//! }
//! # Ok(())
//! # }
//! ```

// Color types
#[doc(inline)]
pub use crate::color::{Pixel, Rgba};

// Document types
#[doc(inline)]
pub use crate::file::ase::{
	BlendMode, Cel, CelContent, ColorDepth, Document, Frame, ImageCel, Layer, LayerFlags, LayerKind,
	LoopDirection, Palette, Point, Rect, Slice, SliceKey, Tag, Tile, TilemapCel, Tileset, UserData,
};

#[doc(inline)]
pub use crate::file::AseError;

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
