//! Rendering and export for decoded sprite documents.
//!
//! # Features
//!
//! - **Blending**: the editor's nineteen blend modes, bit-exact on 8-bit channels
//! - **Compositing**: flatten any frame with layer selection and stacking order
//! - **Sprite sheets**: grid-packed atlases with duplicate merging and tag animations
//! - **Tilemaps**: per-layer tile grids plus tileset textures
//! - **Slices**: keyframed regions resolved per frame
//!
//! # Examples
//!
//! ```no_run
//! use sprack_render::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! let options = ProcessorOptions::default();
//!
//! let sprite = build_sprite(&doc, 0, &options)?;
//! sprite.to_image().save("hero_0.png")?;
//!
//! let sheet = build_sprite_sheet(&doc, "hero", &options)?;
//! println!("{}", serde_json::to_string_pretty(&sheet.metadata())?);
//! # Ok(())
//! # }
//! ```

pub mod blend;
pub mod compose;
pub mod error;
pub mod options;
pub mod raster;
pub mod sheet;
pub mod slice;
pub mod sprite;
pub mod tilemap;
pub mod tileset;

/// `use sprack_render::prelude::*;` to import commonly used items.
pub mod prelude;

pub use compose::{Compositor, flatten_frame};
pub use error::BuildError;
pub use options::{ProcessorOptions, SheetLayout};
pub use sheet::{
	AnimationFrame, AnimationTag, AtlasRegion, GridLayout, SheetMetadata, SpriteSheet, TextureAtlas, build_atlas,
	build_sprite_sheet,
};
pub use slice::{FrameSlice, interpolate_slice, slice_at_frame, slices_at_frame};
pub use sprite::{Sprite, build_sprite};
pub use tilemap::{AnimatedTilemap, Tilemap, TilemapFrame, TilemapLayer, build_animated_tilemap, build_tilemap};
pub use tileset::{TilesetTexture, build_tileset_texture};
