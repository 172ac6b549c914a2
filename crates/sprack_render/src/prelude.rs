//! Prelude module for `sprack_render`.
//!
//! Brings the builders, their options and the document types into scope.

#[doc(inline)]
pub use crate::{
	AnimatedTilemap, BuildError, Compositor, ProcessorOptions, SheetLayout, Sprite, SpriteSheet, TextureAtlas,
	Tilemap, TilesetTexture, build_animated_tilemap, build_sprite, build_sprite_sheet, build_tilemap,
	build_tileset_texture, flatten_frame,
};

#[doc(inline)]
pub use crate::blend::blend;

#[doc(inline)]
pub use sprack_types::prelude::*;
