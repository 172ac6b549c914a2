//! Sprite sheets: a packed atlas plus per-tag animation descriptors.
//!
//! # Examples
//!
//! ```no_run
//! use sprack_render::{ProcessorOptions, build_sprite_sheet};
//! use sprack_types::file::ase::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! let sheet = build_sprite_sheet(&doc, "hero", &ProcessorOptions::padded(0, 1, 0))?;
//!
//! sheet.atlas.to_image().save("hero.png")?;
//! for tag in &sheet.tags {
//!     println!("{}: {} frames", tag.name, tag.frames.len());
//! }
//! # Ok(())
//! # }
//! ```

mod atlas;
mod layout;

use std::collections::HashSet;

use serde::Serialize;
use sprack_types::color::{Pixel, Rgba};
use sprack_types::file::ase::{Document, LoopDirection};

use crate::error::BuildError;
use crate::options::ProcessorOptions;

pub use atlas::{AtlasRegion, TextureAtlas, build_atlas, find_duplicates};
pub use layout::GridLayout;

/// One step of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnimationFrame {
	/// Frame index in the document
	pub frame: usize,
	/// Region holding the pixels; the original when the frame was merged
	pub region: usize,
	/// Duration in milliseconds
	pub duration: u16,
}

/// A tag turned into a playable animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationTag {
	/// Tag name
	pub name: String,
	/// Loop direction
	pub direction: LoopDirection,
	/// Repeat count (0 = forever)
	pub repeat: u16,
	/// Tag color, overridden by its user data color
	pub color: Rgba,
	/// Frames `from..=to`
	pub frames: Vec<AnimationFrame>,
}

impl AnimationTag {
	/// Returns the total duration of one pass in milliseconds.
	pub fn duration(&self) -> u64 {
		self.frames.iter().map(|f| u64::from(f.duration)).sum()
	}
}

/// A packed atlas with its animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet<P> {
	/// Sheet name
	pub name: String,
	/// Packed frames
	pub atlas: TextureAtlas<P>,
	/// Animations, in tag order
	pub tags: Vec<AnimationTag>,
}

/// Serializable description of a sheet, without pixels.
#[derive(Debug, Clone, Serialize)]
pub struct SheetMetadata<'a> {
	/// Sheet name
	pub name: &'a str,
	/// Atlas size as `[width, height]`
	pub size: [u32; 2],
	/// Grid the frames were placed on
	pub layout: &'a GridLayout,
	/// One region per frame
	pub frames: &'a [AtlasRegion],
	/// Animations
	pub tags: &'a [AnimationTag],
}

impl<P: Pixel> SpriteSheet<P> {
	/// Returns the metadata to store next to the atlas image.
	pub fn metadata(&self) -> SheetMetadata<'_> {
		SheetMetadata {
			name: &self.name,
			size: [self.atlas.width, self.atlas.height],
			layout: &self.atlas.layout,
			frames: &self.atlas.regions,
			tags: &self.tags,
		}
	}
}

/// Builds the sprite sheet of a whole document.
pub fn build_sprite_sheet<P: Pixel>(
	doc: &Document<P>,
	name: &str,
	options: &ProcessorOptions,
) -> Result<SpriteSheet<P>, BuildError> {
	let mut names = HashSet::new();
	for tag in doc.tags() {
		if !names.insert(tag.name()) {
			return Err(BuildError::DuplicateTagName(tag.name().to_string()));
		}
	}

	let atlas = build_atlas(doc, options)?;
	let last = atlas.regions.len().saturating_sub(1);

	let tags = doc
		.tags()
		.iter()
		.map(|tag| {
			let from = tag.from() as usize;
			let to = (tag.to() as usize).min(last);
			let frames = atlas
				.regions
				.get(from..=to)
				.unwrap_or_default()
				.iter()
				.map(|region| AnimationFrame {
					frame: region.frame,
					region: region.duplicate_of.unwrap_or(region.frame),
					duration: region.duration,
				})
				.collect();

			AnimationTag {
				name: tag.name().to_string(),
				direction: tag.direction(),
				repeat: tag.repeat(),
				color: tag.effective_color(),
				frames,
			}
		})
		.collect();

	Ok(SpriteSheet {
		name: name.to_string(),
		atlas,
		tags,
	})
}
