//! Single-frame sprites.

use image::RgbaImage;
use sprack_types::color::Pixel;
use sprack_types::file::ase::Document;

use crate::compose::flatten_frame;
use crate::error::BuildError;
use crate::options::ProcessorOptions;
use crate::raster::to_image;
use crate::slice::{FrameSlice, slices_at_frame};

/// One flattened frame with the slices active on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite<P> {
	/// Frame index
	pub frame: usize,
	/// Canvas width
	pub width: u32,
	/// Canvas height
	pub height: u32,
	/// Duration in milliseconds
	pub duration: u16,
	/// Row-major pixels
	pub pixels: Vec<P>,
	/// Slices with a key at or before this frame
	pub slices: Vec<FrameSlice>,
}

impl<P: Pixel> Sprite<P> {
	/// Converts the sprite to an `image` buffer.
	pub fn to_image(&self) -> RgbaImage {
		to_image(self.width, self.height, &self.pixels)
	}
}

/// Flattens `frame` into a sprite.
pub fn build_sprite<P: Pixel>(doc: &Document<P>, frame: usize, options: &ProcessorOptions) -> Result<Sprite<P>, BuildError> {
	let pixels = flatten_frame(doc, frame, options)?;
	let duration = doc.frame(frame).map_or(0, |f| f.duration());
	Ok(Sprite {
		frame,
		width: u32::from(doc.width()),
		height: u32::from(doc.height()),
		duration,
		pixels,
		slices: slices_at_frame(doc, frame)?,
	})
}
