//! Texture atlas packing.

use image::RgbaImage;
use log::debug;
use serde::Serialize;
use sprack_types::color::Pixel;
use sprack_types::file::ase::{Document, Rect};

use crate::compose::Compositor;
use crate::error::BuildError;
use crate::options::ProcessorOptions;
use crate::raster::{blit, to_image};
use crate::slice::{FrameSlice, slices_at_frame};

use super::layout::GridLayout;

/// Where one frame lives in the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtlasRegion {
	/// Frame index
	pub frame: usize,
	/// Pixel rectangle in the atlas
	pub bounds: Rect,
	/// Frame duration in milliseconds
	pub duration: u16,
	/// Earlier frame this one was merged into
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duplicate_of: Option<usize>,
	/// Slices in effect on this frame
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub slices: Vec<FrameSlice>,
}

/// All frames of a document packed into one texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAtlas<P> {
	/// Atlas width
	pub width: u32,
	/// Atlas height
	pub height: u32,
	/// Row-major pixels
	pub pixels: Vec<P>,
	/// One region per frame, in frame order
	pub regions: Vec<AtlasRegion>,
	/// Grid the unique frames were placed on
	pub layout: GridLayout,
}

impl<P: Pixel> TextureAtlas<P> {
	/// Returns the number of frames that got their own cell.
	pub fn unique_frames(&self) -> usize {
		self.regions.iter().filter(|r| r.duplicate_of.is_none()).count()
	}

	/// Converts the atlas to an `image` buffer.
	pub fn to_image(&self) -> RgbaImage {
		to_image(self.width, self.height, &self.pixels)
	}
}

/// Marks frames whose pixels equal an earlier frame.
///
/// Entry `i` is the index of the first frame with identical pixels, or `None`
/// if frame `i` is the first of its kind.
pub fn find_duplicates<P: PartialEq>(frames: &[Vec<P>]) -> Vec<Option<usize>> {
	let mut duplicates: Vec<Option<usize>> = Vec::with_capacity(frames.len());
	for (i, frame) in frames.iter().enumerate() {
		let original = (0..i).find(|&j| duplicates[j].is_none() && frames[j] == *frame);
		duplicates.push(original);
	}
	duplicates
}

/// Flattens every frame of `doc` and packs the results.
pub fn build_atlas<P: Pixel>(doc: &Document<P>, options: &ProcessorOptions) -> Result<TextureAtlas<P>, BuildError> {
	let compositor = Compositor::with_options(doc, options);
	let frames = (0..doc.frames().len()).map(|i| compositor.flatten(i)).collect::<Result<Vec<_>, _>>()?;

	let duplicates = if options.merge_duplicate_frames {
		find_duplicates(&frames)
	} else {
		vec![None; frames.len()]
	};

	let frame_width = u32::from(doc.width());
	let frame_height = u32::from(doc.height());
	let unique = duplicates.iter().filter(|d| d.is_none()).count();
	let layout = GridLayout::new(unique, frame_width, frame_height, options);
	let (width, height) = layout.atlas_size();
	let mut pixels = vec![P::transparent(); width as usize * height as usize];

	let mut regions: Vec<AtlasRegion> = Vec::with_capacity(frames.len());
	let mut cell = 0;
	for (index, frame) in frames.iter().enumerate() {
		let bounds = match duplicates[index] {
			Some(original) => regions[original].bounds,
			None => {
				let (x, y) = layout.cell_origin(cell);
				cell += 1;
				blit(&mut pixels, width, frame, frame_width, frame_height, x, y);
				Rect::new(x as i32, y as i32, frame_width, frame_height)
			}
		};

		regions.push(AtlasRegion {
			frame: index,
			bounds,
			duration: doc.frames()[index].duration(),
			duplicate_of: duplicates[index],
			slices: slices_at_frame(doc, index)?,
		});
	}

	debug!(
		"Packed {} frames ({unique} unique) into a {width}x{height} atlas ({}x{} cells)",
		frames.len(),
		layout.columns,
		layout.rows
	);

	Ok(TextureAtlas {
		width,
		height,
		pixels,
		regions,
		layout,
	})
}
