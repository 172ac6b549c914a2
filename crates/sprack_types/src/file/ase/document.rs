//! The decoded document.

use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::color::{Pixel, Rgba};
use crate::file::AseError;

use super::cel::{Cel, CelContent, ImageCel};
use super::decoder;
use super::header::ColorDepth;
use super::layer::Layer;
use super::palette::Palette;
use super::slice::Slice;
use super::tag::Tag;
use super::tileset::Tileset;
use super::user_data::UserData;

/// One animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<P = Rgba> {
	pub(crate) duration: u16,
	pub(crate) width: u16,
	pub(crate) height: u16,
	pub(crate) cels: Vec<Cel<P>>,
}

impl<P: Pixel> Frame<P> {
	/// Returns the display duration in milliseconds.
	pub fn duration(&self) -> u16 {
		self.duration
	}

	/// Returns the frame width (the canvas width).
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the frame height (the canvas height).
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the cels in file order.
	pub fn cels(&self) -> &[Cel<P>] {
		&self.cels
	}

	/// Returns the cel on a given layer, if the frame has one.
	pub fn cel_for_layer(&self, layer: usize) -> Option<&Cel<P>> {
		self.cels.iter().find(|c| c.layer == layer)
	}
}

/// A fully decoded sprite document.
///
/// Documents are produced by [`Document::from_reader`] and friends and are
/// read-only afterwards.
///
/// # Examples
///
/// ```no_run
/// use sprack_types::file::ase::Document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc: Document = Document::open("hero.aseprite")?;
/// println!("{}x{}, {} frames", doc.width(), doc.height(), doc.frames().len());
/// for warning in doc.warnings() {
///     println!("warning: {warning}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document<P = Rgba> {
	pub(crate) width: u16,
	pub(crate) height: u16,
	pub(crate) depth: ColorDepth,
	pub(crate) flags: u32,
	pub(crate) pixel_ratio: (u8, u8),
	pub(crate) grid: (i16, i16, u16, u16),
	pub(crate) frames: Vec<Frame<P>>,
	pub(crate) layers: Vec<Layer>,
	pub(crate) tags: Vec<Tag>,
	pub(crate) slices: Vec<Slice>,
	pub(crate) tilesets: Vec<Tileset<P>>,
	pub(crate) palette: Palette,
	pub(crate) user_data: Option<UserData>,
	pub(crate) warnings: Vec<String>,
}

impl<P: Pixel> Document<P> {
	/// Opens and decodes a document from a path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AseError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Decodes a document from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AseError> {
		Self::from_reader(Cursor::new(data))
	}

	/// Decodes a document from a seekable reader positioned at offset 0.
	pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, AseError> {
		decoder::decode(reader)
	}

	/// Returns the canvas width.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the canvas height.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the color depth.
	pub fn depth(&self) -> ColorDepth {
		self.depth
	}

	/// Returns the header flags.
	pub fn flags(&self) -> u32 {
		self.flags
	}

	/// Returns the pixel aspect ratio as (width, height).
	pub fn pixel_ratio(&self) -> (u8, u8) {
		self.pixel_ratio
	}

	/// Returns the editor grid as (x, y, width, height).
	pub fn grid(&self) -> (i16, i16, u16, u16) {
		self.grid
	}

	/// Returns the frames.
	pub fn frames(&self) -> &[Frame<P>] {
		&self.frames
	}

	/// Returns a frame by index.
	pub fn frame(&self, index: usize) -> Option<&Frame<P>> {
		self.frames.get(index)
	}

	/// Returns the layers, bottom to top.
	pub fn layers(&self) -> &[Layer] {
		&self.layers
	}

	/// Returns the first layer with the given name.
	pub fn layer_by_name(&self, name: &str) -> Option<(usize, &Layer)> {
		self.layers.iter().enumerate().find(|(_, l)| l.name == name)
	}

	/// Returns the tags.
	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}

	/// Returns the slices.
	pub fn slices(&self) -> &[Slice] {
		&self.slices
	}

	/// Returns the tilesets.
	pub fn tilesets(&self) -> &[Tileset<P>] {
		&self.tilesets
	}

	/// Returns the palette.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns user data attached to the document itself.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}

	/// Returns non-fatal problems found while decoding.
	pub fn warnings(&self) -> &[String] {
		&self.warnings
	}

	/// Returns the sum of all frame durations in milliseconds.
	pub fn total_duration(&self) -> u64 {
		self.frames.iter().map(|f| u64::from(f.duration)).sum()
	}

	/// Follows a linked cel to the cel holding its payload.
	///
	/// Non-linked cels resolve to themselves. Decoding guarantees links point
	/// at an earlier frame, so this never loops.
	pub fn resolve_cel<'a>(&'a self, cel: &'a Cel<P>) -> Option<&'a Cel<P>> {
		let mut current = cel;
		while let CelContent::Linked {
			frame,
		} = current.content
		{
			current = self.frames.get(frame)?.cel_for_layer(current.layer)?;
		}
		Some(current)
	}

	/// Returns the image payload of a cel, following links.
	pub fn resolve_image<'a>(&'a self, cel: &'a Cel<P>) -> Option<&'a ImageCel<P>> {
		self.resolve_cel(cel).and_then(Cel::image)
	}
}

impl<P> fmt::Display for Document<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Sprite document: {}x{} {}, {} frames, {} layers, {} tags, {} slices, {} tilesets",
			self.width,
			self.height,
			self.depth,
			self.frames.len(),
			self.layers.len(),
			self.tags.len(),
			self.slices.len(),
			self.tilesets.len()
		)
	}
}
