//! Frame compositor.
//!
//! Flattens one frame's cels into a canvas-sized buffer, bottom to top.

use log::debug;
use sprack_types::color::Pixel;
use sprack_types::file::ase::{Cel, Document};

use crate::blend::{blend, round8};
use crate::error::BuildError;
use crate::options::ProcessorOptions;

/// Flattens frames of a document.
///
/// Cels are drawn in stacking order: layer index plus z-index, ties broken by
/// z-index and then by file order. A cel is skipped when
///
/// - its layer is hidden (directly or through a group) and only visible
///   layers were requested,
/// - its layer is the background layer and the background is not included,
/// - its layer is a reference layer,
/// - its layer was excluded with [`Compositor::exclude_layer`],
/// - it is a tilemap cel.
///
/// # Examples
///
/// ```no_run
/// use sprack_render::Compositor;
/// use sprack_types::file::ase::Document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc: Document = Document::open("hero.aseprite")?;
/// let pixels = Compositor::new(&doc).exclude_layer(0).flatten(0)?;
/// assert_eq!(pixels.len(), doc.width() as usize * doc.height() as usize);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Compositor<'a, P> {
	doc: &'a Document<P>,
	only_visible_layers: bool,
	include_background_layer: bool,
	excluded: Vec<usize>,
}

impl<'a, P: Pixel> Compositor<'a, P> {
	/// Creates a compositor with the default layer selection.
	pub fn new(doc: &'a Document<P>) -> Self {
		Self::with_options(doc, &ProcessorOptions::default())
	}

	/// Creates a compositor using the layer selection from `options`.
	pub fn with_options(doc: &'a Document<P>, options: &ProcessorOptions) -> Self {
		Self {
			doc,
			only_visible_layers: options.only_visible_layers,
			include_background_layer: options.include_background_layer,
			excluded: Vec::new(),
		}
	}

	/// Never draws the layer at `index`.
	pub fn exclude_layer(mut self, index: usize) -> Self {
		if !self.excluded.contains(&index) {
			self.excluded.push(index);
		}
		self
	}

	/// Returns `true` if cels on the layer at `index` are drawn.
	pub fn draws_layer(&self, index: usize) -> bool {
		let layers = self.doc.layers();
		let Some(layer) = layers.get(index) else {
			return false;
		};
		if self.excluded.contains(&index) || layer.is_reference() || layer.is_group() {
			return false;
		}
		if layer.is_background() && !self.include_background_layer {
			return false;
		}
		!self.only_visible_layers || layer.is_visible_in_hierarchy(layers)
	}

	/// Flattens one frame.
	pub fn flatten(&self, frame: usize) -> Result<Vec<P>, BuildError> {
		let count = self.doc.frames().len();
		let Some(source) = self.doc.frame(frame) else {
			return Err(BuildError::FrameOutOfRange {
				frame,
				count,
			});
		};

		let width = self.doc.width() as usize;
		let height = self.doc.height() as usize;
		let mut canvas = vec![P::transparent(); width * height];

		let mut cels: Vec<&Cel<P>> = source.cels().iter().filter(|c| self.draws_layer(c.layer())).collect();
		cels.sort_by_key(|c| c.stacking_key());

		for cel in cels {
			self.draw_cel(&mut canvas, cel);
		}

		debug!("Flattened frame {frame}");
		Ok(canvas)
	}

	/// Flattens every frame in order, stopping at the first failure.
	pub fn flatten_all(&self) -> Result<Vec<Vec<P>>, BuildError> {
		(0..self.doc.frames().len()).map(|frame| self.flatten(frame)).collect()
	}

	fn draw_cel(&self, canvas: &mut [P], cel: &Cel<P>) {
		// links borrow position and opacity from the cel they point at
		let Some(resolved) = self.doc.resolve_cel(cel) else {
			return;
		};
		let Some(image) = resolved.image() else {
			return;
		};
		let layer = &self.doc.layers()[cel.layer()];
		let opacity = round8(u32::from(resolved.opacity()), u32::from(layer.opacity())) as u8;
		let mode = layer.blend_mode();

		let canvas_width = i64::from(self.doc.width());
		let canvas_height = i64::from(self.doc.height());
		let image_width = image.width as usize;

		for row in 0..image.height as usize {
			let y = i64::from(resolved.y()) + row as i64;
			if y < 0 || y >= canvas_height {
				continue;
			}
			for column in 0..image_width {
				let x = i64::from(resolved.x()) + column as i64;
				if x < 0 || x >= canvas_width {
					continue;
				}
				let Some(&pixel) = image.pixels.get(row * image_width + column) else {
					continue;
				};
				let index = (y * canvas_width + x) as usize;
				canvas[index] = blend(canvas[index], pixel, opacity, mode);
			}
		}
	}
}

/// Flattens one frame with the layer selection from `options`.
pub fn flatten_frame<P: Pixel>(
	doc: &Document<P>,
	frame: usize,
	options: &ProcessorOptions,
) -> Result<Vec<P>, BuildError> {
	Compositor::with_options(doc, options).flatten(frame)
}
