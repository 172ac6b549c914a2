//! Grid arithmetic for atlas packing.

use serde::Serialize;

use crate::options::{ProcessorOptions, SheetLayout};

/// Cell grid of an atlas.
///
/// Every cell holds one frame surrounded by `inner_padding`; cells are
/// separated by `spacing` and the whole grid is surrounded by
/// `border_padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridLayout {
	/// Number of cell columns
	pub columns: u32,
	/// Number of cell rows
	pub rows: u32,
	/// Frame width
	pub frame_width: u32,
	/// Frame height
	pub frame_height: u32,
	/// Pixels around the atlas
	pub border_padding: u32,
	/// Pixels between cells
	pub spacing: u32,
	/// Pixels around each frame inside its cell
	pub inner_padding: u32,
}

impl GridLayout {
	/// Lays out `count` frames of `frame_width` x `frame_height`.
	pub fn new(count: usize, frame_width: u32, frame_height: u32, options: &ProcessorOptions) -> Self {
		let count = count as u32;
		let (columns, rows) = match (count, options.layout) {
			(0, _) => (0, 0),
			(_, SheetLayout::Square) => {
				let columns = ceil_sqrt(count);
				(columns, count.div_ceil(columns))
			}
			(_, SheetLayout::Horizontal) => (count, 1),
			(_, SheetLayout::Vertical) => (1, count),
		};

		Self {
			columns,
			rows,
			frame_width,
			frame_height,
			border_padding: options.border_padding,
			spacing: options.spacing,
			inner_padding: options.inner_padding,
		}
	}

	/// Returns the number of cells.
	pub fn capacity(&self) -> usize {
		self.columns as usize * self.rows as usize
	}

	/// Returns the top-left pixel of the frame placed in cell `index`.
	pub fn cell_origin(&self, index: usize) -> (u32, u32) {
		let columns = self.columns.max(1) as usize;
		let column = (index % columns) as u32;
		let row = (index / columns) as u32;
		let x = self.border_padding
			+ column * (self.frame_width + 2 * self.inner_padding + self.spacing)
			+ self.inner_padding;
		let y = self.border_padding
			+ row * (self.frame_height + 2 * self.inner_padding + self.spacing)
			+ self.inner_padding;
		(x, y)
	}

	/// Returns the atlas size in pixels.
	pub fn atlas_size(&self) -> (u32, u32) {
		let extent = |cells: u32, size: u32| {
			2 * self.border_padding + cells * (size + 2 * self.inner_padding) + cells.saturating_sub(1) * self.spacing
		};
		(extent(self.columns, self.frame_width), extent(self.rows, self.frame_height))
	}
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: u32) -> u32 {
	let mut c = f64::from(n).sqrt() as u32;
	while c * c < n {
		c += 1;
	}
	c
}
