//! Slices: named, keyframed sub-regions of the canvas.

use serde::{Deserialize, Serialize};

use super::user_data::UserData;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge
	pub x: i32,
	/// Top edge
	pub y: i32,
	/// Width
	pub width: u32,
	/// Height
	pub height: u32,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}
}

/// Point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// X coordinate
	pub x: i32,
	/// Y coordinate
	pub y: i32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

/// Slice geometry that takes effect from a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceKey {
	/// Frame from which this key applies
	pub frame: u32,
	/// Slice bounds
	pub bounds: Rect,
	/// Nine-patch center, relative to the bounds
	pub center: Option<Rect>,
	/// Pivot, relative to the bounds
	pub pivot: Option<Point>,
}

/// A named region with sparse keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
	pub(crate) name: String,
	pub(crate) flags: u32,
	pub(crate) keys: Vec<SliceKey>,
	pub(crate) user_data: Option<UserData>,
}

impl Slice {
	/// Returns the slice name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns `true` if keys carry a nine-patch center.
	pub fn is_nine_patch(&self) -> bool {
		self.flags & super::constants::slice_flags::NINE_PATCH != 0
	}

	/// Returns `true` if keys carry a pivot.
	pub fn has_pivot(&self) -> bool {
		self.flags & super::constants::slice_flags::PIVOT != 0
	}

	/// Returns the keys in file order.
	pub fn keys(&self) -> &[SliceKey] {
		&self.keys
	}

	/// Returns user data attached to this slice.
	pub fn user_data(&self) -> Option<&UserData> {
		self.user_data.as_ref()
	}
}
