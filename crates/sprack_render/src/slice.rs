//! Slice keyframe interpolation.
//!
//! Slice geometry only changes on frames that carry an explicit key. Every
//! other frame holds the nearest preceding key; frames before the first key
//! use the first key.

use std::collections::HashSet;

use serde::Serialize;
use sprack_types::color::Pixel;
use sprack_types::file::ase::{Document, Point, Rect, Slice, SliceKey};

use crate::error::BuildError;

/// A slice resolved for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSlice {
	/// Slice name
	pub name: String,
	/// Bounds on the canvas
	pub bounds: Rect,
	/// Nine-patch center, relative to the bounds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub center: Option<Rect>,
	/// Pivot, relative to the bounds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pivot: Option<Point>,
}

/// Returns the key in effect at `frame`, if the slice has any keys.
pub fn slice_at_frame(slice: &Slice, frame: usize) -> Option<SliceKey> {
	let mut current: Option<&SliceKey> = None;
	let mut first: Option<&SliceKey> = None;
	for key in slice.keys() {
		if first.is_none_or(|f| key.frame < f.frame) {
			first = Some(key);
		}
		if key.frame as usize <= frame && current.is_none_or(|c| key.frame >= c.frame) {
			current = Some(key);
		}
	}

	current.or(first).map(|key| SliceKey {
		frame: frame as u32,
		..*key
	})
}

/// Expands a slice into one key per frame.
///
/// Returns an empty list for a slice without keys.
///
/// # Examples
///
/// ```
/// use sprack_render::interpolate_slice;
/// use sprack_types::file::ase::{ColorDepth, Document, FileBuilder, FrameBuilder, Rect, SliceKey};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key = SliceKey { frame: 0, bounds: Rect::new(1, 2, 3, 4), center: None, pivot: None };
/// let bytes = FileBuilder::new(8, 8, ColorDepth::Rgba)
/// 	.frame(FrameBuilder::new(100).slice("hit", &[key]))
/// 	.to_bytes()?;
/// let doc: Document = Document::from_bytes(&bytes)?;
///
/// let keys = interpolate_slice(&doc.slices()[0], 10);
/// assert_eq!(keys.len(), 10);
/// assert!(keys.iter().all(|k| k.bounds == key.bounds));
/// # Ok(())
/// # }
/// ```
pub fn interpolate_slice(slice: &Slice, frame_count: usize) -> Vec<SliceKey> {
	if slice.keys().is_empty() {
		return Vec::new();
	}
	(0..frame_count).filter_map(|frame| slice_at_frame(slice, frame)).collect()
}

/// Resolves every slice of `doc` at `frame`.
///
/// Slices without keys are left out. Two slices with the same name fail the
/// call.
pub fn slices_at_frame<P: Pixel>(doc: &Document<P>, frame: usize) -> Result<Vec<FrameSlice>, BuildError> {
	let mut seen = HashSet::new();
	let mut slices = Vec::new();

	for slice in doc.slices() {
		if !seen.insert(slice.name()) {
			return Err(BuildError::DuplicateSliceName {
				name: slice.name().to_string(),
				frame,
			});
		}
		if let Some(key) = slice_at_frame(slice, frame) {
			slices.push(FrameSlice {
				name: slice.name().to_string(),
				bounds: key.bounds,
				center: key.center,
				pivot: key.pivot,
			});
		}
	}

	Ok(slices)
}

#[cfg(test)]
mod tests {
	use sprack_types::file::ase::{ColorDepth, FileBuilder, FrameBuilder};

	use super::*;

	fn key(frame: u32, x: i32) -> SliceKey {
		SliceKey {
			frame,
			bounds: Rect::new(x, 0, 4, 4),
			center: None,
			pivot: None,
		}
	}

	fn doc_with_slices(slices: &[(&str, Vec<SliceKey>)]) -> Document {
		let mut frame = FrameBuilder::new(100);
		for (name, keys) in slices {
			frame = frame.slice(name, keys);
		}
		let bytes = FileBuilder::new(8, 8, ColorDepth::Rgba).frame(frame).to_bytes().unwrap();
		Document::from_bytes(&bytes).unwrap()
	}

	#[test]
	fn test_single_key_holds_for_every_frame() {
		let doc = doc_with_slices(&[("hit", vec![key(0, 3)])]);
		let keys = interpolate_slice(&doc.slices()[0], 10);
		assert_eq!(keys.len(), 10);
		for (frame, k) in keys.iter().enumerate() {
			assert_eq!(k.frame as usize, frame);
			assert_eq!(k.bounds, Rect::new(3, 0, 4, 4));
		}
	}

	#[test]
	fn test_keys_hold_until_next_key() {
		let doc = doc_with_slices(&[("hit", vec![key(2, 1), key(5, 9)])]);
		let xs: Vec<i32> = interpolate_slice(&doc.slices()[0], 8).iter().map(|k| k.bounds.x).collect();
		// frames before the first key use the first key
		assert_eq!(xs, vec![1, 1, 1, 1, 1, 9, 9, 9]);
	}

	#[test]
	fn test_duplicate_slice_names_fail() {
		let doc = doc_with_slices(&[("a", vec![key(0, 0)]), ("a", vec![key(0, 1)])]);
		assert_eq!(
			slices_at_frame(&doc, 0),
			Err(BuildError::DuplicateSliceName {
				name: "a".to_string(),
				frame: 0
			})
		);
	}

	#[test]
	fn test_slices_at_frame() {
		let doc = doc_with_slices(&[("a", vec![key(0, 0), key(1, 5)]), ("b", vec![key(0, 2)])]);
		let slices = slices_at_frame(&doc, 1).unwrap();
		assert_eq!(slices.len(), 2);
		assert_eq!(slices[0].bounds.x, 5);
		assert_eq!(slices[1].bounds.x, 2);
		assert_eq!(serde_json::to_value(&slices[0]).unwrap()["name"], "a");
	}
}
