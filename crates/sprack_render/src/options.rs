//! Builder options.
//!
//! One flat option set drives every builder. Options deserialize with
//! per-field defaults, so a partial TOML or JSON file is valid.

use serde::{Deserialize, Serialize};

/// How frames are arranged in a sprite sheet atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetLayout {
	/// Near-square grid: `ceil(sqrt(n))` columns
	#[default]
	Square,
	/// Single row
	Horizontal,
	/// Single column
	Vertical,
}

/// Options shared by all builders.
///
/// # Presets
///
/// - `default()`: visible layers only, no background, duplicates merged, no padding
/// - `all_layers()`: hidden and background layers included
/// - `padded(border, spacing, inner)`: default layer selection with padding
///
/// # Examples
///
/// ```
/// use sprack_render::{ProcessorOptions, SheetLayout};
///
/// let options = ProcessorOptions {
/// 	layout: SheetLayout::Horizontal,
/// 	..ProcessorOptions::padded(1, 2, 0)
/// };
/// assert!(options.merge_duplicate_frames);
/// assert_eq!(options.spacing, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
	/// Skip layers hidden directly or through a hidden group
	pub only_visible_layers: bool,
	/// Flatten the background layer too
	pub include_background_layer: bool,
	/// Emit tilemap layers from the tilemap builders
	pub include_tilemap_layers: bool,
	/// Reuse atlas regions for pixel-identical frames
	pub merge_duplicate_frames: bool,
	/// Empty pixels around the whole atlas
	pub border_padding: u32,
	/// Empty pixels between atlas cells
	pub spacing: u32,
	/// Empty pixels around each frame inside its cell
	pub inner_padding: u32,
	/// Atlas arrangement
	pub layout: SheetLayout,
}

impl Default for ProcessorOptions {
	fn default() -> Self {
		Self {
			only_visible_layers: true,
			include_background_layer: false,
			include_tilemap_layers: true,
			merge_duplicate_frames: true,
			border_padding: 0,
			spacing: 0,
			inner_padding: 0,
			layout: SheetLayout::Square,
		}
	}
}

impl ProcessorOptions {
	/// Includes hidden and background layers.
	pub fn all_layers() -> Self {
		Self {
			only_visible_layers: false,
			include_background_layer: true,
			..Self::default()
		}
	}

	/// Default layer selection with the given padding.
	///
	/// # Arguments
	/// * `border` - Pixels around the atlas
	/// * `spacing` - Pixels between cells
	/// * `inner` - Pixels around each frame inside its cell
	pub fn padded(border: u32, spacing: u32, inner: u32) -> Self {
		Self {
			border_padding: border,
			spacing,
			inner_padding: inner,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let options = ProcessorOptions::default();
		assert!(options.only_visible_layers);
		assert!(!options.include_background_layer);
		assert!(options.include_tilemap_layers);
		assert!(options.merge_duplicate_frames);
		assert_eq!((options.border_padding, options.spacing, options.inner_padding), (0, 0, 0));
		assert_eq!(options.layout, SheetLayout::Square);
	}

	#[test]
	fn test_partial_json_uses_defaults() {
		let options: ProcessorOptions =
			serde_json::from_str(r#"{ "spacing": 3, "layout": "vertical", "merge_duplicate_frames": false }"#)
				.unwrap();
		assert_eq!(options.spacing, 3);
		assert_eq!(options.layout, SheetLayout::Vertical);
		assert!(!options.merge_duplicate_frames);
		assert!(options.only_visible_layers);
	}

	#[test]
	fn test_presets() {
		let all = ProcessorOptions::all_layers();
		assert!(!all.only_visible_layers);
		assert!(all.include_background_layer);

		let padded = ProcessorOptions::padded(1, 2, 3);
		assert_eq!((padded.border_padding, padded.spacing, padded.inner_padding), (1, 2, 3));
	}
}
