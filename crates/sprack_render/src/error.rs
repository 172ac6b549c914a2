//! Error types for artifact builders.

use thiserror::Error;

/// Errors that abort a builder call.
///
/// The document format allows duplicate names; builders that key their output
/// by name reject them instead of silently picking one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// Two layers that would both appear in a tilemap share a name
	#[error("Duplicate layer name \"{0}\"")]
	DuplicateLayerName(String),

	/// Two tags share a name
	#[error("Duplicate tag name \"{0}\"")]
	DuplicateTagName(String),

	/// Two slices share a name within one frame
	#[error("Duplicate slice name \"{name}\" in frame {frame}")]
	DuplicateSliceName {
		/// The repeated name
		name: String,
		/// Frame being built
		frame: usize,
	},

	/// A frame index past the end of the document
	#[error("Frame {frame} out of range (document has {count} frames)")]
	FrameOutOfRange {
		/// Requested frame
		frame: usize,
		/// Number of frames in the document
		count: usize,
	},
}
