//! User data attached to layers, cels, tags, slices, tilesets or the document.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Free-form text and color a user attached in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
	/// Text, if any
	pub text: Option<String>,
	/// Color, if any
	pub color: Option<Rgba>,
}

impl UserData {
	/// Returns `true` when neither text nor color is set.
	pub fn is_empty(&self) -> bool {
		self.text.is_none() && self.color.is_none()
	}
}
