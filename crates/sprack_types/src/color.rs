//! Color types shared by the decoder and the renderer.
//!
//! Decoded pixel buffers are generic over [`Pixel`], a small capability trait
//! that converts to and from straight-alpha RGBA components. The decoder, the
//! blend engine and the builders are written once against this trait, so a
//! caller can decode directly into [`Rgba`], `[u8; 4]` or `image::Rgba<u8>`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Rgba {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates an opaque grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::rgb(value, value, value)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns `true` when the alpha component is zero.
	#[inline]
	pub const fn is_transparent(&self) -> bool {
		self.a == 0
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// A color representation that decoded pixels can be produced in.
///
/// Implementors only need to convert to and from straight-alpha RGBA bytes.
pub trait Pixel: Copy + PartialEq + fmt::Debug {
	/// Builds a pixel from straight-alpha RGBA components.
	fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self;

	/// Returns the straight-alpha RGBA components of this pixel.
	fn to_rgba(self) -> [u8; 4];

	/// Returns the alpha component.
	#[inline]
	fn alpha(self) -> u8 {
		self.to_rgba()[3]
	}

	/// Returns fully transparent black.
	#[inline]
	fn transparent() -> Self {
		Self::from_rgba(0, 0, 0, 0)
	}
}

impl Pixel for Rgba {
	#[inline]
	fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self::new(r, g, b, a)
	}

	#[inline]
	fn to_rgba(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	#[inline]
	fn alpha(self) -> u8 {
		self.a
	}
}

impl Pixel for [u8; 4] {
	#[inline]
	fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		[r, g, b, a]
	}

	#[inline]
	fn to_rgba(self) -> [u8; 4] {
		self
	}
}

impl Pixel for image::Rgba<u8> {
	#[inline]
	fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		image::Rgba([r, g, b, a])
	}

	#[inline]
	fn to_rgba(self) -> [u8; 4] {
		self.0
	}
}

impl From<[u8; 4]> for Rgba {
	fn from(value: [u8; 4]) -> Self {
		Self::new(value[0], value[1], value[2], value[3])
	}
}

impl From<Rgba> for [u8; 4] {
	fn from(value: Rgba) -> Self {
		value.to_rgba()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pixel_impls_agree() {
		let ours = Rgba::from_rgba(1, 2, 3, 4);
		let array = <[u8; 4]>::from_rgba(1, 2, 3, 4);
		let img = image::Rgba::<u8>::from_rgba(1, 2, 3, 4);
		assert_eq!(ours.to_rgba(), array);
		assert_eq!(img.to_rgba(), array);
		assert_eq!(img.alpha(), 4);
	}

	#[test]
	fn test_transparent() {
		assert!(Rgba::transparent().is_transparent());
		assert_eq!(<[u8; 4] as Pixel>::transparent(), [0, 0, 0, 0]);
	}
}
