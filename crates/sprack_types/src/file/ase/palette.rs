//! Document palette.
//!
//! The format lets palette chunks resize the palette and overwrite any
//! sub-range, so the palette is assembled incrementally while decoding and is
//! only exposed read-only afterwards.

use std::fmt;

use crate::color::Rgba;

/// Ordered palette with a transparent index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Rgba>,
	names: Vec<Option<String>>,
	transparent_index: u8,
}

impl Palette {
	/// Creates an empty palette.
	pub fn new(transparent_index: u8) -> Self {
		Self {
			colors: Vec::new(),
			names: Vec::new(),
			transparent_index,
		}
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Returns `true` when the palette has no entries.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Returns the index treated as transparent for indexed pixels.
	#[inline]
	pub fn transparent_index(&self) -> u8 {
		self.transparent_index
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: usize) -> Option<Rgba> {
		self.colors.get(index).copied()
	}

	/// Gets the name of an entry, if it has one.
	pub fn name(&self, index: usize) -> Option<&str> {
		self.names.get(index).and_then(|n| n.as_deref())
	}

	/// Returns all colors.
	#[inline]
	pub fn colors(&self) -> &[Rgba] {
		&self.colors
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Rgba> {
		self.colors.iter()
	}

	/// Grows or shrinks the palette. New entries are opaque black.
	pub(crate) fn resize(&mut self, len: usize) {
		self.colors.resize(len, Rgba::rgb(0, 0, 0));
		self.names.resize(len, None);
	}

	/// Overwrites one entry, growing the palette if needed.
	pub(crate) fn set(&mut self, index: usize, color: Rgba, name: Option<String>) {
		if index >= self.colors.len() {
			self.resize(index + 1);
		}
		self.colors[index] = color;
		self.names[index] = name;
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette: {} colors, transparent index {}", self.len(), self.transparent_index)
	}
}

impl std::ops::Index<usize> for Palette {
	type Output = Rgba;

	fn index(&self, index: usize) -> &Self::Output {
		&self.colors[index]
	}
}
