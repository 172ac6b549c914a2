//! Conversion of raw pixel payloads into a caller-chosen color type.

use crate::color::Pixel;
use crate::file::AseError;

use super::header::ColorDepth;
use super::palette::Palette;

/// Decodes `count` pixels stored at `depth` in `data`.
///
/// - RGBA: four bytes per pixel, taken as is.
/// - Grayscale: value and alpha bytes; the value is copied into R, G and B.
/// - Indexed: one palette index per pixel. Pixel `i` comes from byte `i`. The
///   palette's transparent index always yields transparent black, whatever
///   the palette stores there, and indices past the end of the palette are
///   transparent as well.
///
/// Extra trailing bytes are ignored.
pub fn decode_pixels<P: Pixel>(
	depth: ColorDepth,
	data: &[u8],
	count: usize,
	palette: &Palette,
) -> Result<Vec<P>, AseError> {
	let expected = count * depth.bytes_per_pixel();
	if data.len() < expected {
		return Err(AseError::PixelDataLength {
			expected,
			actual: data.len(),
		});
	}
	let data = &data[..expected];

	let pixels = match depth {
		ColorDepth::Rgba => data.chunks_exact(4).map(|p| P::from_rgba(p[0], p[1], p[2], p[3])).collect(),
		ColorDepth::Grayscale => {
			data.chunks_exact(2).map(|p| P::from_rgba(p[0], p[0], p[0], p[1])).collect()
		}
		ColorDepth::Indexed => {
			let transparent = palette.transparent_index();
			data.iter()
				.map(|&index| {
					if index == transparent {
						return P::transparent();
					}
					match palette.get(index as usize) {
						Some(c) => P::from_rgba(c.r, c.g, c.b, c.a),
						None => P::transparent(),
					}
				})
				.collect()
		}
	};

	Ok(pixels)
}
