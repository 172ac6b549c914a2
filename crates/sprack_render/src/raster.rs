//! Conversion of pixel buffers to `image` buffers.

use image::RgbaImage;
use sprack_types::color::Pixel;

/// Copies a row-major pixel buffer into an [`RgbaImage`].
///
/// Missing pixels (a buffer shorter than `width * height`) come out
/// transparent.
pub fn to_image<P: Pixel>(width: u32, height: u32, pixels: &[P]) -> RgbaImage {
	RgbaImage::from_fn(width, height, |x, y| {
		let index = y as usize * width as usize + x as usize;
		image::Rgba(pixels.get(index).map_or([0; 4], |p| p.to_rgba()))
	})
}

/// Copies a `width` x `height` block of `source` into `target` at `(x, y)`.
pub(crate) fn blit<P: Pixel>(
	target: &mut [P],
	target_width: u32,
	source: &[P],
	width: u32,
	height: u32,
	x: u32,
	y: u32,
) {
	let width = width as usize;
	let target_width = target_width as usize;
	for row in 0..height as usize {
		let from = row * width;
		let to = (y as usize + row) * target_width + x as usize;
		if let (Some(src), Some(dst)) = (source.get(from..from + width), target.get_mut(to..to + width)) {
			dst.copy_from_slice(src);
		}
	}
}
