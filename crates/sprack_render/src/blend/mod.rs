//! Blend engine.
//!
//! Reproduces the editor's integer blend arithmetic exactly, so flattened
//! frames match what the editor exports bit for bit. All channel values are
//! 0..=255 and every mode finishes with the same straight-alpha "normal"
//! composite.
//!
//! Separable modes live in [`channel`]; the four HSL modes (hue, saturation,
//! color, luminosity) live in [`hsl`].

pub mod channel;
pub mod hsl;

use sprack_types::color::Pixel;
use sprack_types::file::ase::BlendMode;

/// Multiplies two 8-bit values as fractions of 255, rounding to nearest.
#[inline]
pub fn round8(a: u32, b: u32) -> u32 {
	let t = a * b + 0x80;
	((t >> 8) + t) >> 8
}

/// Divides `a` by `b` as fractions of 255, rounding to nearest.
///
/// `b` must not be zero.
#[inline]
pub fn div8(a: u32, b: u32) -> u32 {
	(a * 0xFF + b / 2) / b
}

/// Blends `source` over `backdrop` with the given mode and opacity.
///
/// # Examples
///
/// ```
/// use sprack_render::blend::blend;
/// use sprack_types::{color::Rgba, file::ase::BlendMode};
///
/// let backdrop = Rgba::rgb(200, 100, 50);
/// let source = Rgba::rgb(0, 0, 0);
/// assert_eq!(blend(backdrop, source, 0, BlendMode::Normal), backdrop);
/// assert_eq!(blend(backdrop, source, 255, BlendMode::Normal), source);
/// ```
pub fn blend<P: Pixel>(backdrop: P, source: P, opacity: u8, mode: BlendMode) -> P {
	let [br, bg, bb, ba] = backdrop.to_rgba();
	let [sr, sg, sb, sa] = source.to_rgba();

	if ba == 0 && sa == 0 {
		return P::transparent();
	}
	if ba == 0 {
		return P::from_rgba(sr, sg, sb, round8(u32::from(sa), u32::from(opacity)) as u8);
	}
	if sa == 0 {
		return backdrop;
	}

	let b = [br, bg, bb];
	let s = [sr, sg, sb];
	let mixed = match mode {
		BlendMode::Normal => s,
		BlendMode::Hue | BlendMode::Saturation | BlendMode::Color | BlendMode::Luminosity => {
			hsl::blend(mode, b, s)
		}
		_ => {
			let op = channel::for_mode(mode);
			[0, 1, 2].map(|i| op(u32::from(b[i]), u32::from(s[i])).min(255) as u8)
		}
	};

	composite(b, ba, mixed, sa, opacity)
}

/// Straight-alpha source-over of `source` (alpha `sa`) scaled by `opacity`.
fn composite<P: Pixel>(backdrop: [u8; 3], ba: u8, source: [u8; 3], sa: u8, opacity: u8) -> P {
	let sa = round8(u32::from(sa), u32::from(opacity)) as i32;
	let ba = i32::from(ba);
	let ra = sa + ba - round8(ba as u32, sa as u32) as i32;
	if ra == 0 {
		return P::transparent();
	}

	let channel = |i: usize| {
		let b = i32::from(backdrop[i]);
		let s = i32::from(source[i]);
		(b + (s - b) * sa / ra) as u8
	};
	P::from_rgba(channel(0), channel(1), channel(2), ra as u8)
}
