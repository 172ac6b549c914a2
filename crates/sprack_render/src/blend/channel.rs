//! Separable blend modes.
//!
//! Each function takes a backdrop channel `b` and a source channel `s`, both
//! 0..=255, and returns the mixed channel.

use sprack_types::file::ase::BlendMode;

use super::{div8, round8};

/// A per-channel blend function.
pub type ChannelOp = fn(u32, u32) -> u32;

/// Returns the channel function for a separable mode.
///
/// Normal and the HSL modes are not separable; they map to [`normal`].
pub fn for_mode(mode: BlendMode) -> ChannelOp {
	match mode {
		BlendMode::Multiply => multiply,
		BlendMode::Screen => screen,
		BlendMode::Overlay => overlay,
		BlendMode::Darken => darken,
		BlendMode::Lighten => lighten,
		BlendMode::ColorDodge => color_dodge,
		BlendMode::ColorBurn => color_burn,
		BlendMode::HardLight => hard_light,
		BlendMode::SoftLight => soft_light,
		BlendMode::Difference => difference,
		BlendMode::Exclusion => exclusion,
		BlendMode::Addition => addition,
		BlendMode::Subtract => subtract,
		BlendMode::Divide => divide,
		BlendMode::Normal
		| BlendMode::Hue
		| BlendMode::Saturation
		| BlendMode::Color
		| BlendMode::Luminosity => normal,
	}
}

/// Source replaces backdrop.
#[inline]
pub fn normal(_b: u32, s: u32) -> u32 {
	s
}

/// Darkens by multiplying.
#[inline]
pub fn multiply(b: u32, s: u32) -> u32 {
	round8(b, s)
}

/// Lightens by inverse multiplying.
#[inline]
pub fn screen(b: u32, s: u32) -> u32 {
	b + s - round8(b, s)
}

/// Hard light with the arguments swapped.
#[inline]
pub fn overlay(b: u32, s: u32) -> u32 {
	hard_light(s, b)
}

/// Keeps the darker channel.
#[inline]
pub fn darken(b: u32, s: u32) -> u32 {
	b.min(s)
}

/// Keeps the lighter channel.
#[inline]
pub fn lighten(b: u32, s: u32) -> u32 {
	b.max(s)
}

/// Multiply below mid-gray, screen above it.
pub fn hard_light(b: u32, s: u32) -> u32 {
	if s < 128 {
		multiply(b, s << 1)
	} else {
		screen(b, (s << 1) - 255)
	}
}

/// Absolute difference.
#[inline]
pub fn difference(b: u32, s: u32) -> u32 {
	b.abs_diff(s)
}

/// Lower-contrast difference.
#[inline]
pub fn exclusion(b: u32, s: u32) -> u32 {
	b + s - 2 * round8(b, s)
}

/// Divides backdrop by source.
pub fn divide(b: u32, s: u32) -> u32 {
	if b == 0 {
		0
	} else if b >= s {
		255
	} else {
		div8(b, s)
	}
}

/// Brightens the backdrop towards the source.
pub fn color_dodge(b: u32, s: u32) -> u32 {
	if b == 0 {
		return 0;
	}
	let s = 255 - s;
	if b >= s { 255 } else { div8(b, s) }
}

/// Darkens the backdrop towards the source.
pub fn color_burn(b: u32, s: u32) -> u32 {
	if b == 255 {
		return 255;
	}
	let b = 255 - b;
	if b >= s { 0 } else { 255 - div8(b, s) }
}

/// Soft light, computed in floating point like the editor.
pub fn soft_light(b: u32, s: u32) -> u32 {
	let b = f64::from(b) / 255.0;
	let s = f64::from(s) / 255.0;

	let d = if b <= 0.25 {
		((16.0 * b - 12.0) * b + 4.0) * b
	} else {
		b.sqrt()
	};

	let r = if s <= 0.5 {
		b - (1.0 - 2.0 * s) * b * (1.0 - b)
	} else {
		b + (2.0 * s - 1.0) * (d - b)
	};

	(r * 255.0 + 0.5) as u32
}

/// Saturating sum.
#[inline]
pub fn addition(b: u32, s: u32) -> u32 {
	(b + s).min(255)
}

/// Saturating difference.
#[inline]
pub fn subtract(b: u32, s: u32) -> u32 {
	b.saturating_sub(s)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_results_stay_in_range() {
		for mode in BlendMode::ALL {
			let op = for_mode(mode);
			for b in (0..=255).step_by(5) {
				for s in (0..=255).step_by(5) {
					assert!(op(b, s) <= 255, "{mode} b={b} s={s}");
				}
			}
		}
	}

	#[test]
	fn test_hard_light_and_overlay() {
		assert_eq!(hard_light(200, 0), 0);
		assert_eq!(hard_light(200, 255), 255);
		assert_eq!(hard_light(100, 64), multiply(100, 128));
		assert_eq!(overlay(64, 100), hard_light(100, 64));
	}

	#[test]
	fn test_dodge_burn_divide_early_outs() {
		assert_eq!(color_dodge(0, 255), 0);
		assert_eq!(color_dodge(10, 255), 255);
		assert_eq!(color_dodge(100, 0), div8(100, 255));

		assert_eq!(color_burn(255, 0), 255);
		assert_eq!(color_burn(10, 0), 0);
		assert_eq!(color_burn(200, 255), 255 - div8(55, 255));

		assert_eq!(divide(0, 0), 0);
		assert_eq!(divide(10, 0), 255);
		assert_eq!(divide(10, 20), div8(10, 20));
	}

	#[test]
	fn test_soft_light_endpoints() {
		assert_eq!(soft_light(0, 0), 0);
		assert_eq!(soft_light(255, 255), 255);
		assert_eq!(soft_light(128, 128), 128);
		assert_eq!(soft_light(0, 255), 0);
	}

	#[test]
	fn test_exclusion_and_difference() {
		assert_eq!(exclusion(255, 255), 0);
		assert_eq!(exclusion(0, 200), 200);
		assert_eq!(difference(10, 250), 240);
	}
}
