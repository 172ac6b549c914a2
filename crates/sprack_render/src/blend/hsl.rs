//! Non-separable HSL blend modes.
//!
//! Colors are converted to 0.0..=1.0 triples, mixed with the editor's
//! luminosity and saturation helpers, then truncated back to 0..=255.

use sprack_types::file::ase::BlendMode;

type Color = [f64; 3];

const R: usize = 0;
const G: usize = 1;
const B: usize = 2;

/// Luminosity with the editor's weights.
#[inline]
pub fn lum(c: Color) -> f64 {
	0.3 * c[R] + 0.59 * c[G] + 0.11 * c[B]
}

/// Saturation as the spread between the largest and smallest component.
#[inline]
pub fn sat(c: Color) -> f64 {
	c[R].max(c[G]).max(c[B]) - c[R].min(c[G]).min(c[B])
}

/// Pulls out-of-range components back towards the luminosity point.
pub fn clip_color(c: &mut Color) {
	let l = lum(*c);
	let n = c[R].min(c[G]).min(c[B]);
	let x = c[R].max(c[G]).max(c[B]);

	if n < 0.0 {
		for v in c.iter_mut() {
			*v = l + ((*v - l) * l) / (l - n);
		}
	}

	if x > 1.0 {
		for v in c.iter_mut() {
			*v = l + ((*v - l) * (1.0 - l)) / (x - l);
		}
	}
}

/// Shifts the color to luminosity `l`, then clips it.
pub fn set_lum(c: &mut Color, l: f64) {
	let d = l - lum(*c);
	for v in c.iter_mut() {
		*v += d;
	}
	clip_color(c);
}

/// Rescales the color to saturation `s`.
///
/// Components are picked by index with the editor's min/mid/max selection.
/// When two components tie, the same slot can be picked twice and the later
/// write wins, which the exported images depend on.
pub fn set_sat(c: &mut Color, s: f64) {
	let min_of = |x: usize, y: usize| if c[x] < c[y] { x } else { y };
	let max_of = |x: usize, y: usize| if c[x] > c[y] { x } else { y };

	let min = min_of(R, min_of(G, B));
	let max = max_of(R, max_of(G, B));
	let mid = if c[R] > c[G] {
		if c[G] > c[B] {
			G
		} else if c[R] > c[B] {
			B
		} else {
			R
		}
	} else if c[G] > c[B] {
		if c[B] > c[R] { B } else { R }
	} else {
		G
	};

	if c[max] > c[min] {
		c[mid] = ((c[mid] - c[min]) * s) / (c[max] - c[min]);
		c[max] = s;
	} else {
		c[mid] = 0.0;
		c[max] = 0.0;
	}
	c[min] = 0.0;
}

fn to_unit(c: [u8; 3]) -> Color {
	c.map(|v| f64::from(v) / 255.0)
}

fn from_unit(c: Color) -> [u8; 3] {
	c.map(|v| ((255.0 * v) as i32).clamp(0, 255) as u8)
}

/// Mixes `source` into `backdrop` with one of the HSL modes.
///
/// Any other mode returns `source` unchanged.
pub fn blend(mode: BlendMode, backdrop: [u8; 3], source: [u8; 3]) -> [u8; 3] {
	let b = to_unit(backdrop);
	let s = to_unit(source);

	let mixed = match mode {
		BlendMode::Hue => {
			let mut c = s;
			set_sat(&mut c, sat(b));
			set_lum(&mut c, lum(b));
			c
		}
		BlendMode::Saturation => {
			let mut c = b;
			set_sat(&mut c, sat(s));
			set_lum(&mut c, lum(b));
			c
		}
		BlendMode::Color => {
			let mut c = s;
			set_lum(&mut c, lum(b));
			c
		}
		BlendMode::Luminosity => {
			let mut c = b;
			set_lum(&mut c, lum(s));
			c
		}
		_ => return source,
	};

	from_unit(mixed)
}
