//! Benchmark helper utilities for sprack
//!
//! This module generates synthetic sprite documents so the benchmarks run
//! without checked-in assets. Every generated document is built with
//! [`FileBuilder`], so it exercises the same chunk layout the editor writes.

use sprack_types::color::Rgba;
use sprack_types::file::ase::{CelRecord, ColorDepth, FileBuilder, FrameBuilder, LayerRecord, TagRecord};

/// Generates an RGBA document with `layers` full-canvas layers per frame.
///
/// Cels are stored compressed. Pixel values depend on frame and layer, so no
/// two frames are identical and duplicate merging finds nothing.
pub fn generate_rgba_document(width: u16, height: u16, frames: u16, layers: u16) -> Vec<u8> {
	let mut builder = FileBuilder::new(width, height, ColorDepth::Rgba);
	for frame in 0..frames {
		let mut chunks = FrameBuilder::new(100);
		if frame == 0 {
			for layer in 0..layers {
				chunks = chunks.layer(LayerRecord::image(&format!("layer {layer}")).opacity(200));
			}
			chunks = chunks.tags(&[TagRecord::new("all", 0, frames.saturating_sub(1))]);
		}
		for layer in 0..layers {
			let data = gradient(width, height, frame, layer);
			chunks = chunks.cel(CelRecord::compressed(layer, 0, 0, width, height, data));
		}
		builder = builder.frame(chunks);
	}
	builder.to_bytes().unwrap_or_default()
}

/// Generates an indexed document with a 256-color palette and one layer.
pub fn generate_indexed_document(width: u16, height: u16, frames: u16) -> Vec<u8> {
	let palette: Vec<Rgba> = (0..=255u8).map(|i| Rgba::rgb(i, i.wrapping_mul(3), i.wrapping_mul(7))).collect();
	let mut builder = FileBuilder::new(width, height, ColorDepth::Indexed).color_count(256);
	for frame in 0..frames {
		let mut chunks = FrameBuilder::new(100);
		if frame == 0 {
			chunks = chunks.palette(&palette).layer(LayerRecord::image("indexed"));
		}
		let data = (0..usize::from(width) * usize::from(height))
			.map(|i| (i + usize::from(frame)) as u8)
			.collect();
		builder = builder.frame(chunks.cel(CelRecord::compressed(0, 0, 0, width, height, data)));
	}
	builder.to_bytes().unwrap_or_default()
}

fn gradient(width: u16, height: u16, frame: u16, layer: u16) -> Vec<u8> {
	let mut data = Vec::with_capacity(usize::from(width) * usize::from(height) * 4);
	for y in 0..height {
		for x in 0..width {
			data.extend_from_slice(&[
				(x.wrapping_add(frame) & 0xFF) as u8,
				(y.wrapping_add(layer * 32) & 0xFF) as u8,
				((x ^ y) & 0xFF) as u8,
				if (x + y + layer) % 5 == 0 { 0 } else { 255 },
			]);
		}
	}
	data
}
