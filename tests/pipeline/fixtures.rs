use sprack::prelude::*;
use sprack::sprack_types::file::ase::{CelRecord, FileBuilder, FrameBuilder, LayerRecord, TagRecord, TilesetRecord};

pub(crate) const RED: Rgba = Rgba::rgb(255, 0, 0);
pub(crate) const GREEN: Rgba = Rgba::rgb(0, 255, 0);

/// A 4x2 indexed walk cycle: four frames, the last one repeating the first,
/// with a "walk" and an "idle" tag.
pub(crate) fn walk_cycle() -> Vec<u8> {
	let first = FrameBuilder::new(100)
		.palette(&[Rgba::transparent(), RED, GREEN])
		.layer(LayerRecord::image("body"))
		.layer(LayerRecord::image("shadow"))
		.tags(&[TagRecord::new("walk", 0, 3).direction(LoopDirection::PingPong), TagRecord::new("idle", 0, 0)])
		.user_data(Some("loops"), None)
		.cel(CelRecord::raw(0, 0, 0, 2, 1, vec![1, 2]));

	FileBuilder::new(4, 2, ColorDepth::Indexed)
		.color_count(3)
		.frame(first)
		.frame(FrameBuilder::new(120).cel(CelRecord::raw(0, 1, 0, 2, 1, vec![1, 2])))
		.frame(FrameBuilder::new(140).cel(CelRecord::raw(0, 2, 1, 2, 1, vec![2, 0])))
		.frame(FrameBuilder::new(160).cel(CelRecord::linked(0, 0)))
		.to_bytes()
		.unwrap()
}

/// A 4x4 RGBA map with one 2x2 tileset and a ground layer that scrolls.
pub(crate) fn scrolling_map() -> Vec<u8> {
	let tiles: Vec<u8> = [[0u8; 16].to_vec(), [255, 0, 0, 255].repeat(4), [0, 255, 0, 255].repeat(4)].concat();

	FileBuilder::new(4, 4, ColorDepth::Rgba)
		.frame(
			FrameBuilder::new(100)
				.tileset(TilesetRecord::new(7, "terrain", 2, 2, 3, tiles))
				.layer(LayerRecord::tilemap("ground", 7))
				.layer(LayerRecord::image("hero"))
				.cel(CelRecord::tilemap(0, 0, 0, 2, 2, vec![1, 2, 2, 1]))
				.cel(CelRecord::raw(1, 1, 1, 1, 1, vec![0, 0, 255, 255])),
		)
		.frame(FrameBuilder::new(100).cel(CelRecord::tilemap(0, -2, 0, 2, 2, vec![2, 1, 1, 0x8000_0002])))
		.to_bytes()
		.unwrap()
}
