use sprack::prelude::*;

use crate::fixtures::scrolling_map;

#[test_log::test]
fn test_tileset_texture() {
	let doc: Document = Document::from_bytes(&scrolling_map()).unwrap();
	let texture = build_tileset_texture(&doc.tilesets()[0]);

	assert_eq!(texture.name, "terrain");
	assert_eq!((texture.width, texture.height), (2, 6));
	assert!(texture.pixels[..4].iter().all(|p| p.is_transparent()));
	assert_eq!(texture.pixels[4], Rgba::rgb(255, 0, 0));
	assert_eq!(texture.pixels[8], Rgba::rgb(0, 255, 0));
}

#[test_log::test]
fn test_animated_tilemap() {
	let doc: Document = Document::from_bytes(&scrolling_map()).unwrap();
	let animated = build_animated_tilemap(&doc, &ProcessorOptions::default()).unwrap();

	assert_eq!(animated.tilesets.len(), 1);
	assert_eq!(animated.frames.len(), 2);

	let first = &animated.frames[0].layers;
	assert_eq!(first.len(), 1);
	assert_eq!(first[0].name, "ground");
	assert_eq!(first[0].tileset, 0);
	assert_eq!(first[0].tiles.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 2, 1]);

	let second = &animated.frames[1].layers[0];
	assert_eq!(second.offset, (-2, 0));
	assert!(second.tiles[3].flip_x);
	assert_eq!(second.tiles[3].id, 2);
}

#[test_log::test]
fn test_tilemap_cels_are_not_flattened() {
	let doc: Document = Document::from_bytes(&scrolling_map()).unwrap();
	let pixels = flatten_frame(&doc, 0, &ProcessorOptions::default()).unwrap();

	assert_eq!(pixels.iter().filter(|p| !p.is_transparent()).count(), 1);
	assert_eq!(pixels[4 + 1], Rgba::rgb(0, 0, 255));
}

#[test_log::test]
fn test_single_frame_tilemap_json() {
	let doc: Document = Document::from_bytes(&scrolling_map()).unwrap();
	let map = build_tilemap(&doc, 1, &ProcessorOptions::default()).unwrap();
	let json = serde_json::to_value(&map.layers).unwrap();

	assert_eq!(json[0]["columns"], 2);
	assert_eq!(json[0]["tiles"][3]["flip_x"], true);
}
