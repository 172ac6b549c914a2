use sprack::prelude::*;

use crate::fixtures::{GREEN, RED, walk_cycle};

#[test_log::test]
fn test_walk_cycle_decodes_cleanly() {
	let doc: Document = Document::from_bytes(&walk_cycle()).unwrap();

	assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());
	assert_eq!(doc.frames().len(), 4);
	assert_eq!(doc.total_duration(), 520);
	assert_eq!(doc.tags()[0].user_data().and_then(|u| u.text.as_deref()), Some("loops"));
	assert!(doc.tags()[1].user_data().is_none());
}

#[test_log::test]
fn test_sprite_sheet_merges_repeated_frame() {
	let doc: Document = Document::from_bytes(&walk_cycle()).unwrap();
	let sheet = build_sprite_sheet(&doc, "walk", &ProcessorOptions::default()).unwrap();

	assert_eq!(sheet.atlas.unique_frames(), 3);
	assert_eq!(sheet.atlas.regions[3].duplicate_of, Some(0));
	assert_eq!((sheet.atlas.layout.columns, sheet.atlas.layout.rows), (2, 2));
	assert_eq!((sheet.atlas.width, sheet.atlas.height), (8, 4));

	let walk = &sheet.tags[0];
	assert_eq!(walk.direction, LoopDirection::PingPong);
	assert_eq!(walk.frames.len(), 4);
	assert_eq!(walk.frames[3].region, 0);
	assert_eq!(walk.frames[3].duration, 160);
	assert_eq!(walk.duration(), 520);
	assert_eq!(sheet.tags[1].frames.len(), 1);

	let image = sheet.atlas.to_image();
	assert_eq!(image.get_pixel(0, 0).0, [RED.r, RED.g, RED.b, RED.a]);
	assert_eq!(image.get_pixel(1, 0).0, [GREEN.r, GREEN.g, GREEN.b, GREEN.a]);
}

#[test_log::test]
fn test_sheet_metadata_serializes() {
	let doc: Document = Document::from_bytes(&walk_cycle()).unwrap();
	let sheet = build_sprite_sheet(&doc, "walk", &ProcessorOptions::padded(1, 1, 0)).unwrap();
	let json = serde_json::to_value(sheet.metadata()).unwrap();

	assert_eq!(json["name"], "walk");
	assert_eq!(json["size"], serde_json::json!([sheet.atlas.width, sheet.atlas.height]));
	assert_eq!(json["frames"].as_array().map(Vec::len), Some(4));
	assert_eq!(json["tags"][0]["name"], "walk");
}

#[test_log::test]
fn test_sprite_matches_compositor() {
	let doc: Document = Document::from_bytes(&walk_cycle()).unwrap();
	let options = ProcessorOptions::default();

	for frame in 0..doc.frames().len() {
		let sprite = build_sprite(&doc, frame, &options).unwrap();
		assert_eq!(sprite.pixels, flatten_frame(&doc, frame, &options).unwrap());
	}

	let third = build_sprite(&doc, 2, &options).unwrap();
	// index 0 is the transparent index
	assert_eq!(third.pixels[4 + 2], GREEN);
	assert!(third.pixels[4 + 3].is_transparent());
}

#[test_log::test]
fn test_sprite_png_output() {
	let doc: Document = Document::from_bytes(&walk_cycle()).unwrap();
	let sprite = build_sprite(&doc, 1, &ProcessorOptions::default()).unwrap();

	let path = std::env::temp_dir().join(format!("sprack_pipeline_{}.png", std::process::id()));
	sprite.to_image().save(&path).unwrap();
	let reloaded = image::open(&path).unwrap().into_rgba8();
	std::fs::remove_file(&path).unwrap();

	assert_eq!(reloaded.dimensions(), (4, 2));
	assert_eq!(reloaded.get_pixel(1, 0).0, [255, 0, 0, 255]);
}
