//! Unit tests for sprite document decoding

use super::*;
use crate::color::Rgba;
use crate::file::AseError;

const RED: Rgba = Rgba::rgb(255, 0, 0);
const BLUE: Rgba = Rgba::rgb(0, 0, 255);

fn rgba_bytes(colors: &[Rgba]) -> Vec<u8> {
	colors.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
}

/// A 2x2 RGBA document whose first frame already carries a two-color palette.
fn file() -> FileBuilder {
	FileBuilder::new(2, 2, ColorDepth::Rgba).color_count(2)
}

fn first_frame() -> FrameBuilder {
	FrameBuilder::new(100).palette(&[Rgba::rgb(0, 0, 0), Rgba::rgb(255, 255, 255)])
}

fn decode(builder: &FileBuilder) -> Result<Document, AseError> {
	Document::from_bytes(&builder.to_bytes().unwrap())
}

#[test_log::test]
fn test_decode_single_layer() {
	let builder = file().frame(
		first_frame()
			.layer(LayerRecord::image("body").opacity(200).blend_mode(BlendMode::Multiply))
			.cel(CelRecord::raw(0, 1, -1, 1, 2, rgba_bytes(&[RED, BLUE])).opacity(128)),
	);
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.width(), 2);
	assert_eq!(doc.height(), 2);
	assert_eq!(doc.depth(), ColorDepth::Rgba);
	assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());

	let layer = &doc.layers()[0];
	assert_eq!(layer.name(), "body");
	assert_eq!(layer.opacity(), 200);
	assert_eq!(layer.blend_mode(), BlendMode::Multiply);
	assert!(layer.is_visible());

	let frame = &doc.frames()[0];
	assert_eq!(frame.duration(), 100);
	let cel = &frame.cels()[0];
	assert_eq!((cel.x(), cel.y(), cel.opacity()), (1, -1, 128));
	let image = cel.image().unwrap();
	assert_eq!((image.width, image.height), (1, 2));
	assert_eq!(image.pixels, vec![RED, BLUE]);
}

#[test_log::test]
fn test_decoding_is_deterministic() {
	let builder = file().frame(
		first_frame()
			.layer(LayerRecord::image("a"))
			.cel(CelRecord::compressed(0, 0, 0, 2, 1, rgba_bytes(&[RED, BLUE]))),
	);
	let bytes = builder.to_bytes().unwrap();
	let first: Document = Document::from_bytes(&bytes).unwrap();
	let second: Document = Document::from_bytes(&bytes).unwrap();
	assert_eq!(first, second);
}

#[test_log::test]
fn test_compressed_cel_matches_raw_cel() {
	let pixels = rgba_bytes(&[RED, BLUE, BLUE, RED]);
	let raw = decode(&file().frame(
		first_frame().layer(LayerRecord::image("a")).cel(CelRecord::raw(0, 0, 0, 2, 2, pixels.clone())),
	))
	.unwrap();
	let compressed = decode(
		&file().frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::compressed(0, 0, 0, 2, 2, pixels))),
	)
	.unwrap();
	assert_eq!(raw.frames()[0].cels()[0].image(), compressed.frames()[0].cels()[0].image());
}

#[test_log::test]
fn test_decode_into_other_pixel_types() {
	let bytes = file()
		.frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::raw(0, 0, 0, 1, 1, rgba_bytes(&[RED]))))
		.to_bytes()
		.unwrap();

	let arrays: Document<[u8; 4]> = Document::from_bytes(&bytes).unwrap();
	assert_eq!(arrays.frames()[0].cels()[0].image().unwrap().pixels[0], [255, 0, 0, 255]);

	let images: Document<image::Rgba<u8>> = Document::from_bytes(&bytes).unwrap();
	assert_eq!(images.frames()[0].cels()[0].image().unwrap().pixels[0], image::Rgba([255, 0, 0, 255]));
}

#[test_log::test]
fn test_unknown_and_extended_chunks_are_skipped() {
	let builder = file().frame(
		first_frame()
			.raw_chunk(0x7777, vec![1, 2, 3, 4, 5])
			.layer(LayerRecord::image("a"))
			// bytes a newer editor might append to a known chunk
			.pad_last_chunk(&[0xDE, 0xAD, 0xBE, 0xEF])
			.raw_chunk(constants::chunk::COLOR_PROFILE, vec![0; 16])
			.cel(CelRecord::raw(0, 0, 0, 1, 1, rgba_bytes(&[BLUE]))),
	);
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.layers().len(), 1);
	assert_eq!(doc.layers()[0].name(), "a");
	assert_eq!(doc.frames()[0].cels()[0].image().unwrap().pixels, vec![BLUE]);
	assert_eq!(doc.warnings().len(), 2);
	assert!(doc.warnings()[0].contains("0x7777"));
	assert!(doc.warnings()[1].contains("color profile"));
}

#[test_log::test]
fn test_saturated_chunk_count_uses_wide_field() {
	let builder = file().frame(
		first_frame()
			.layer(LayerRecord::image("a"))
			.cel(CelRecord::raw(0, 0, 0, 1, 1, rgba_bytes(&[RED])))
			.saturate_chunk_count(),
	);
	let doc = decode(&builder).unwrap();
	assert_eq!(doc.frames()[0].cels().len(), 1);
}

#[test_log::test]
fn test_user_data_targets_previous_chunk() {
	let green = Rgba::rgb(0, 255, 0);
	let builder = file()
		.frame(
			first_frame()
				.user_data(Some("document"), None)
				.layer(LayerRecord::image("a"))
				.user_data(Some("layer"), Some(green))
				.tileset(TilesetRecord::new(7, "tiles", 1, 1, 1, rgba_bytes(&[RED])))
				.user_data(Some("tileset"), None)
				.slice("hitbox", &[SliceKey {
					frame: 0,
					bounds: Rect::new(0, 0, 1, 1),
					center: None,
					pivot: None,
				}])
				.user_data(Some("slice"), None)
				.cel(CelRecord::raw(0, 0, 0, 1, 1, rgba_bytes(&[RED])))
				.user_data(Some("cel"), None),
		)
		.frame(FrameBuilder::new(100).user_data(Some("orphan"), None));
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.user_data().unwrap().text.as_deref(), Some("document"));
	assert_eq!(doc.layers()[0].user_data().unwrap().text.as_deref(), Some("layer"));
	assert_eq!(doc.layers()[0].user_data().unwrap().color, Some(green));
	assert_eq!(doc.tilesets()[0].user_data().unwrap().text.as_deref(), Some("tileset"));
	assert_eq!(doc.slices()[0].user_data().unwrap().text.as_deref(), Some("slice"));
	assert_eq!(doc.frames()[0].cels()[0].user_data().unwrap().text.as_deref(), Some("cel"));

	assert_eq!(doc.warnings().len(), 1);
	assert!(doc.warnings()[0].contains("frame 1"));
}

#[test_log::test]
fn test_tag_user_data_in_tag_order() {
	let builder = file()
		.frame(
			first_frame()
				.layer(LayerRecord::image("a"))
				.tags(&[
					TagRecord::new("idle", 0, 0).color(Rgba::rgb(1, 1, 1)),
					TagRecord::new("walk", 1, 2).direction(LoopDirection::PingPong),
					TagRecord::new("jump", 2, 2),
				])
				.user_data(Some("first"), None)
				.user_data(None, Some(Rgba::rgb(9, 9, 9))),
		)
		.frame(FrameBuilder::new(100))
		.frame(FrameBuilder::new(100));
	let doc = decode(&builder).unwrap();

	let tags = doc.tags();
	assert_eq!(tags.len(), 3);
	assert_eq!(tags[0].user_data().unwrap().text.as_deref(), Some("first"));
	assert_eq!(tags[0].effective_color(), Rgba::rgb(1, 1, 1));
	assert_eq!(tags[1].effective_color(), Rgba::rgb(9, 9, 9));
	assert_eq!(tags[1].direction(), LoopDirection::PingPong);
	assert!(tags[2].user_data().is_none());
	assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());
}

#[test_log::test]
fn test_group_hierarchy() {
	let builder = file().frame(
		first_frame()
			.layer(LayerRecord::group("body"))
			.layer(LayerRecord::image("legs").child_level(1))
			.layer(LayerRecord::group("upper").child_level(1).hidden())
			.layer(LayerRecord::image("arm").child_level(2))
			.layer(LayerRecord::image("fx")),
	);
	let doc = decode(&builder).unwrap();
	let layers = doc.layers();

	assert_eq!(layers[0].kind(), &LayerKind::Group {
		children: vec![1, 2]
	});
	assert_eq!(layers[2].kind(), &LayerKind::Group {
		children: vec![3]
	});
	assert_eq!(layers[1].parent(), Some(0));
	assert_eq!(layers[3].parent(), Some(2));
	assert_eq!(layers[4].parent(), None);

	assert!(layers[1].is_visible_in_hierarchy(layers));
	assert!(!layers[3].is_visible_in_hierarchy(layers));
	assert!(layers[4].is_visible_in_hierarchy(layers));
	assert_eq!(doc.layer_by_name("arm").map(|(i, _)| i), Some(3));
}

#[test_log::test]
fn test_linked_cels_point_at_original_frame() {
	let builder = file()
		.frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::raw(0, 1, 1, 1, 1, rgba_bytes(&[RED]))))
		.frame(FrameBuilder::new(100).cel(CelRecord::linked(0, 0)))
		.frame(FrameBuilder::new(100).cel(CelRecord::linked(0, 1)));
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.frames()[1].cels()[0].linked_frame(), Some(0));
	assert_eq!(doc.frames()[2].cels()[0].linked_frame(), Some(0));

	let linked = &doc.frames()[2].cels()[0];
	let resolved = doc.resolve_cel(linked).unwrap();
	assert_eq!((resolved.x(), resolved.y()), (1, 1));
	assert_eq!(doc.resolve_image(linked).unwrap().pixels, vec![RED]);
}

#[test_log::test]
fn test_invalid_links_fail() {
	let forward = file()
		.frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::linked(0, 1)))
		.frame(FrameBuilder::new(100));
	assert!(matches!(
		decode(&forward),
		Err(AseError::InvalidLinkedCel {
			frame: 0,
			layer: 0,
			target: 1
		})
	));

	let empty_target = file()
		.frame(first_frame().layer(LayerRecord::image("a")).layer(LayerRecord::image("b")))
		.frame(FrameBuilder::new(100).cel(CelRecord::linked(1, 0)));
	assert!(matches!(decode(&empty_target), Err(AseError::InvalidLinkedCel { .. })));
}

#[test_log::test]
fn test_cel_on_unknown_layer_fails() {
	let builder = file().frame(first_frame().cel(CelRecord::raw(0, 0, 0, 1, 1, rgba_bytes(&[RED]))));
	assert!(matches!(
		decode(&builder),
		Err(AseError::LayerIndexOutOfRange {
			index: 0,
			count: 0
		})
	));
}

#[test_log::test]
fn test_tilemap_layer_and_cel() {
	let tiles = rgba_bytes(&[Rgba::transparent(), Rgba::transparent(), RED, RED, BLUE, BLUE]);
	let builder = file().frame(
		first_frame()
			.tileset(TilesetRecord::new(3, "ground", 1, 2, 3, tiles))
			.layer(LayerRecord::tilemap("map", 3))
			.cel(CelRecord::tilemap(0, 0, 0, 2, 1, vec![1, 0x8000_0002])),
	);
	let doc = decode(&builder).unwrap();

	let tileset = &doc.tilesets()[0];
	assert_eq!(tileset.id(), 3);
	assert!(tileset.tile_zero_is_empty());
	assert_eq!(tileset.tile(1).unwrap(), &[RED, RED]);
	assert_eq!(tileset.tile(2).unwrap(), &[BLUE, BLUE]);
	assert!(tileset.tile(3).is_none());

	assert_eq!(doc.layers()[0].tileset(), Some(0));
	let tilemap = doc.frames()[0].cels()[0].tilemap().unwrap();
	assert_eq!((tilemap.width, tilemap.height, tilemap.bits_per_tile), (2, 1, 32));
	assert_eq!(tilemap.tile(0, 0).unwrap().id, 1);
	let flipped = tilemap.tile(1, 0).unwrap();
	assert_eq!(flipped.id, 2);
	assert!(flipped.flip_x);
	assert!(tilemap.tile(2, 0).is_none());
}

#[test_log::test]
fn test_tileset_problems_fail() {
	let missing = file().frame(first_frame().layer(LayerRecord::tilemap("map", 9)));
	assert!(matches!(
		decode(&missing),
		Err(AseError::MissingTileset {
			tileset_id: 9,
			..
		})
	));

	let external = file().frame(first_frame().tileset(
		TilesetRecord::new(1, "ext", 1, 1, 1, Vec::new()).flags(constants::tileset_flags::EXTERNAL_FILE),
	));
	assert!(matches!(
		decode(&external),
		Err(AseError::ExternalTileset {
			id: 1
		})
	));

	let no_pixels = file().frame(first_frame().tileset(TilesetRecord::new(1, "none", 1, 1, 1, Vec::new()).flags(0)));
	assert!(matches!(
		decode(&no_pixels),
		Err(AseError::MissingTilesetPixels {
			id: 1
		})
	));
}

#[test_log::test]
fn test_degenerate_tile_geometry_fails() {
	// zero-width tiles need no pixel data, so the count alone must be rejected
	let empty_tiles = file().frame(first_frame().tileset(TilesetRecord::new(5, "floor", 0, 2, 0x8000_0001, Vec::new())));
	assert!(matches!(
		decode(&empty_tiles),
		Err(AseError::InvalidTileSize {
			id: 5,
			tile_width: 0,
			..
		})
	));

	let too_tall = file().frame(first_frame().tileset(TilesetRecord::new(6, "tall", 1, 2, u32::MAX / 2 + 1, Vec::new())));
	assert!(matches!(
		decode(&too_tall),
		Err(AseError::InvalidTileSize {
			id: 6,
			..
		})
	));
}

#[test_log::test]
fn test_tilemap_cel_on_image_layer_fails() {
	let builder =
		file().frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::tilemap(0, 0, 0, 1, 1, vec![0])));
	assert!(matches!(decode(&builder), Err(AseError::TilemapCelOnImageLayer(0))));
}

#[test_log::test]
fn test_indexed_document() {
	let palette = [Rgba::rgb(10, 10, 10), Rgba::rgb(20, 20, 20), Rgba::rgb(30, 30, 30)];
	let builder = FileBuilder::new(3, 1, ColorDepth::Indexed).color_count(3).transparent_index(1).frame(
		FrameBuilder::new(100)
			.palette(&palette)
			.layer(LayerRecord::image("a"))
			.cel(CelRecord::raw(0, 0, 0, 3, 1, vec![2, 1, 0])),
	);
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.palette().len(), 3);
	assert_eq!(doc.palette().transparent_index(), 1);
	assert_eq!(doc.frames()[0].cels()[0].image().unwrap().pixels, vec![
		Rgba::rgb(30, 30, 30),
		Rgba::transparent(),
		Rgba::rgb(10, 10, 10)
	]);
	assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());
}

#[test_log::test]
fn test_grayscale_document() {
	let builder = FileBuilder::new(1, 1, ColorDepth::Grayscale)
		.frame(FrameBuilder::new(100).layer(LayerRecord::image("a")).cel(CelRecord::raw(0, 0, 0, 1, 1, vec![77, 255])));
	let doc = decode(&builder).unwrap();
	assert_eq!(doc.frames()[0].cels()[0].image().unwrap().pixels, vec![Rgba::gray(77)]);
}

#[test_log::test]
fn test_header_warnings() {
	let builder = file().flags(0).transparent_index(5).color_count(16).frame(first_frame());
	let doc = decode(&builder).unwrap();

	assert_eq!(doc.palette().transparent_index(), 0);
	let warnings = doc.warnings();
	assert_eq!(warnings.len(), 3, "{warnings:?}");
	assert!(warnings.iter().any(|w| w.contains("Transparent index 5")));
	assert!(warnings.iter().any(|w| w.contains("opacity")));
	assert!(warnings.iter().any(|w| w.contains("16 palette colors")));
}

#[test_log::test]
fn test_multiple_frames_and_durations() {
	let builder = file()
		.frame(first_frame().layer(LayerRecord::image("a")))
		.frame(FrameBuilder::new(50))
		.frame(FrameBuilder::new(250));
	let doc = decode(&builder).unwrap();

	let durations: Vec<u16> = doc.frames().iter().map(Frame::duration).collect();
	assert_eq!(durations, vec![100, 50, 250]);
	assert_eq!(doc.total_duration(), 400);
	assert!(doc.frames()[1].cels().is_empty());
}

#[test_log::test]
fn test_slice_keys() {
	let builder = file().frame(first_frame().slice("button", &[
		SliceKey {
			frame: 0,
			bounds: Rect::new(0, 0, 8, 8),
			center: Some(Rect::new(2, 2, 4, 4)),
			pivot: Some(Point::new(4, 8)),
		},
		SliceKey {
			frame: 3,
			bounds: Rect::new(1, 1, 6, 6),
			center: Some(Rect::new(1, 1, 4, 4)),
			pivot: Some(Point::new(3, 6)),
		},
	]));
	let doc = decode(&builder).unwrap();

	let slice = &doc.slices()[0];
	assert_eq!(slice.name(), "button");
	assert!(slice.is_nine_patch());
	assert!(slice.has_pivot());
	assert_eq!(slice.keys().len(), 2);
	assert_eq!(slice.keys()[1].frame, 3);
	assert_eq!(slice.keys()[1].pivot, Some(Point::new(3, 6)));
}

#[test_log::test]
fn test_fatal_header_problems() {
	let mut bytes = file().frame(first_frame()).to_bytes().unwrap();
	bytes[4] = 0;
	assert!(matches!(Document::<Rgba>::from_bytes(&bytes), Err(AseError::InvalidMagic { .. })));

	let no_frames = file().to_bytes().unwrap();
	assert!(matches!(Document::<Rgba>::from_bytes(&no_frames), Err(AseError::NoFrames)));

	let mut zero_width = file().frame(first_frame()).to_bytes().unwrap();
	zero_width[8] = 0;
	zero_width[9] = 0;
	assert!(matches!(Document::<Rgba>::from_bytes(&zero_width), Err(AseError::InvalidCanvasSize { .. })));
}

#[test_log::test]
fn test_truncated_input_fails() {
	let bytes = file()
		.frame(first_frame().layer(LayerRecord::image("a")).cel(CelRecord::raw(0, 0, 0, 2, 2, rgba_bytes(&[RED; 4]))))
		.to_bytes()
		.unwrap();

	for len in [0, 10, 127, 130, bytes.len() - 1] {
		let result = Document::<Rgba>::from_bytes(&bytes[..len]);
		assert!(matches!(result, Err(AseError::EndOfInput { .. })), "length {len}: {result:?}");
	}
}

#[test_log::test]
fn test_truncated_chunk_padding_fails() {
	let bytes = file().frame(first_frame().layer(LayerRecord::image("a")).pad_last_chunk(&[0; 8])).to_bytes().unwrap();
	assert!(Document::<Rgba>::from_bytes(&bytes).is_ok());

	// every field of the layer is still present, only the trailing bytes are cut
	let result = Document::<Rgba>::from_bytes(&bytes[..bytes.len() - 6]);
	assert!(matches!(result, Err(AseError::EndOfInput { .. })), "{result:?}");
}

#[test_log::test]
fn test_layer_uuids_are_skipped() {
	let flags = constants::FLAG_LAYER_OPACITY_VALID | constants::FLAG_LAYER_UUID;
	let builder = file().flags(flags).frame(
		first_frame()
			.layer(LayerRecord::image("a"))
			.pad_last_chunk(&[7; constants::LAYER_UUID_SIZE])
			.layer(LayerRecord::image("b"))
			.pad_last_chunk(&[9; constants::LAYER_UUID_SIZE]),
	);
	let doc = decode(&builder).unwrap();
	assert_eq!(doc.layers().len(), 2);
	assert_eq!(doc.layers()[1].name(), "b");

	let missing = file().flags(flags).frame(first_frame().layer(LayerRecord::image("a")));
	assert!(matches!(decode(&missing), Err(AseError::EndOfInput { .. })));
}

#[test_log::test]
fn test_bad_frame_magic_fails() {
	let mut bytes = file().frame(first_frame()).to_bytes().unwrap();
	bytes[128 + 4] = 0;
	assert!(matches!(
		Document::<Rgba>::from_bytes(&bytes),
		Err(AseError::InvalidFrameMagic {
			frame: 0,
			..
		})
	));
}
