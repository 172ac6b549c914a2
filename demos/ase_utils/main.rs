//! Sprite document CLI utility
//!
//! A command-line tool for inspecting sprite documents and exporting game assets from them.
//!
//! # Features
//!
//! - **info**: Display header, layers, tags, slices and decode warnings
//! - **flatten**: Flatten one frame, or every frame, to PNG images
//! - **sheet**: Pack all frames into a sprite sheet PNG with JSON metadata
//! - **tileset**: Export every tileset as a one-column PNG
//! - **tilemap**: Export tilemap layers as JSON plus their tileset PNGs
//!
//! # Options
//!
//! Builder options come from, in increasing priority:
//!
//! 1. built-in defaults
//! 2. a TOML file passed with `--options`
//! 3. `SPRACK_*` environment variables, e.g. `SPRACK_SPACING=2` or `SPRACK_LAYOUT=horizontal`
//!
//! ```toml
//! only_visible_layers = true
//! include_background_layer = false
//! merge_duplicate_frames = true
//! border_padding = 1
//! spacing = 2
//! inner_padding = 0
//! layout = "square"
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Show document information
//! cargo run --example ase_utils -- info hero.aseprite
//!
//! # Flatten frame 3
//! cargo run --example ase_utils -- flatten hero.aseprite -f 3
//!
//! # Build a padded sprite sheet
//! SPRACK_SPACING=1 cargo run --example ase_utils -- sheet hero.aseprite -o out/
//!
//! # Export tilemaps of every frame
//! cargo run --example ase_utils -- tilemap level.aseprite --animated
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use log::{info, warn};
use serde::Serialize;
use sprack::prelude::*;
use sprack::sprack_render::{TilemapFrame, TilemapLayer};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ase_utils")]
#[command(author = "sprack project")]
#[command(version = "1.0")]
#[command(about = "Sprite document utility - inspect documents and export sprites, sheets and tilemaps", long_about = None)]
struct Cli {
	/// TOML file with builder options
	#[arg(long, global = true, value_name = "OPTIONS_TOML")]
	options: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Display information about a document
	Info {
		/// Input document path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Show per-frame cel information
		#[arg(short, long)]
		detailed: bool,
	},

	/// Flatten frames to PNG images
	Flatten {
		/// Input document path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Frame index to flatten (0-based); all frames when omitted
		#[arg(short, long, value_name = "FRAME")]
		frame: Option<usize>,

		/// Output directory (optional, defaults to `<input>_frames/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},

	/// Pack every frame into a sprite sheet
	Sheet {
		/// Input document path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output directory (optional, defaults to the input's directory)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},

	/// Export tilesets as PNG images
	Tileset {
		/// Input document path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output directory (optional, defaults to the input's directory)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},

	/// Export tilemap layers as JSON
	Tilemap {
		/// Input document path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Frame to export
		#[arg(short, long, value_name = "FRAME", default_value_t = 0)]
		frame: usize,

		/// Export every frame instead of one
		#[arg(short, long)]
		animated: bool,

		/// Output directory (optional, defaults to the input's directory)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},
}

/// Tileset reference stored next to tilemap layers
#[derive(Debug, Serialize)]
struct TilesetMetadata {
	/// Tileset id
	id: u32,
	/// Tileset name
	name: String,
	/// Tile width in pixels
	tile_width: u32,
	/// Tile height in pixels
	tile_height: u32,
	/// Number of tiles
	tile_count: u32,
	/// PNG filename
	image: String,
}

/// Tilemap export written as JSON
#[derive(Debug, Serialize)]
struct TilemapMetadata<'a, T: Serialize> {
	/// Tilesets indexed by the layers
	tilesets: Vec<TilesetMetadata>,
	/// Frame or frames
	#[serde(flatten)]
	content: &'a T,
}

/// Loads options from defaults, an optional TOML file and the environment
fn load_options(path: Option<&Path>) -> Result<ProcessorOptions> {
	let mut builder = Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(File::from(path).required(true));
	}
	let options = builder
		.add_source(Environment::with_prefix("SPRACK").try_parsing(true))
		.build()
		.context("Failed to read builder options")?
		.try_deserialize()
		.context("Invalid builder options")?;
	Ok(options)
}

/// Opens a document and logs its warnings
fn open_document(path: &Path) -> Result<Document> {
	let doc: Document = Document::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
	for warning in doc.warnings() {
		warn!("{}: {warning}", path.display());
	}
	Ok(doc)
}

/// Returns the output directory, creating it if needed
fn output_dir(input: &Path, output: Option<PathBuf>, suffix: &str) -> Result<PathBuf> {
	let dir = match output {
		Some(dir) => dir,
		None if suffix.is_empty() => input.parent().map(Path::to_path_buf).unwrap_or_default(),
		None => input.with_file_name(format!("{}{suffix}", stem(input))),
	};
	if !dir.as_os_str().is_empty() {
		fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;
	}
	Ok(dir)
}

fn stem(path: &Path) -> String {
	path.file_stem().map_or_else(|| "sprite".to_string(), |s| s.to_string_lossy().into_owned())
}

/// Handle info command
fn handle_info(input: &Path, detailed: bool) -> Result<()> {
	let doc = open_document(input)?;

	println!("{doc}");
	println!("Palette: {}", doc.palette());
	println!("Total duration: {} ms", doc.total_duration());

	println!("\nLayers:");
	for (index, layer) in doc.layers().iter().enumerate() {
		println!("  [{index:2}] {layer}");
	}

	if !doc.tags().is_empty() {
		println!("\nTags:");
		for tag in doc.tags() {
			println!("  {tag}");
		}
	}

	if !doc.slices().is_empty() {
		println!("\nSlices:");
		for slice in doc.slices() {
			println!("  {} ({} keys{})", slice.name(), slice.keys().len(), if slice.is_nine_patch() { ", 9-patch" } else { "" });
		}
	}

	if !doc.tilesets().is_empty() {
		println!("\nTilesets:");
		for tileset in doc.tilesets() {
			println!("  {tileset}");
		}
	}

	if detailed {
		println!("\nFrames:");
		for (index, frame) in doc.frames().iter().enumerate() {
			println!("  Frame {index:3}: {} ms, {} cels", frame.duration(), frame.cels().len());
			for cel in frame.cels() {
				let kind = match cel.content() {
					CelContent::Image(_) => "image".to_string(),
					CelContent::Linked {
						frame,
					} => format!("linked -> frame {frame}"),
					CelContent::Tilemap(_) => "tilemap".to_string(),
				};
				println!(
					"    layer {:2} at ({}, {}) opacity {:3} z {:2}: {kind}",
					cel.layer(),
					cel.x(),
					cel.y(),
					cel.opacity(),
					cel.z_index()
				);
			}
		}
	}

	if !doc.warnings().is_empty() {
		println!("\n⚠ {} warnings", doc.warnings().len());
	}
	Ok(())
}

/// Handle flatten command
fn handle_flatten(input: &Path, frame: Option<usize>, output: Option<PathBuf>, options: &ProcessorOptions) -> Result<()> {
	let doc = open_document(input)?;
	let dir = output_dir(input, output, "_frames")?;

	let frames: Vec<usize> = match frame {
		Some(index) if index >= doc.frames().len() => {
			bail!("Frame {index} out of range, document has {} frames", doc.frames().len())
		}
		Some(index) => vec![index],
		None => (0..doc.frames().len()).collect(),
	};

	for index in frames {
		let sprite = build_sprite(&doc, index, options)?;
		let path = dir.join(format!("frame_{index:03}.png"));
		sprite.to_image().save(&path).with_context(|| format!("Cannot write {}", path.display()))?;
		info!("Frame {index:3}: {}x{} {} ms -> {}", sprite.width, sprite.height, sprite.duration, path.display());
	}
	Ok(())
}

/// Handle sheet command
fn handle_sheet(input: &Path, output: Option<PathBuf>, options: &ProcessorOptions) -> Result<()> {
	let doc = open_document(input)?;
	let dir = output_dir(input, output, "")?;
	let name = stem(input);

	let sheet = build_sprite_sheet(&doc, &name, options)?;

	let image_path = dir.join(format!("{name}.png"));
	sheet.atlas.to_image().save(&image_path).with_context(|| format!("Cannot write {}", image_path.display()))?;

	let json_path = dir.join(format!("{name}.json"));
	fs::write(&json_path, serde_json::to_string_pretty(&sheet.metadata())?)?;

	info!(
		"Packed {} frames ({} unique) into {}x{} -> {}",
		sheet.atlas.regions.len(),
		sheet.atlas.unique_frames(),
		sheet.atlas.width,
		sheet.atlas.height,
		image_path.display()
	);
	for tag in &sheet.tags {
		info!("  {}: {} frames, {} ms", tag.name, tag.frames.len(), tag.duration());
	}
	Ok(())
}

/// Writes every tileset texture and returns their metadata
fn write_tilesets(textures: &[TilesetTexture<Rgba>], dir: &Path, name: &str) -> Result<Vec<TilesetMetadata>> {
	textures
		.iter()
		.map(|texture| {
			let image = format!("{name}_tileset_{}.png", texture.id);
			let path = dir.join(&image);
			texture.to_image().save(&path).with_context(|| format!("Cannot write {}", path.display()))?;
			info!("Tileset {} '{}': {} tiles -> {}", texture.id, texture.name, texture.tile_count, path.display());
			Ok(TilesetMetadata {
				id: texture.id,
				name: texture.name.clone(),
				tile_width: texture.tile_width,
				tile_height: texture.tile_height,
				tile_count: texture.tile_count,
				image,
			})
		})
		.collect()
}

/// Handle tileset command
fn handle_tileset(input: &Path, output: Option<PathBuf>) -> Result<()> {
	let doc = open_document(input)?;
	if doc.tilesets().is_empty() {
		println!("⚠ No tilesets to export");
		return Ok(());
	}
	let dir = output_dir(input, output, "")?;
	let textures: Vec<_> = doc.tilesets().iter().map(build_tileset_texture).collect();
	write_tilesets(&textures, &dir, &stem(input))?;
	Ok(())
}

/// Handle tilemap command
fn handle_tilemap(
	input: &Path,
	frame: usize,
	animated: bool,
	output: Option<PathBuf>,
	options: &ProcessorOptions,
) -> Result<()> {
	let doc = open_document(input)?;
	let dir = output_dir(input, output, "")?;
	let name = stem(input);
	let json_path = dir.join(format!("{name}_tilemap.json"));

	let json = if animated {
		let tilemap = build_animated_tilemap(&doc, options)?;
		let tilesets = write_tilesets(&tilemap.tilesets, &dir, &name)?;
		#[derive(Serialize)]
		struct Frames<'a> {
			frames: &'a [TilemapFrame],
		}
		serde_json::to_string_pretty(&TilemapMetadata {
			tilesets,
			content: &Frames {
				frames: &tilemap.frames,
			},
		})?
	} else {
		let tilemap = build_tilemap(&doc, frame, options)?;
		let tilesets = write_tilesets(&tilemap.tilesets, &dir, &name)?;
		#[derive(Serialize)]
		struct Layers<'a> {
			frame: usize,
			layers: &'a [TilemapLayer],
		}
		serde_json::to_string_pretty(&TilemapMetadata {
			tilesets,
			content: &Layers {
				frame: tilemap.frame,
				layers: &tilemap.layers,
			},
		})?
	};

	fs::write(&json_path, json)?;
	info!("Tilemap -> {}", json_path.display());
	Ok(())
}

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let options = load_options(cli.options.as_deref())?;

	match cli.command {
		Commands::Info {
			input,
			detailed,
		} => handle_info(&input, detailed),
		Commands::Flatten {
			input,
			frame,
			output,
		} => handle_flatten(&input, frame, output, &options),
		Commands::Sheet {
			input,
			output,
		} => handle_sheet(&input, output, &options),
		Commands::Tileset {
			input,
			output,
		} => handle_tileset(&input, output),
		Commands::Tilemap {
			input,
			frame,
			animated,
			output,
		} => handle_tilemap(&input, frame, animated, output, &options),
	}
}
