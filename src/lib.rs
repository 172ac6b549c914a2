#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `sprack` decodes layered, animated pixel-art sprite documents and turns them
//! into game-ready assets: flattened sprites, packed sprite sheets with
//! animation tags, tilemaps and tileset textures.
//!
//! ```no_run
//! use sprack::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! for warning in doc.warnings() {
//!     eprintln!("{warning}");
//! }
//! let sheet = build_sprite_sheet(&doc, "hero", &ProcessorOptions::default())?;
//! sheet.atlas.to_image().save("hero.png")?;
//! # Ok(())
//! # }
//! ```
pub use sprack_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use sprack_dylib;
