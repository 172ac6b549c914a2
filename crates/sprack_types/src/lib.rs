//! This crate provides core data types and file format support for the `sprack` project.
//!
//! # File Formats
//!
//! - **Sprite documents**: layered, animated pixel-art documents (`.aseprite` / `.ase`)
//!   with palettes, tags, slices, tilesets and user data
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use sprack_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! println!("{doc}");
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use sprack_types::file::ase::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document<[u8; 4]> = Document::open("hero.aseprite")?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod file;

/// `use sprack_types::prelude::*;` to import commonly used items.
pub mod prelude;
