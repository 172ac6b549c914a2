//! Prelude module for `sprack_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use sprack_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: Document = Document::open("hero.aseprite")?;
//! let sheet = build_sprite_sheet(&doc, "hero", &ProcessorOptions::default())?;
//! sheet.atlas.to_image().save("hero.png")?;
//! # Ok(())
//! # }
//! ```

// Re-export everything from sprack_render::prelude, which includes sprack_types::prelude
#[doc(inline)]
pub use sprack_render::prelude::*;

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use sprack_render;
#[doc(inline)]
pub use sprack_types;
