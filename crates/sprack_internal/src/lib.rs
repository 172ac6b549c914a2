//! This module is separated into its own crate to enable simple dynamic linking for `sprack`, and should not be used directly.

/// `use sprack::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use sprack_render;
pub use sprack_types;

// Re-export commonly used types at crate root
pub use sprack_render::{BuildError, ProcessorOptions};
pub use sprack_types::file::ase::Document;
pub use sprack_types::file::AseError;
