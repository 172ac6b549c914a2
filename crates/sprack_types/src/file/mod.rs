//! File format support for `sprack`.

mod error;

pub mod ase;
pub mod reader;

// Re-export unified error type
pub use error::AseError;

// Re-export main file types
pub use ase::{ColorDepth, Document as AseDocument, FileBuilder as AseFileBuilder, Header as AseHeader};
pub use reader::BinaryReader;
