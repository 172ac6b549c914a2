//! End-to-end tests: build a document, decode it and export assets from it.

mod fixtures;
mod sheet;
mod tilemap;
