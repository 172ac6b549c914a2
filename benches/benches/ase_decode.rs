//! Benchmark suite for sprite document decoding and export
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sprack_benches::{generate_indexed_document, generate_rgba_document};
use sprack_render::blend::blend;
use sprack_render::{Compositor, ProcessorOptions, build_sprite_sheet};
use sprack_types::color::Rgba;
use sprack_types::file::ase::{BlendMode, Document};
use std::hint::black_box;

/// Benchmark whole-document decoding
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_decode");

	let inputs = [
		("rgba_64x64x8x4", generate_rgba_document(64, 64, 8, 4), 64u64 * 64 * 8 * 4),
		("rgba_256x256x4x2", generate_rgba_document(256, 256, 4, 2), 256 * 256 * 4 * 2),
		("indexed_128x128x8", generate_indexed_document(128, 128, 8), 128 * 128 * 8),
	];

	for (name, data, pixels) in &inputs {
		group.throughput(Throughput::Elements(*pixels));
		group.bench_with_input(BenchmarkId::new("decode", name), data, |b, data| {
			b.iter(|| {
				let result: Result<Document, _> = Document::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark flattening frames
fn bench_flatten(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_flatten");

	for layers in [1u16, 4, 16] {
		let data = generate_rgba_document(128, 128, 1, layers);
		let Ok(doc) = Document::<Rgba>::from_bytes(&data) else {
			eprintln!("Warning: Could not decode synthetic document with {layers} layers");
			continue;
		};

		group.throughput(Throughput::Elements(128 * 128 * u64::from(layers)));
		group.bench_with_input(BenchmarkId::new("layers", layers), &doc, |b, doc| {
			let compositor = Compositor::new(doc);
			b.iter(|| black_box(compositor.flatten(0)));
		});
	}

	group.finish();
}

/// Benchmark the per-pixel blend for separable and non-separable modes
fn bench_blend_modes(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_blend");

	let backdrop: Vec<Rgba> = (0..4096u32).map(|i| Rgba::new(i as u8, (i >> 4) as u8, (i >> 8) as u8, 255)).collect();
	let source: Vec<Rgba> = backdrop.iter().rev().map(|p| Rgba::new(p.b, p.r, p.g, 180)).collect();

	group.throughput(Throughput::Elements(backdrop.len() as u64));
	for mode in [BlendMode::Normal, BlendMode::Multiply, BlendMode::SoftLight, BlendMode::Hue, BlendMode::Luminosity] {
		group.bench_function(format!("{mode:?}"), |b| {
			b.iter(|| {
				let out: Vec<Rgba> =
					backdrop.iter().zip(&source).map(|(&bd, &src)| blend(bd, src, black_box(200), mode)).collect();
				black_box(out)
			});
		});
	}

	group.finish();
}

/// Benchmark packing a sprite sheet
fn bench_sprite_sheet(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_sheet");

	let data = generate_rgba_document(32, 32, 32, 2);
	let Ok(doc) = Document::<Rgba>::from_bytes(&data) else {
		eprintln!("Warning: Could not decode synthetic document for sheet benchmark");
		return;
	};

	for (name, options) in [("default", ProcessorOptions::default()), ("padded", ProcessorOptions::padded(2, 1, 1))] {
		group.bench_with_input(BenchmarkId::new("build", name), &options, |b, options| {
			b.iter(|| black_box(build_sprite_sheet(&doc, "bench", options)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decode, bench_flatten, bench_blend_modes, bench_sprite_sheet);
criterion_main!(benches);
