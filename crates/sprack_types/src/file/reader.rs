//! Position-tracking little-endian reader.
//!
//! [`BinaryReader`] wraps any seekable byte source and exposes the primitive
//! reads the sprite document format is built from. It knows nothing about the
//! format itself. Every read either returns the full value or fails with
//! [`AseError::EndOfInput`]; a truncated source never yields zeroes.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use flate2::read::DeflateDecoder;

use crate::file::AseError;

/// Size of the zlib header that precedes every deflate stream in the format.
const ZLIB_HEADER_SIZE: usize = 2;

/// Little-endian reader over a seekable byte source.
#[derive(Debug)]
pub struct BinaryReader<R> {
	inner: R,
	position: u64,
	length: Option<u64>,
}

impl<R: Read + Seek> BinaryReader<R> {
	/// Wraps a byte source positioned at offset 0.
	pub fn new(inner: R) -> Self {
		Self {
			inner,
			position: 0,
			length: None,
		}
	}

	/// Returns the current offset from the start of the source.
	#[inline]
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Returns the total length of the source in bytes.
	pub fn stream_len(&mut self) -> Result<u64, AseError> {
		if let Some(length) = self.length {
			return Ok(length);
		}
		let length = self.inner.seek(SeekFrom::End(0))?;
		self.inner.seek(SeekFrom::Start(self.position))?;
		self.length = Some(length);
		Ok(length)
	}

	/// Moves to an absolute offset, failing if it lies past the end of the source.
	pub fn seek(&mut self, position: u64) -> Result<(), AseError> {
		if position > self.stream_len()? {
			return Err(AseError::EndOfInput {
				position: self.position,
				requested: position.saturating_sub(self.position) as usize,
			});
		}
		self.inner.seek(SeekFrom::Start(position))?;
		self.position = position;
		Ok(())
	}

	/// Skips `count` bytes, failing if the source ends first.
	pub fn skip(&mut self, count: usize) -> Result<(), AseError> {
		self.read_bytes(count).map(|_| ())
	}

	/// Fills `buf` completely.
	pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), AseError> {
		match self.inner.read_exact(buf) {
			Ok(()) => {
				self.position += buf.len() as u64;
				Ok(())
			}
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
				// read_exact leaves the stream position unspecified on failure
				self.inner.seek(SeekFrom::Start(self.position))?;
				Err(AseError::EndOfInput {
					position: self.position,
					requested: buf.len(),
				})
			}
			Err(e) => Err(e.into()),
		}
	}

	/// Reads a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], AseError> {
		let mut buf = [0u8; N];
		self.read_exact(&mut buf)?;
		Ok(buf)
	}

	/// Reads `len` bytes into a new vector.
	///
	/// The length is not trusted for allocation: bytes are pulled from the
	/// source until `len` is reached or the source ends.
	pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, AseError> {
		let mut buf = Vec::new();
		let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
		if read < len {
			self.inner.seek(SeekFrom::Start(self.position))?;
			return Err(AseError::EndOfInput {
				position: self.position,
				requested: len,
			});
		}
		self.position += len as u64;
		Ok(buf)
	}

	/// Reads an unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8, AseError> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16, AseError> {
		self.read_array().map(u16::from_le_bytes)
	}

	/// Reads a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16, AseError> {
		self.read_array().map(i16::from_le_bytes)
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32, AseError> {
		self.read_array().map(u32::from_le_bytes)
	}

	/// Reads a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32, AseError> {
		self.read_array().map(i32::from_le_bytes)
	}

	/// Reads a string prefixed by its `u16` byte length.
	pub fn read_string(&mut self) -> Result<String, AseError> {
		let len = self.read_u16()? as usize;
		let bytes = self.read_bytes(len)?;
		Ok(String::from_utf8(bytes)?)
	}

	/// Reads `compressed_len` bytes holding a zlib stream and inflates them.
	///
	/// The two-byte zlib header is skipped and the remainder is inflated as a
	/// raw deflate stream. At most `expected_len` bytes are produced; callers
	/// check that enough data came out.
	pub fn read_deflated(
		&mut self,
		compressed_len: usize,
		expected_len: usize,
	) -> Result<Vec<u8>, AseError> {
		let offset = self.position;
		let compressed = self.read_bytes(compressed_len)?;
		if compressed.len() < ZLIB_HEADER_SIZE {
			return Err(AseError::EndOfInput {
				position: offset,
				requested: ZLIB_HEADER_SIZE,
			});
		}

		let mut output = Vec::with_capacity(expected_len.min(compressed_len.saturating_mul(64)));
		DeflateDecoder::new(&compressed[ZLIB_HEADER_SIZE..])
			.take(expected_len as u64)
			.read_to_end(&mut output)
			.map_err(|source| AseError::Decompression {
				offset,
				source,
			})?;

		Ok(output)
	}
}
