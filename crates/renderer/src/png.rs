//! PNG encoding for RGBA tile images.
//!
//! Hand-rolled RGBA PNG (color type 6) on top of `flate2` and `crc32fast`;
//! heat tiles compress well with the fast deflate setting and need no
//! palette machinery.

use crate::buffer_pool::with_scanline_buffer;
use heatmap_common::{HeatError, HeatResult};
use std::io::Write;

/// Encode RGBA pixel data (4 bytes per pixel, row-major) as a PNG.
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> HeatResult<Vec<u8>> {
    if pixels.len() != width * height * 4 {
        return Err(HeatError::EncodingError(format!(
            "pixel buffer is {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            width * height * 4,
            width,
            height
        )));
    }

    let mut png = Vec::with_capacity(pixels.len() / 4);

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| HeatError::EncodingError(format!("IDAT compression failed: {e}")))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Deflate RGBA scanlines for the IDAT chunk: each row is a filter byte
/// (0 = none) followed by `width * 4` pixel bytes.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    with_scanline_buffer(width, height, |uncompressed| {
        for y in 0..height {
            uncompressed.push(0); // filter type: none
            let row_start = y * width * 4;
            uncompressed.extend_from_slice(&pixels[row_start..row_start + width * 4]);
        }

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder.write_all(uncompressed)?;
        encoder.finish()
    })
}

/// Write one PNG chunk: length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
