//! Thread-local scratch buffers for the tile rendering pipeline.
//!
//! Each tile draw needs a density grid and, for raster output, an RGBA
//! pixel buffer. Rather than allocating fresh `Vec`s per draw, buffers are
//! cached per-thread and reused across requests. Thread-local storage keeps
//! concurrent tile draws free of contention: each worker thread owns its
//! scratch, which matches the one-draw-per-task concurrency model.
//!
//! Buffers are cleared before reuse, so callers always see zeroed scratch.

use std::cell::RefCell;

/// Cells in the default 256x256 tile.
const TILE_256: usize = 256 * 256;

// Thread-local density accumulation buffer (f64 per cell).
thread_local! {
    static DENSITY_BUFFER: RefCell<Vec<f64>> = RefCell::new(Vec::with_capacity(TILE_256));
}

// Thread-local pixel buffer (RGBA, 4 bytes per pixel).
thread_local! {
    static PIXEL_BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(TILE_256 * 4));
}

// Thread-local scanline buffer for PNG encoding.
thread_local! {
    static SCANLINE_BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(TILE_256 * 4 + 256));
}

/// Run `f` with a zeroed `tile_size * tile_size` density buffer.
#[inline]
pub fn with_density_buffer<F, R>(tile_size: usize, f: F) -> R
where
    F: FnOnce(&mut [f64]) -> R,
{
    DENSITY_BUFFER.with(|buf| {
        let mut buf = buf.borrow_mut();
        let size = tile_size * tile_size;
        if buf.len() < size {
            buf.resize(size, 0.0);
        }
        buf[..size].fill(0.0);
        f(&mut buf[..size])
    })
}

/// Run `f` with a zeroed RGBA pixel buffer, returning the filled pixels as
/// an owned `Vec`. The pooled buffer is replaced, so the returned vector is
/// independent of later draws on this thread.
#[inline]
pub fn take_pixel_buffer<F>(width: usize, height: usize, f: F) -> Vec<u8>
where
    F: FnOnce(&mut [u8]),
{
    PIXEL_BUFFER.with(|buf| {
        let mut buf = buf.borrow_mut();
        let size = width * height * 4;
        buf.resize(size, 0);
        buf[..size].fill(0);

        f(&mut buf[..size]);

        std::mem::replace(&mut *buf, Vec::with_capacity(size))
    })
}

/// Run `f` with an empty scanline buffer sized for a `width x height` RGBA
/// image (one filter byte per row).
#[inline]
pub fn with_scanline_buffer<F, R>(width: usize, height: usize, f: F) -> R
where
    F: FnOnce(&mut Vec<u8>) -> R,
{
    SCANLINE_BUFFER.with(|buf| {
        let mut buf = buf.borrow_mut();
        buf.clear();
        let size = height * (1 + width * 4);
        if buf.capacity() < size {
            let additional = size - buf.capacity();
            buf.reserve(additional);
        }
        f(&mut buf)
    })
}
