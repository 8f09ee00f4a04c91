//! Synthetic RGBA images shared by the integration tests.
#![allow(dead_code)]

use pixelstage::ImageBuffer;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Vertical stripes `stripe` pixels wide, alternating between `a` and `b`.
pub fn vertical_stripes(width: usize, height: usize, stripe: usize, a: [u8; 4], b: [u8; 4]) -> ImageBuffer {
    assert!(stripe > 0, "stripe width must be positive");
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let color = if (x / stripe) % 2 == 0 { a } else { b };
            data.extend_from_slice(&color);
        }
    }
    ImageBuffer::from_rgba(width, height, data).expect("stripe image has valid geometry")
}

/// Deterministic pseudo-random image (xorshift), varied alpha included.
pub fn noise(width: usize, height: usize, seed: u32) -> ImageBuffer {
    let mut state = seed.max(1);
    let data = (0..width * height * 4)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    ImageBuffer::from_rgba(width, height, data).expect("noise image has valid geometry")
}
