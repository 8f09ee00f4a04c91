mod common;

use common::{init_logging, noise, vertical_stripes, BLUE, RED};
use pixelstage::filters::{Convolution, Grayscale, Smooth};
use pixelstage::{convolve, map_pixels, Filter, FilterError, FilterKind, ImageBuffer, Kernel, Pipeline};

/// Straightforward convolution over the raw bytes, evaluated bottom-right first.
fn reference_convolve_reversed(image: &ImageBuffer, weights: &[f64], factor: f64, bias: f64) -> Vec<u8> {
    let (w, h) = (image.width(), image.height());
    let side = (weights.len() as f64).sqrt() as usize;
    let half = (side / 2) as isize;
    let src = image.as_bytes();
    let mut out = vec![0u8; src.len()];

    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let mut acc = [0.0f64; 3];
            for ky in 0..side {
                let py = (y as isize + ky as isize - half).clamp(0, h as isize - 1) as usize;
                for kx in 0..side {
                    let px = (x as isize + kx as isize - half).clamp(0, w as isize - 1) as usize;
                    let idx = (py * w + px) * 4;
                    let wt = weights[ky * side + kx];
                    for c in 0..3 {
                        acc[c] += src[idx + c] as f64 * wt;
                    }
                }
            }
            let i = (y * w + x) * 4;
            for c in 0..3 {
                out[i + c] = (acc[c] * factor + bias).clamp(0.0, 255.0).round_ties_even() as u8;
            }
            out[i + 3] = 255;
        }
    }
    out
}

#[test]
fn convolve_matches_reverse_order_evaluation() {
    init_logging();
    let image = noise(13, 9, 7);
    let cases: [(Vec<f64>, f64, f64); 3] = [
        (vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0], 1.0, 0.0),
        (vec![1.0; 9], 1.0 / 9.0, 0.0),
        ((0..25).map(|i| (i % 7) as f64 - 3.0).collect(), 0.25, 40.0),
    ];

    for (weights, factor, bias) in cases {
        let kernel = Kernel::new(weights.clone())
            .unwrap()
            .with_factor(factor)
            .with_bias(bias);
        let engine = convolve(&image, &kernel);
        let reference = reference_convolve_reversed(&image, &weights, factor, bias);
        assert_eq!(engine.as_bytes(), &reference[..]);
    }
}

#[test]
fn extreme_transforms_stay_in_byte_range() {
    let mut image = noise(8, 8, 3);
    let before = image.as_bytes().to_vec();
    map_pixels(&mut image, |[r, g, b], i| {
        if i % 2 == 0 {
            [r * 1e6, -g * 1e6, b]
        } else {
            [-r, g + 1e9, f64::INFINITY]
        }
    });
    for (i, (px, orig)) in image.as_bytes().chunks(4).zip(before.chunks(4)).enumerate() {
        if i % 2 == 0 {
            assert_eq!(px[0], if orig[0] == 0 { 0 } else { 255 });
            assert_eq!(px[1], 0);
            assert_eq!(px[2], orig[2]);
        } else {
            assert_eq!(&px[..3], &[0, 255, 255]);
        }
        assert_eq!(px[3], orig[3]);
    }

    let kernel = Kernel::new(vec![1000.0; 9]).unwrap().with_bias(-1e7);
    let out = convolve(&noise(5, 5, 11), &kernel);
    assert!(out.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn one_pixel_image_scales_by_kernel_sum() {
    let image = ImageBuffer::filled(1, 1, [10, 20, 30, 0]).unwrap();

    // 5x5 integer weights summing to 24.
    let weights: Vec<f64> = (0..25).map(|i| (i % 3) as f64).collect();
    let sum: f64 = weights.iter().sum();
    let (factor, bias) = (0.5, 3.0);
    let kernel = Kernel::new(weights).unwrap().with_factor(factor).with_bias(bias);

    let out = convolve(&image, &kernel);
    let expected = [10.0f64, 20.0, 30.0].map(|v| (v * sum * factor + bias).clamp(0.0, 255.0).round_ties_even() as u8);
    assert_eq!(out.pixel(0, 0), Some([expected[0], expected[1], expected[2], 255]));

    let single = Kernel::new(vec![2.0]).unwrap().with_bias(-5.0);
    assert_eq!(convolve(&image, &single).pixel(0, 0), Some([15, 35, 55, 255]));
}

#[test]
fn smooth_fixes_uniform_color() {
    for color in [[0, 0, 0, 255], [255, 255, 255, 255], [17, 203, 96, 255], [128, 64, 32, 255]] {
        let mut image = ImageBuffer::filled(9, 6, color).unwrap();
        Smooth::default().apply(&mut image).unwrap();
        assert!(image.as_bytes().chunks(4).all(|p| p == color), "{color:?}");
    }
}

#[test]
fn grayscale_is_idempotent() {
    for seed in [1, 42, 999] {
        let mut once = noise(16, 16, seed);
        Grayscale::default().apply(&mut once).unwrap();
        let mut twice = once.clone();
        Grayscale::default().apply(&mut twice).unwrap();
        assert_eq!(once, twice, "seed {seed}");
    }
}

#[test]
fn grayscale_matches_f64_luma_with_half_to_even() {
    let mut data = Vec::new();
    for r in (0..=255u32).step_by(5) {
        for g in (0..=255u32).step_by(15) {
            for b in (0..=255u32).step_by(5) {
                data.extend_from_slice(&[r as u8, g as u8, b as u8, 200]);
            }
        }
    }
    // Halfway lumas: 0.114 * 250 = 28.5, 0.587 * 90 + 0.114 * 155 = 70.5.
    data.extend_from_slice(&[0, 0, 250, 200, 0, 90, 155, 200]);
    let count = data.len() / 4;
    let mut image = ImageBuffer::from_rgba(count, 1, data.clone()).unwrap();

    Grayscale::default().apply(&mut image).unwrap();

    for (px, src) in image.as_bytes().chunks(4).zip(data.chunks(4)) {
        let luma = 0.299 * src[0] as f64 + 0.587 * src[1] as f64 + 0.114 * src[2] as f64;
        let expected = luma.clamp(0.0, 255.0).round_ties_even() as u8;
        assert_eq!(px, [expected, expected, expected, 200], "rgb {:?}", &src[..3]);
    }
    assert_eq!(image.pixel(count - 2, 0), Some([28, 28, 28, 200]));
    assert_eq!(image.pixel(count - 1, 0), Some([70, 70, 70, 200]));
}

#[test]
fn stage_order_matters_on_chromatic_edges() {
    init_logging();
    let image = vertical_stripes(4, 2, 2, RED, BLUE);

    let mut sharpen_then_gray = Pipeline::new();
    sharpen_then_gray.append(FilterKind::Sharpen);
    sharpen_then_gray.append(FilterKind::Grayscale);

    let mut gray_then_sharpen = Pipeline::new();
    gray_then_sharpen.append(FilterKind::Grayscale);
    gray_then_sharpen.append(FilterKind::Sharpen);

    let mut a = image.clone();
    let mut b = image.clone();
    sharpen_then_gray.run(&mut a).unwrap();
    gray_then_sharpen.run(&mut b).unwrap();

    assert_ne!(a, b);
    // Saturated stripes survive sharpening, then become luma 76 / 29.
    assert_eq!(a.pixel(1, 0), Some([76, 76, 76, 255]));
    assert_eq!(a.pixel(2, 0), Some([29, 29, 29, 255]));
    // Gray edges get overshoot: 5*76 - 3*76 - 29 = 123, 5*29 - 3*29 - 76 < 0.
    assert_eq!(b.pixel(1, 0), Some([123, 123, 123, 255]));
    assert_eq!(b.pixel(2, 0), Some([0, 0, 0, 255]));
}

#[test]
fn length_eight_kernel_is_rejected() {
    assert_eq!(
        Kernel::new(vec![1.0; 8]).unwrap_err(),
        FilterError::MalformedKernel { len: 8 }
    );

    let mut image = noise(4, 4, 5);
    let before = image.clone();
    let err = Convolution::new(vec![1.0; 8]).apply(&mut image).unwrap_err();
    assert_eq!(err, FilterError::MalformedKernel { len: 8 });
    assert_eq!(image, before);
}
