//! Image cleanup before OCR: grayscale, a light blur to drop scanner noise,
//! then an Otsu threshold so text ends up black on white.

use image::{imageops, DynamicImage, GrayImage, Luma};

/// Roughly the spread of a 5x5 Gaussian kernel.
pub const BLUR_SIGMA: f32 = 1.1;

pub fn prepare(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let blurred = imageops::blur(&gray, BLUR_SIGMA);
    let level = otsu_level(&blurred);
    binarize(&blurred, level)
}

/// Threshold that maximises between-class variance of the histogram.
/// A single-tone image yields 0.
pub fn otsu_level(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for Luma([v]) in image.pixels() {
        histogram[*v as usize] += 1;
    }

    let total = (image.width() as u64 * image.height() as u64) as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut weight_bg = 0.0;
    let mut sum_bg = 0.0;
    let mut best = (0u8, 0.0f64);
    for (level, &count) in histogram.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += level as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let between = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
        if between > best.1 {
            best = (level as u8, between);
        }
    }
    best.0
}

/// Pixels above `level` become white, the rest black.
pub fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let mut out = image.clone();
    for Luma([v]) in out.pixels_mut() {
        *v = if *v > level { 255 } else { 0 };
    }
    out
}
