use image::{DynamicImage, RgbImage};

use crate::error::{LeafHealthError, Result};
use crate::features::config::{ExtractorConfig, MAX_SIZE};
use crate::features::feature_vector::FeatureVector;

/// ITU-R BT.601 luma weights for R, G, B.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Extracts features with the default config (256×256, bicubic).
pub fn extract(image: &DynamicImage) -> Result<FeatureVector> {
    extract_with(image, &ExtractorConfig::default())
}

/// Resamples `image` to `config.size`² RGB, then computes channel means,
/// population standard deviations, the greenness / yellow ratios and the
/// luma gradient energy.
///
/// # Errors
/// `InvalidImage` if the image has a zero dimension, `config.size < 2`
/// (a 1-pixel raster has no neighbours to take gradients over), or
/// `config.size > MAX_SIZE`.
pub fn extract_with(image: &DynamicImage, config: &ExtractorConfig) -> Result<FeatureVector> {
    if image.width() == 0 || image.height() == 0 {
        return Err(LeafHealthError::InvalidImage(format!(
            "image has zero size ({}x{})",
            image.width(),
            image.height()
        )));
    }
    if config.size < 2 {
        return Err(LeafHealthError::InvalidImage(format!(
            "extraction size must be at least 2, got {}",
            config.size
        )));
    }
    if config.size > MAX_SIZE {
        return Err(LeafHealthError::InvalidImage(format!(
            "extraction size must be at most {}, got {}",
            MAX_SIZE, config.size
        )));
    }

    log::trace!(
        "resampling {}x{} image to {}x{} with {:?}",
        image.width(), image.height(), config.size, config.size, config.filter
    );
    let resized = image.resize_exact(config.size, config.size, config.filter.into());
    let features = features_from_rgb(&resized.to_rgb8());

    log::debug!("extracted features: {:?}", features);
    Ok(features)
}

/// Computes the feature vector directly on an RGB raster, without
/// resampling.  The raster must be at least 2×2.
pub(crate) fn features_from_rgb(rgb: &RgbImage) -> FeatureVector {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let n = (width * height) as f64;

    // Normalized channel planes, row-major.
    let mut planes: [Vec<f64>; 3] = [
        Vec::with_capacity(width * height),
        Vec::with_capacity(width * height),
        Vec::with_capacity(width * height),
    ];
    for pixel in rgb.pixels() {
        for (plane, &c) in planes.iter_mut().zip(pixel.0.iter()) {
            plane.push(c as f64 / 255.0);
        }
    }

    let means: Vec<f64> = planes.iter().map(|p| p.iter().sum::<f64>() / n).collect();
    let stds: Vec<f64> = planes.iter().zip(means.iter())
        .map(|(p, &m)| (p.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / n).sqrt())
        .collect();
    let (mean_r, mean_g, mean_b) = (means[0], means[1], means[2]);

    let luma: Vec<f64> = (0..width * height)
        .map(|i| {
            LUMA_WEIGHTS[0] * planes[0][i]
                + LUMA_WEIGHTS[1] * planes[1][i]
                + LUMA_WEIGHTS[2] * planes[2][i]
        })
        .collect();

    FeatureVector {
        mean_r,
        mean_g,
        mean_b,
        std_r: stds[0],
        std_g: stds[1],
        std_b: stds[2],
        greenness: mean_g - 0.5 * (mean_r + mean_b),
        yellow_score: (mean_r + mean_g) / 2.0 - mean_b,
        edge_energy: edge_energy(&luma, width, height),
    }
}

/// Average of the horizontal and vertical mean absolute luma differences.
fn edge_energy(luma: &[f64], width: usize, height: usize) -> f64 {
    let mut horizontal = 0.0;
    for row in luma.chunks_exact(width) {
        horizontal += row.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>();
    }
    let horizontal = horizontal / (height * (width - 1)) as f64;

    let mut vertical = 0.0;
    for (upper, lower) in luma.chunks_exact(width).zip(luma.chunks_exact(width).skip(1)) {
        vertical += upper.iter().zip(lower).map(|(a, b)| (b - a).abs()).sum::<f64>();
    }
    let vertical = vertical / ((height - 1) * width) as f64;

    (horizontal + vertical) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const TOL: f64 = 1e-9;

    #[test]
    fn vertical_stripes_only_have_horizontal_gradient() {
        // Columns alternate black / white: every horizontal step is a full
        // luma swing, no vertical step changes anything.
        let img = RgbImage::from_fn(4, 3, |x, _| {
            if x % 2 == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let f = features_from_rgb(&img);
        // horizontal mean = 1.0, vertical mean = 0.0
        assert!((f.edge_energy - 0.5).abs() < TOL, "edge_energy = {}", f.edge_energy);
        assert!((f.mean_r - 0.5).abs() < TOL);
        assert!((f.std_r - 0.5).abs() < TOL);
    }

    #[test]
    fn luma_uses_perceptual_weights() {
        // Top row red, bottom row black: vertical differences equal the red
        // weight, horizontal differences are zero.
        let img = RgbImage::from_fn(2, 2, |_, y| {
            if y == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 0]) }
        });
        let f = features_from_rgb(&img);
        assert!((f.edge_energy - 0.299 / 2.0).abs() < TOL);
    }

    #[test]
    fn derived_ratios_follow_channel_means() {
        let img = RgbImage::from_pixel(8, 8, Rgb([255, 255, 0]));
        let f = features_from_rgb(&img);
        assert!((f.greenness - 0.5).abs() < TOL);
        assert!((f.yellow_score - 1.0).abs() < TOL);
        assert_eq!(f.edge_energy, 0.0);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        assert!(matches!(extract(&img), Err(LeafHealthError::InvalidImage(_))));
    }

    #[test]
    fn degenerate_extraction_size_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        let config = ExtractorConfig { size: 1, ..ExtractorConfig::default() };
        assert!(matches!(extract_with(&img, &config), Err(LeafHealthError::InvalidImage(_))));
    }

    #[test]
    fn oversized_extraction_size_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        for size in [MAX_SIZE + 1, u32::MAX] {
            let config = ExtractorConfig { size, ..ExtractorConfig::default() };
            match extract_with(&img, &config) {
                Err(LeafHealthError::InvalidImage(msg)) => assert!(msg.contains("at most 4096"), "{msg}"),
                other => panic!("expected InvalidImage for size {size}, got {other:?}"),
            }
        }
    }
}
