use std::collections::BTreeMap;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::enhance;

/// The edge lengths baked into the ICO file, ascending.  Covers every size
/// the Windows shell picks from for taskbar, start menu, and explorer views.
pub const ICO_SIZES: &[u32] =
    &[16, 20, 24, 28, 30, 32, 36, 40, 42, 44, 48, 56, 60, 64, 72, 80, 96, 128, 256];

/// Largest edge length that goes through the small-icon pipeline.
const SMALL_MAX: u32 = 32;

/// Large sizes up to this edge still get a light sharpening pass.
const SHARPEN_MAX: u32 = 64;

/// Renders the source at every requested size, keyed ascending by edge
/// length.
pub fn render_all(source: &RgbaImage, sizes: &[u32]) -> BTreeMap<u32, RgbaImage> {
    sizes
        .iter()
        .map(|&size| {
            let rendered = if size <= SMALL_MAX {
                render_small(source, size)
            } else {
                render_large(source, size)
            };
            (size, rendered)
        })
        .collect()
}

/// Renders one of the small sizes (16..32).  A single downscale to these
/// sizes washes out contrast, so the source is denoised and boosted at
/// 256x256, downscaled in two stages (box filter to 2x, then Lanczos), and
/// finally sharpened.
pub fn render_small(source: &RgbaImage, size: u32) -> RgbaImage {
    let work = fit_square(source, 256);
    let work = enhance::median_denoise(&work);
    let work = enhance::adjust_contrast(&work, 1.35);
    let work = enhance::adjust_saturation(&work, 1.10);
    let mid = imageops::thumbnail(&work, size * 2, size * 2);
    let out = imageops::resize(&mid, size, size, FilterType::Lanczos3);
    enhance::unsharp_mask(&out, 0.9, 220, 2)
}

/// Renders one of the large sizes (above 32): a plain square fit, with a
/// lighter sharpening pass for sizes up to 64.
pub fn render_large(source: &RgbaImage, size: u32) -> RgbaImage {
    let out = fit_square(source, size);
    if size <= SHARPEN_MAX {
        enhance::unsharp_mask(&out, 1.0, 160, 2)
    } else {
        out
    }
}

/// Scales the image to fit within a size-by-size square, preserving aspect
/// ratio and centering it over transparent padding.
pub fn fit_square(image: &RgbaImage, size: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return RgbaImage::new(size, size);
    }
    let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
    let new_width = ((width as f32 * scale).round() as u32).max(1);
    let new_height = ((height as f32 * scale).round() as u32).max(1);
    let resized = imageops::resize(image, new_width, new_height, FilterType::Lanczos3);
    let mut canvas = RgbaImage::new(size, size);
    let x = i64::from((size - new_width) / 2);
    let y = i64::from((size - new_height) / 2);
    imageops::overlay(&mut canvas, &resized, x, y);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_source() -> RgbaImage {
        let mut image = RgbaImage::new(300, 200);
        for y in 40..160 {
            for x in 60..240 {
                image.put_pixel(x, y, Rgba([200, 60, 20, 255]));
            }
        }
        image
    }

    #[test]
    fn every_size_renders_to_exact_dimensions() {
        let source = sample_source();
        let rendered = render_all(&source, ICO_SIZES);
        assert_eq!(rendered.len(), ICO_SIZES.len());
        for (&size, image) in &rendered {
            assert_eq!(image.dimensions(), (size, size));
        }
    }

    #[test]
    fn rendered_map_is_ascending_by_size() {
        let source = sample_source();
        let rendered = render_all(&source, ICO_SIZES);
        let keys: Vec<u32> = rendered.keys().copied().collect();
        assert_eq!(keys, ICO_SIZES.to_vec());
    }

    #[test]
    fn fit_square_centers_a_wide_image() {
        let image = RgbaImage::from_pixel(64, 32, Rgba([255, 255, 255, 255]));
        let fitted = fit_square(&image, 64);
        assert_eq!(fitted.dimensions(), (64, 64));
        // Top and bottom quarters are transparent padding.
        assert_eq!(fitted.get_pixel(32, 0).0[3], 0);
        assert_eq!(fitted.get_pixel(32, 63).0[3], 0);
        assert_eq!(fitted.get_pixel(32, 32).0[3], 255);
    }

    #[test]
    fn fit_square_of_empty_image_is_fully_transparent() {
        let image = RgbaImage::new(0, 0);
        let fitted = fit_square(&image, 16);
        assert_eq!(fitted.dimensions(), (16, 16));
        assert!(fitted.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn narrow_source_never_collapses_to_zero_width() {
        let image = RgbaImage::from_pixel(1, 500, Rgba([0, 0, 0, 255]));
        let fitted = fit_square(&image, 16);
        assert_eq!(fitted.dimensions(), (16, 16));
        // The one-pixel-wide column still lands on the canvas.
        assert!(fitted.pixels().any(|p| p.0[3] > 0));
    }
}
