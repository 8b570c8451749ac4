use image::{imageops, Rgba, RgbaImage};

/// ITU-R 601-2 luminance of a pixel, ignoring alpha.
fn luminance(pixel: Rgba<u8>) -> f32 {
    let Rgba([r, g, b, _]) = pixel;
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Applies a 3x3 median filter to each channel (alpha included), replicating
/// edge pixels at the borders.
pub fn median_denoise(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);
    let mut window = [0u8; 9];
    for y in 0..height {
        for x in 0..width {
            let mut pixel = [0u8; 4];
            for channel in 0..4 {
                let mut index = 0;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        let sx = (i64::from(x) + dx).clamp(0, i64::from(width) - 1);
                        let sy = (i64::from(y) + dy).clamp(0, i64::from(height) - 1);
                        window[index] = image.get_pixel(sx as u32, sy as u32).0[channel];
                        index += 1;
                    }
                }
                window.sort_unstable();
                pixel[channel] = window[4];
            }
            output.put_pixel(x, y, Rgba(pixel));
        }
    }
    output
}

/// Scales contrast by `factor` (1.0 leaves the image unchanged).  Each color
/// channel is interpolated away from a solid gray at the image's mean
/// luminance; alpha is untouched.  The mean is taken over per-pixel
/// luminances after they are rounded to u8, as if the image had first been
/// converted to 8-bit grayscale.
pub fn adjust_contrast(image: &RgbaImage, factor: f32) -> RgbaImage {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return image.clone();
    }
    let sum: u64 = image
        .pixels()
        .map(|&p| u64::from(clamp_channel(luminance(p))))
        .sum();
    let mean = (sum as f64 / pixel_count as f64).round() as f32;
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        for channel in 0..3 {
            let value = f32::from(pixel.0[channel]);
            pixel.0[channel] = clamp_channel(mean + (value - mean) * factor);
        }
    }
    output
}

/// Scales color saturation by `factor` (1.0 leaves the image unchanged).
/// Each color channel is interpolated away from the pixel's own luminance;
/// alpha is untouched.
pub fn adjust_saturation(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        let gray = luminance(*pixel);
        for channel in 0..3 {
            let value = f32::from(pixel.0[channel]);
            pixel.0[channel] = clamp_channel(gray + (value - gray) * factor);
        }
    }
    output
}

/// Sharpens via an unsharp mask: the image is Gaussian-blurred at `radius`,
/// and each channel whose blurred value differs by at least `threshold` is
/// pushed away from the blur by `percent` of the difference.
pub fn unsharp_mask(
    image: &RgbaImage,
    radius: f32,
    percent: i32,
    threshold: i32,
) -> RgbaImage {
    let blurred = imageops::blur(image, radius);
    let mut output = image.clone();
    for (pixel, soft) in output.pixels_mut().zip(blurred.pixels()) {
        for channel in 0..4 {
            let value = i32::from(pixel.0[channel]);
            let diff = value - i32::from(soft.0[channel]);
            if diff.abs() >= threshold {
                pixel.0[channel] = (value + diff * percent / 100).clamp(0, 255) as u8;
            }
        }
    }
    output
}
