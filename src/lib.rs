//! Bakes a source PNG (or a folder of candidate PNGs) into a
//! multi-resolution Windows ICO file.
//!
//! The pipeline is linear: pick a base image, trim any soft outer glow from
//! the artwork, render each target edge length with a filter chain tuned for
//! that size, and pack the results as PNG payloads into an ICO container.
//! Small sizes (up to 32 pixels) go through a two-stage downscale with
//! denoising, contrast and saturation boosts, and an unsharp mask, because a
//! single resize to tiny pixel counts washes out perceived detail.

#![warn(missing_docs)]

mod container;
mod crop;
mod enhance;
mod render;
mod source;

pub use container::{IconDir, IconDirEntry};
pub use crop::{alpha_bbox, GlowCrop};
pub use render::{fit_square, render_all, render_large, render_small, ICO_SIZES};
pub use source::pick_base_image;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Error, ErrorKind};
use std::path::Path;

use image::RgbaImage;

/// Converts `input` into a multi-resolution ICO file at `output`.
///
/// `input` may be a PNG file, a directory of candidate PNGs (see
/// [`pick_base_image`]), or an existing `.ico` file, which is copied to
/// `output` verbatim without re-rendering.  16px and 32px preview PNGs are
/// written next to the output on a best-effort basis.
pub fn convert(input: &Path, output: &Path) -> io::Result<()> {
    if input.is_file() && has_extension(input, "ico") {
        create_parent_dirs(output)?;
        fs::copy(input, output)?;
        return Ok(());
    }
    let base = pick_base_image(input)?;
    let base_image = image::open(&base).map_err(to_io_error)?.into_rgba8();
    let cropped = GlowCrop::default().apply(&base_image);
    let rendered = render_all(&cropped, ICO_SIZES);
    let mut dir = IconDir::new();
    for image in rendered.values() {
        dir.add_png_image(image)?;
    }
    create_parent_dirs(output)?;
    let writer = BufWriter::new(File::create(output)?);
    dir.write(writer)?;
    write_previews(&rendered, output);
    Ok(())
}

/// Drops 16px and 32px preview PNGs next to the output for a quick sanity
/// check.  Best-effort; failures are discarded.
fn write_previews(images: &BTreeMap<u32, RgbaImage>, output: &Path) {
    for size in [16u32, 32] {
        if let Some(image) = images.get(&size) {
            let path = output.with_extension(format!("preview{}.png", size));
            let _ = image.save(path);
        }
    }
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}

fn to_io_error(err: image::ImageError) -> Error {
    match err {
        image::ImageError::IoError(inner) => inner,
        other => Error::new(ErrorKind::InvalidData, other),
    }
}
