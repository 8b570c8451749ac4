use image::{imageops, RgbaImage};

/// Settings for trimming a soft outer glow from source artwork.
///
/// Artwork exported for the web often carries a low-alpha halo around the
/// subject.  Keeping that halo in the crop makes the shell render small icon
/// sizes from a padded bounding box, so the subject looks shrunk at 16/24/32
/// pixels.  The crop compares a "loose" bounding box (any visible alpha)
/// against a "tight" one (nearly opaque alpha): when the tight box is almost
/// as large as the loose one, the excess is a thin glow and gets trimmed;
/// when it is much smaller, the subject itself is soft-edged and the loose
/// box is kept so nothing real is cut away.
#[derive(Clone, Copy, Debug)]
pub struct GlowCrop {
    /// Alpha level at which a pixel counts toward the loose box.
    pub loose_alpha: u8,
    /// Alpha level at which a pixel counts toward the tight box.
    pub tight_alpha: u8,
    /// Minimum tight/loose size ratio (per dimension) for the tight box to
    /// win.  The default of 0.75 is tuned for logos with a thin halo.
    pub tight_ratio: f32,
}

impl Default for GlowCrop {
    fn default() -> GlowCrop {
        GlowCrop {
            loose_alpha: 1,
            tight_alpha: 220,
            tight_ratio: 0.75,
        }
    }
}

impl GlowCrop {
    /// Returns the image cropped to the chosen bounding box, or an unchanged
    /// copy if no pixel clears the loose threshold or the chosen box is
    /// degenerate.
    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let loose = alpha_bbox(image, self.loose_alpha);
        let tight = alpha_bbox(image, self.tight_alpha);
        let chosen = match (loose, tight) {
            (None, None) => return image.clone(),
            (Some(bbox), None) | (None, Some(bbox)) => bbox,
            (Some(loose), Some(tight)) => {
                let (lx0, ly0, lx1, ly1) = loose;
                let (tx0, ty0, tx1, ty1) = tight;
                let loose_width = (lx1 - lx0) as f32;
                let loose_height = (ly1 - ly0) as f32;
                let tight_width = (tx1 - tx0) as f32;
                let tight_height = (ty1 - ty0) as f32;
                if tight_width >= loose_width * self.tight_ratio
                    && tight_height >= loose_height * self.tight_ratio
                {
                    tight
                } else {
                    loose
                }
            }
        };
        let (x0, y0, x1, y1) = chosen;
        if x1 <= x0 || y1 <= y0 {
            return image.clone();
        }
        imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image()
    }
}

/// Computes the bounding box of all pixels whose alpha is at least
/// `threshold`, as (left, top, right, bottom) with the right and bottom
/// edges exclusive.  Returns `None` if no pixel qualifies.
pub fn alpha_bbox(image: &RgbaImage, threshold: u8) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] < threshold {
            continue;
        }
        bbox = Some(match bbox {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => {
                (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1))
            }
        });
    }
    bbox
}
