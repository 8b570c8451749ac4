use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Conventional web-export filenames, tried in order before falling back to
/// the largest PNG in the directory.
const PREFERRED_NAMES: &[&str] = &[
    "android-chrome-512x512.png",
    "apple-touch-icon.png",
    "android-chrome-192x192.png",
];

/// Resolves the path of the base image to render from.
///
/// A file path is returned as-is.  For a directory, the conventional
/// filenames in [`PREFERRED_NAMES`] win in order; otherwise the largest PNG
/// by byte size is chosen (ties broken by the lexicographically smaller
/// name).  Fails with `ErrorKind::NotFound` when no candidate exists.
pub fn pick_base_image(input: &Path) -> io::Result<PathBuf> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }
    if !input.is_dir() {
        let msg = format!("no such file or directory: {}", input.display());
        return Err(Error::new(ErrorKind::NotFound, msg));
    }
    for name in PREFERRED_NAMES {
        let candidate = input.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    let mut best: Option<(u64, PathBuf)> = None;
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_png_extension(&path) {
            continue;
        }
        let size = entry.metadata()?.len();
        let better = match &best {
            None => true,
            Some((best_size, best_path)) => {
                size > *best_size || (size == *best_size && path < *best_path)
            }
        };
        if better {
            best = Some((size, path));
        }
    }
    match best {
        Some((_, path)) => Ok(path),
        None => {
            let msg = format!("no PNG sources in {}", input.display());
            Err(Error::new(ErrorKind::NotFound, msg))
        }
    }
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
}
