//! Radiance HDR panorama load/save.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::Rgb;

use crate::bitmap::{Bitmap, BitmapFormat};
use crate::error::AssetError;

/// Load an HDR image into an RGBA float [`Bitmap`].
pub fn load_hdr(path: &Path) -> Result<Bitmap, AssetError> {
    let image = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(source) => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => AssetError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let image = image.to_rgba32f();
    let (w, h) = image.dimensions();
    let raw = image.into_raw();

    log::info!("loaded {}: {w}x{h} rgba32f", path.display());

    Ok(Bitmap::from_data(
        w,
        h,
        4,
        BitmapFormat::Float,
        bytemuck::cast_slice(&raw).to_vec(),
    ))
}

/// Save a float [`Bitmap`] as a Radiance HDR file, dropping alpha.
///
/// Parent directories are created as needed.
pub fn save_hdr(bitmap: &Bitmap, path: &Path) -> Result<(), AssetError> {
    debug_assert_eq!(bitmap.format(), BitmapFormat::Float);

    let write_err = |message: String| AssetError::Write {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
    }

    let w = bitmap.width();
    let h = bitmap.height();
    let mut pixels = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        for x in 0..w {
            let c = bitmap.get_pixel(x, y);
            pixels.push(Rgb([c.x, c.y, c.z]));
        }
    }

    let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
    let writer = BufWriter::new(file);
    image::codecs::hdr::HdrEncoder::new(writer)
        .encode(&pixels, w as usize, h as usize)
        .map_err(|e| write_err(e.to_string()))?;

    Ok(())
}
