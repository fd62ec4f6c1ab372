//! Equirectangular panorama to cube-map conversion on CPU.
//!
//! The conversion runs in two steps:
//! 1. [`equirect_to_vertical_cross`] resamples the panorama into an
//!    unfolded-cube "vertical cross" image, which can be written to disk
//!    and inspected as a normal 2D picture.
//! 2. [`vertical_cross_to_cube_faces`] slices the cross into six square
//!    faces stacked along the vertical axis, in the layer order cube
//!    texture types expect (+X, -X, +Y, -Y, +Z, -Z).
//!
//! Face directions use the same axis table as the LearnOpenGL-style IBL
//! samplers: for face +X, a face-local (u, v) maps to the unnormalized
//! direction (1, -v, -u), and analogously for the other faces.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec3, Vec4};

use crate::bitmap::Bitmap;
use crate::error::ConvertError;

/// Number of faces in a cube map.
pub const CUBE_FACE_COUNT: usize = 6;

/// Cube-map face, in GPU layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// All faces in layer order.
    pub const ALL: [CubeFace; CUBE_FACE_COUNT] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Layer index of this face.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Grid cell (column, row) of each face within the 3x4 vertical cross.
///
/// ```text
///        ------
///        | +Y |
///   ----------------
///   | -X | +Z | +X |
///   ----------------
///        | -Y |
///        ------
///        | -Z |
///        ------
/// ```
const FACE_CROSS_CELL: [(u32, u32); CUBE_FACE_COUNT] =
    [(2, 1), (0, 1), (1, 0), (1, 2), (1, 1), (1, 3)];

/// In-cell orientation of each face.
///
/// With the axis table in [`face_direction`] every cross edge is already
/// continuous except the back face, which hangs below -Y and must be
/// stored upside down. Placement and extraction share this table so the
/// extraction exactly inverts the placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceOrientation {
    Keep,
    Rotate180,
}

const FACE_ORIENTATION: [FaceOrientation; CUBE_FACE_COUNT] = [
    FaceOrientation::Keep,
    FaceOrientation::Keep,
    FaceOrientation::Keep,
    FaceOrientation::Keep,
    FaceOrientation::Keep,
    FaceOrientation::Rotate180,
];

impl FaceOrientation {
    /// Map a face-local pixel to its in-cell position.
    ///
    /// A 180 degree rotation is its own inverse, so the same mapping
    /// serves both placement and extraction.
    fn apply(self, x: u32, y: u32, size: u32) -> (u32, u32) {
        match self {
            Self::Keep => (x, y),
            Self::Rotate180 => (size - 1 - x, size - 1 - y),
        }
    }
}

/// Unnormalized unit-cube direction for a face-local (u, v) in [-1, 1].
pub fn face_direction(face: CubeFace, u: f32, v: f32) -> Vec3 {
    match face {
        CubeFace::PosX => Vec3::new(1.0, -v, -u),
        CubeFace::NegX => Vec3::new(-1.0, -v, u),
        CubeFace::PosY => Vec3::new(u, 1.0, v),
        CubeFace::NegY => Vec3::new(u, -1.0, -v),
        CubeFace::PosZ => Vec3::new(u, -v, 1.0),
        CubeFace::NegZ => Vec3::new(-u, -v, -1.0),
    }
}

/// Bilinear sample at a continuous pixel coordinate.
///
/// The horizontal axis wraps (the panorama is circular in longitude), the
/// vertical axis clamps at the poles.
fn sample_bilinear(src: &Bitmap, sx: f32, sy: f32) -> Vec4 {
    let w = src.width() as i64;
    let h = src.height() as i64;

    let x0f = (sx - 0.5).floor();
    let y0f = (sy - 0.5).floor();
    let tx = sx - 0.5 - x0f;
    let ty = sy - 0.5 - y0f;

    let wrap_x = |x: i64| -> u32 { (((x % w) + w) % w) as u32 };
    let clamp_y = |y: i64| -> u32 { y.clamp(0, h - 1) as u32 };

    let x0 = x0f as i64;
    let y0 = y0f as i64;

    let p00 = src.get_pixel(wrap_x(x0), clamp_y(y0));
    let p10 = src.get_pixel(wrap_x(x0 + 1), clamp_y(y0));
    let p01 = src.get_pixel(wrap_x(x0), clamp_y(y0 + 1));
    let p11 = src.get_pixel(wrap_x(x0 + 1), clamp_y(y0 + 1));

    let top = p00.lerp(p10, tx);
    let bottom = p01.lerp(p11, tx);
    top.lerp(bottom, ty)
}

/// Sample an equirectangular panorama in the given direction.
///
/// `theta` is longitude from atan2(z, x), `phi` latitude from
/// atan2(y, sqrt(x^2 + z^2)).
fn sample_equirect(src: &Bitmap, dir: Vec3) -> Vec4 {
    let theta = dir.z.atan2(dir.x);
    let phi = dir
        .y
        .atan2((dir.x * dir.x + dir.z * dir.z).sqrt())
        .clamp(-FRAC_PI_2, FRAC_PI_2);

    let sx = (theta + PI) / TAU * src.width() as f32;
    let sy = (FRAC_PI_2 - phi) / PI * src.height() as f32;
    sample_bilinear(src, sx, sy)
}

/// Face edge length the conversions derive from a panorama of width `w`.
pub fn face_size_for_width(w: u32) -> u32 {
    w / 4
}

/// Resample an equirectangular panorama into a vertical-cross image.
///
/// The output is `(w/4)*3` wide and `(w/4)*4` tall regardless of the
/// source height; the four corner cells outside the cross stay at zero.
pub fn equirect_to_vertical_cross(src: &Bitmap) -> Result<Bitmap, ConvertError> {
    let face_size = face_size_for_width(src.width());
    if face_size == 0 || src.height() == 0 {
        return Err(ConvertError::PanoramaTooSmall {
            width: src.width(),
            height: src.height(),
        });
    }

    let mut cross = Bitmap::new(face_size * 3, face_size * 4, src.comp(), src.format());

    for face in CubeFace::ALL {
        let (col, row) = FACE_CROSS_CELL[face.index()];
        let orientation = FACE_ORIENTATION[face.index()];

        for y in 0..face_size {
            for x in 0..face_size {
                let u = 2.0 * (x as f32 + 0.5) / face_size as f32 - 1.0;
                let v = 2.0 * (y as f32 + 0.5) / face_size as f32 - 1.0;

                let color = sample_equirect(src, face_direction(face, u, v));

                let (ox, oy) = orientation.apply(x, y, face_size);
                cross.set_pixel(col * face_size + ox, row * face_size + oy, color);
            }
        }
    }

    Ok(cross)
}

/// Slice a vertical-cross image into six faces stacked along the Y axis.
///
/// Pure rectangular copy through the per-face orientation table; no
/// resampling. The output is `face_size` wide and `face_size * 6` tall,
/// faces in [`CubeFace::ALL`] order.
pub fn vertical_cross_to_cube_faces(cross: &Bitmap) -> Result<Bitmap, ConvertError> {
    let face_size = cross.width() / 3;
    let ok = face_size > 0
        && cross.width() % 3 == 0
        && cross.height() % 4 == 0
        && face_size == cross.height() / 4;
    if !ok {
        return Err(ConvertError::BadCrossDimensions {
            width: cross.width(),
            height: cross.height(),
        });
    }

    let mut faces = Bitmap::new(face_size, face_size * 6, cross.comp(), cross.format());

    for face in CubeFace::ALL {
        let (col, row) = FACE_CROSS_CELL[face.index()];
        let orientation = FACE_ORIENTATION[face.index()];
        let layer_top = face.index() as u32 * face_size;

        for y in 0..face_size {
            for x in 0..face_size {
                let (ox, oy) = orientation.apply(x, y, face_size);
                let color = cross.get_pixel(col * face_size + ox, row * face_size + oy);
                faces.set_pixel(x, layer_top + y, color);
            }
        }
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::BitmapFormat;

    /// Panorama whose red channel is sin(longitude), smooth across the seam.
    fn longitude_gradient(w: u32, h: u32) -> Bitmap {
        let mut b = Bitmap::new(w, h, 4, BitmapFormat::Float);
        for y in 0..h {
            for x in 0..w {
                let longitude = (x as f32 + 0.5) / w as f32 * TAU - PI;
                b.set_pixel(x, y, Vec4::new(longitude.sin(), 0.0, 0.0, 1.0));
            }
        }
        b
    }

    fn solid(w: u32, h: u32, color: Vec4) -> Bitmap {
        let mut b = Bitmap::new(w, h, 4, BitmapFormat::Float);
        for y in 0..h {
            for x in 0..w {
                b.set_pixel(x, y, color);
            }
        }
        b
    }

    #[test]
    fn cross_dimension_law() {
        for (w, h) in [(64, 32), (256, 128), (100, 7), (1024, 512)] {
            let cross = equirect_to_vertical_cross(&solid(w, h, Vec4::ONE)).unwrap();
            let face = w / 4;
            assert_eq!(cross.width(), face * 3);
            assert_eq!(cross.height(), face * 4);
            // The extraction face size is well defined: w/3 == h/4.
            assert_eq!(cross.width() / 3, cross.height() / 4);

            let faces = vertical_cross_to_cube_faces(&cross).unwrap();
            assert_eq!(faces.width(), face);
            assert_eq!(faces.height(), face * 6);
        }
    }

    #[test]
    fn too_small_panorama_is_rejected() {
        let tiny = Bitmap::new(3, 2, 4, BitmapFormat::Float);
        let err = equirect_to_vertical_cross(&tiny).unwrap_err();
        assert_eq!(
            err,
            ConvertError::PanoramaTooSmall {
                width: 3,
                height: 2
            }
        );
    }

    #[test]
    fn bad_cross_dimensions_are_rejected() {
        let square = Bitmap::new(10, 10, 4, BitmapFormat::Float);
        assert!(matches!(
            vertical_cross_to_cube_faces(&square),
            Err(ConvertError::BadCrossDimensions { .. })
        ));
    }

    #[test]
    fn corner_cells_stay_empty() {
        let cross = equirect_to_vertical_cross(&solid(64, 32, Vec4::ONE)).unwrap();
        let fs = 16;
        // The four corner cells of the 3x4 grid carry no face.
        for (col, row) in [(0, 0), (2, 0), (0, 2), (2, 2), (0, 3), (2, 3)] {
            for y in 0..fs {
                for x in 0..fs {
                    let p = cross.get_pixel(col * fs + x, row * fs + y);
                    assert_eq!(p.truncate(), glam::Vec3::ZERO, "cell ({col},{row})");
                }
            }
        }
    }

    #[test]
    fn seam_sampling_wraps() {
        let src = longitude_gradient(128, 16);
        // Adjacent sample points across the theta = +-pi wrap boundary.
        let eps = 0.05;
        let left = sample_bilinear(&src, 128.0 - eps, 8.0);
        let right = sample_bilinear(&src, eps, 8.0);
        // sin is smooth across the seam; a clamped sampler would read the
        // (negated) far edge and produce a jump of about 2*sin(pi/128).
        assert!(
            (left.x - right.x).abs() < 0.01,
            "seam discontinuity: {} vs {}",
            left.x,
            right.x
        );
    }

    #[test]
    fn pole_sampling_is_finite() {
        let src = longitude_gradient(64, 32);
        for face in CubeFace::ALL {
            let p = sample_equirect(&src, face_direction(face, 0.0, 0.0));
            assert!(p.is_finite(), "{face:?} center sample not finite");
        }
        // Straight up/down hit the clamped pole rows without NaN.
        assert!(sample_equirect(&src, Vec3::Y).is_finite());
        assert!(sample_equirect(&src, -Vec3::Y).is_finite());
    }

    #[test]
    fn face_center_directions() {
        // The +X face center looks down +X, which is longitude 0 and sits
        // at the horizontal middle of the panorama.
        let mut src = Bitmap::new(64, 32, 4, BitmapFormat::Float);
        src.set_pixel(32, 16, Vec4::new(1.0, 0.0, 0.0, 1.0));
        let d = face_direction(CubeFace::PosX, 0.0, 0.0);
        let p = sample_equirect(&src, d);
        assert!(p.x > 0.2, "expected the marked texel near longitude 0");
    }

    #[test]
    fn cross_roundtrip_face_identity() {
        let fs = 8;
        let colors: [Vec4; 6] = [
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 1.0, 1.0),
            Vec4::new(1.0, 0.0, 1.0, 1.0),
        ];

        // Fill each face cell of a synthetic cross with a unique color.
        let mut cross = Bitmap::new(fs * 3, fs * 4, 4, BitmapFormat::Float);
        for face in CubeFace::ALL {
            let (col, row) = FACE_CROSS_CELL[face.index()];
            for y in 0..fs {
                for x in 0..fs {
                    cross.set_pixel(col * fs + x, row * fs + y, colors[face.index()]);
                }
            }
        }

        let faces = vertical_cross_to_cube_faces(&cross).unwrap();
        for face in CubeFace::ALL {
            let top = face.index() as u32 * fs;
            for y in 0..fs {
                for x in 0..fs {
                    assert_eq!(
                        faces.get_pixel(x, top + y),
                        colors[face.index()],
                        "bleed into {face:?} at ({x},{y})"
                    );
                }
            }
        }
    }

    #[test]
    fn cross_edges_are_continuous() {
        // Sample a smooth panorama and check that the shared edge between
        // the front face and the bottom face carries matching colors, and
        // likewise for the rotated back face below it.
        let src = longitude_gradient(256, 128);
        let cross = equirect_to_vertical_cross(&src).unwrap();
        let fs = 64;

        for x in 0..fs {
            let front_bottom = cross.get_pixel(fs + x, 2 * fs - 1);
            let bottom_top = cross.get_pixel(fs + x, 2 * fs);
            assert!(
                (front_bottom.x - bottom_top.x).abs() < 0.1,
                "front/-Y edge mismatch at column {x}"
            );

            let bottom_bottom = cross.get_pixel(fs + x, 3 * fs - 1);
            let back_top = cross.get_pixel(fs + x, 3 * fs);
            assert!(
                (bottom_bottom.x - back_top.x).abs() < 0.1,
                "-Y/back edge mismatch at column {x}"
            );
        }
    }
}
