//! CPU-side pixel buffer.
//!
//! [`Bitmap`] holds raw pixel data together with width/height/channel
//! metadata, the way the GPU texture upload path expects it. Pixels are
//! read and written as [`Vec4`] regardless of the channel count, so the
//! conversion code does not need to branch on the storage format.

use glam::Vec4;

/// Per-component storage format of a [`Bitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    /// 8-bit unsigned, values mapped to [0, 1].
    UnsignedByte,
    /// 32-bit float, native endianness.
    Float,
}

impl BitmapFormat {
    /// Size in bytes of a single component.
    pub fn bytes_per_component(&self) -> usize {
        match self {
            Self::UnsignedByte => 1,
            Self::Float => 4,
        }
    }
}

/// A rectangular pixel buffer that owns its storage.
///
/// Invariant: `data.len() == w * h * comp * format.bytes_per_component()`.
#[derive(Debug, Clone)]
pub struct Bitmap {
    w: u32,
    h: u32,
    comp: u32,
    format: BitmapFormat,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a zero-filled bitmap. `comp` must be 1, 3, or 4.
    pub fn new(w: u32, h: u32, comp: u32, format: BitmapFormat) -> Self {
        assert!(
            matches!(comp, 1 | 3 | 4),
            "unsupported channel count: {comp}"
        );
        let len = w as usize * h as usize * comp as usize * format.bytes_per_component();
        Self {
            w,
            h,
            comp,
            format,
            data: vec![0; len],
        }
    }

    /// Create a bitmap from existing pixel bytes.
    ///
    /// Panics if `data` does not match the dimension/format invariant.
    pub fn from_data(w: u32, h: u32, comp: u32, format: BitmapFormat, data: Vec<u8>) -> Self {
        assert!(
            matches!(comp, 1 | 3 | 4),
            "unsupported channel count: {comp}"
        );
        let expected = w as usize * h as usize * comp as usize * format.bytes_per_component();
        assert_eq!(
            data.len(),
            expected,
            "pixel data length {} does not match {w}x{h}x{comp} {format:?}",
            data.len()
        );
        Self {
            w,
            h,
            comp,
            format,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Channels per pixel (1, 3, or 4).
    pub fn comp(&self) -> u32 {
        self.comp
    }

    /// Per-component storage format.
    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    /// Raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the bitmap and return its pixel bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel bytes reinterpreted as f32 components.
    ///
    /// Copies through [`bytemuck::pod_collect_to_vec`] so the result is
    /// correctly aligned regardless of the byte buffer's alignment. Only
    /// meaningful for [`BitmapFormat::Float`] bitmaps.
    pub fn float_components(&self) -> Vec<f32> {
        debug_assert_eq!(self.format, BitmapFormat::Float);
        bytemuck::pod_collect_to_vec(&self.data)
    }

    fn component_offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.w && y < self.h);
        (y as usize * self.w as usize + x as usize)
            * self.comp as usize
            * self.format.bytes_per_component()
    }

    /// Read a pixel as RGBA. Missing channels read as 0, missing alpha as 1.
    pub fn get_pixel(&self, x: u32, y: u32) -> Vec4 {
        let ofs = self.component_offset(x, y);
        let mut out = [0.0f32, 0.0, 0.0, 1.0];
        for (c, slot) in out.iter_mut().enumerate().take(self.comp as usize) {
            *slot = match self.format {
                BitmapFormat::UnsignedByte => self.data[ofs + c] as f32 / 255.0,
                BitmapFormat::Float => {
                    let at = ofs + c * 4;
                    f32::from_ne_bytes([
                        self.data[at],
                        self.data[at + 1],
                        self.data[at + 2],
                        self.data[at + 3],
                    ])
                }
            };
        }
        Vec4::from_array(out)
    }

    /// Write a pixel from RGBA. Channels beyond `comp` are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Vec4) {
        let ofs = self.component_offset(x, y);
        let color = color.to_array();
        for (c, value) in color.iter().enumerate().take(self.comp as usize) {
            match self.format {
                BitmapFormat::UnsignedByte => {
                    self.data[ofs + c] = (value.clamp(0.0, 1.0) * 255.0) as u8;
                }
                BitmapFormat::Float => {
                    let at = ofs + c * 4;
                    self.data[at..at + 4].copy_from_slice(&value.to_ne_bytes());
                }
            }
        }
    }
}
