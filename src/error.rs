//! Error types for asset loading and cube-map conversion.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading demo assets from disk.
#[derive(Debug)]
pub enum AssetError {
    /// Failed to read the file at all.
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file was read but could not be decoded.
    Decode {
        /// Path that was being decoded.
        path: PathBuf,
        /// Decoder diagnostic.
        message: String,
    },
    /// Failed to write a file.
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Encoder or I/O diagnostic.
        message: String,
    },
    /// The scene file parsed but contains no usable mesh.
    NoMeshes {
        /// Path of the offending scene file.
        path: PathBuf,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Decode { path, message } => {
                write!(f, "failed to decode {}: {message}", path.display())
            }
            Self::Write { path, message } => {
                write!(f, "failed to write {}: {message}", path.display())
            }
            Self::NoMeshes { path } => {
                write!(f, "scene {} contains no mesh", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can occur during the panorama conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The panorama is too narrow to carve four faces out of its width.
    PanoramaTooSmall {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },
    /// The bitmap does not have vertical-cross proportions (w/3 != h/4).
    BadCrossDimensions {
        /// Cross width in pixels.
        width: u32,
        /// Cross height in pixels.
        height: u32,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PanoramaTooSmall { width, height } => {
                write!(f, "panorama {width}x{height} is too small for a cube face grid")
            }
            Self::BadCrossDimensions { width, height } => {
                write!(
                    f,
                    "bitmap {width}x{height} is not a vertical cross (width/3 must equal height/4)"
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::BadCrossDimensions {
            width: 10,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "bitmap 10x10 is not a vertical cross (width/3 must equal height/4)"
        );

        let err = AssetError::NoMeshes {
            path: PathBuf::from("data/scene.gltf"),
        };
        assert_eq!(err.to_string(), "scene data/scene.gltf contains no mesh");
    }
}
