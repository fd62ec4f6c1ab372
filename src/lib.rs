//! CPU-side core of an image-based-lighting skybox demo.
//!
//! The crate turns an equirectangular HDR panorama into a vertical-cross
//! layout and then into a six-face cube-map buffer ready for texture
//! upload, and carries the per-frame session state the demo UI edits:
//! an accumulated model orientation quaternion and the camera mode.

pub mod bitmap;
pub mod camera;
pub mod cubemap;
pub mod error;
pub mod hdr;
pub mod mesh;
pub mod orientation;

pub use bitmap::{Bitmap, BitmapFormat};
pub use camera::{CameraMode, CameraState, MoveToPositioner};
pub use cubemap::{
    equirect_to_vertical_cross, face_direction, face_size_for_width, vertical_cross_to_cube_faces,
    CubeFace, CUBE_FACE_COUNT,
};
pub use error::{AssetError, ConvertError};
pub use hdr::{load_hdr, save_hdr};
pub use mesh::{load_scene_mesh, MeshVertex, SceneMesh};
pub use orientation::ModelTransform;
