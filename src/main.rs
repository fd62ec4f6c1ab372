//! # Skybox demo start-up
//!
//! Command-line front end for the CPU conversion pipeline:
//! - Load the equirectangular HDR panorama
//! - Convert it to a vertical-cross layout
//! - Write the cross to the cache as a diagnostic (failure is non-fatal)
//! - Extract the six cube faces into one upload-ready buffer
//! - Load the demo scene mesh
//!
//! Missing assets are fatal and exit with distinct codes so launcher
//! scripts can tell the two failures apart.

use std::path::Path;
use std::process::exit;

use skybox_demo::{
    equirect_to_vertical_cross, load_hdr, load_scene_mesh, save_hdr, vertical_cross_to_cube_faces,
    CUBE_FACE_COUNT,
};

pub const PANORAMA_PATH: &str = "data/golden_gate_hills_4k.hdr";
pub const SCENE_PATH: &str = "data/rubber_duck/scene.gltf";
pub const CROSS_CACHE_PATH: &str = ".cache/vertical_cross.hdr";

pub const EXIT_NO_PANORAMA: i32 = 254;
pub const EXIT_NO_SCENE: i32 = 255;

fn main() {
    env_logger::init();

    let panorama = match load_hdr(Path::new(PANORAMA_PATH)) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            log::error!("cannot load panorama: {e}");
            exit(EXIT_NO_PANORAMA);
        }
    };

    let cross = match equirect_to_vertical_cross(&panorama) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            log::error!("cannot convert panorama: {e}");
            exit(EXIT_NO_PANORAMA);
        }
    };
    log::info!(
        "vertical cross: {}x{}",
        cross.width(),
        cross.height()
    );

    // Diagnostic only; the pipeline continues if the cache is unwritable.
    if let Err(e) = save_hdr(&cross, Path::new(CROSS_CACHE_PATH)) {
        log::warn!("cannot cache vertical cross: {e}");
    }

    let cube = match vertical_cross_to_cube_faces(&cross) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            log::error!("cannot extract cube faces: {e}");
            exit(EXIT_NO_PANORAMA);
        }
    };
    log::info!(
        "cube map: {} faces of {}x{}, {} bytes",
        CUBE_FACE_COUNT,
        cube.width(),
        cube.height() / CUBE_FACE_COUNT as u32,
        cube.data().len()
    );

    let mesh = match load_scene_mesh(Path::new(SCENE_PATH)) {
        Ok(mesh) => mesh,
        Err(e) => {
            log::error!("cannot load scene: {e}");
            exit(EXIT_NO_SCENE);
        }
    };
    log::info!(
        "scene mesh ready: {} vertices ({} bytes), {} indices",
        mesh.vertex_count(),
        mesh.vertex_bytes().len(),
        mesh.index_count()
    );
}
