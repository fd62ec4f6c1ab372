//! Demo scene (glTF) intake.
//!
//! Loads the first mesh of a glTF scene into flat vertex/index buffers,
//! the layout the GPU vertex-buffer collaborator consumes. Materials,
//! textures, and the scene graph are ignored; the demo draws a single
//! textured mesh.

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::error::AssetError;

/// Interleaved vertex: position, normal, first UV set.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Flattened triangle mesh ready for buffer upload.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl SceneMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex data as raw bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Load the first triangle mesh from a glTF scene file.
///
/// Missing normals or UVs are filled with zeros. A file that parses but
/// holds no triangle mesh with positions yields [`AssetError::NoMeshes`].
pub fn load_scene_mesh(path: &Path) -> Result<SceneMesh, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|e| match e {
        gltf::Error::Io(source) => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => AssetError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let mesh = document
        .meshes()
        .next()
        .ok_or_else(|| AssetError::NoMeshes {
            path: path.to_path_buf(),
        })?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "skipping primitive with topology {:?} in {}",
                primitive.mode(),
                path.display()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &*data.0));

        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.collect();

        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|iter| iter.collect())
            .unwrap_or_default();
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|tc| tc.into_f32().collect())
            .unwrap_or_default();

        let base = vertices.len() as u32;
        for (i, position) in positions.iter().enumerate() {
            vertices.push(MeshVertex {
                position: *position,
                normal: normals.get(i).copied().unwrap_or([0.0; 3]),
                uv: uvs.get(i).copied().unwrap_or([0.0; 2]),
            });
        }

        match reader.read_indices() {
            Some(read) => indices.extend(read.into_u32().map(|i| base + i)),
            // Non-indexed primitive: vertices already form a triangle list.
            None => indices.extend(base..base + positions.len() as u32),
        }
    }

    if vertices.is_empty() {
        return Err(AssetError::NoMeshes {
            path: path.to_path_buf(),
        });
    }

    log::info!(
        "loaded {}: {} vertices, {} indices",
        path.display(),
        vertices.len(),
        indices.len()
    );

    Ok(SceneMesh { vertices, indices })
}
