//! Shared part geometry: vertex positions, triangle faces and one color per face.

use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::colors::{Color, PALETTE};
use crate::math::vec3::Vec3;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("{0} contains no triangles")]
    Empty(String),
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh has {faces} faces but {colors} face colors")]
    ColorCountMismatch { faces: usize, colors: usize },
}

/// A triangle defined by three zero-based indices into the vertex array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a as usize, self.b as usize, self.c as usize]
    }
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
];

const CUBE_FACES: [Face; 12] = [
    // Front (-Z, the nose)
    Face::new(0, 1, 2),
    Face::new(0, 2, 3),
    // Right
    Face::new(3, 2, 4),
    Face::new(3, 4, 5),
    // Back
    Face::new(5, 4, 6),
    Face::new(5, 6, 7),
    // Left
    Face::new(7, 6, 1),
    Face::new(7, 1, 0),
    // Top
    Face::new(1, 6, 4),
    Face::new(1, 4, 2),
    // Bottom
    Face::new(5, 7, 0),
    Face::new(5, 0, 3),
];

const CUBE_COLORS: [[u8; 3]; 12] = [
    [200, 40, 40],
    [230, 60, 60],
    [40, 160, 60],
    [60, 190, 80],
    [40, 70, 200],
    [70, 100, 230],
    [220, 180, 30],
    [240, 200, 60],
    [150, 60, 170],
    [180, 90, 200],
    [30, 170, 170],
    [60, 200, 200],
];

/// Geometry shared by every object in the scene.
///
/// Immutable once built; objects differ only by their transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    colors: Vec<Color>,
}

impl Mesh {
    /// Build a mesh, checking every face index and the face/color pairing.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>, colors: Vec<Color>) -> Result<Self, LoadError> {
        if faces.len() != colors.len() {
            return Err(LoadError::ColorCountMismatch {
                faces: faces.len(),
                colors: colors.len(),
            });
        }
        for (i, face) in faces.iter().enumerate() {
            for index in [face.a, face.b, face.c] {
                if index as usize >= vertices.len() {
                    return Err(LoadError::FaceIndexOutOfRange {
                        face: i,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self {
            vertices,
            faces,
            colors,
        })
    }

    /// Unit cube centered on the origin, two triangles per side.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
            colors: CUBE_COLORS
                .iter()
                .map(|&[r, g, b]| Color::from_rgb8(r, g, b))
                .collect(),
        }
    }

    /// Load geometry from an OBJ file.
    ///
    /// All objects/groups in the file are merged into one vertex array. A face
    /// takes its material's diffuse color when there is one, otherwise the
    /// next color of a fixed palette.
    pub fn from_obj(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = file_path.as_ref();
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;
        let materials = materials.unwrap_or_else(|err| {
            warn!("ignoring materials for {}: {err}", path.display());
            Vec::new()
        });

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        let mut colors = Vec::new();

        for model in &models {
            let base = vertices.len() as u32;
            vertices.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            let diffuse = model
                .mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|material| material.diffuse)
                .map(|[r, g, b]| Color::new(r, g, b));

            for tri in model.mesh.indices.chunks_exact(3) {
                faces.push(Face::new(base + tri[0], base + tri[1], base + tri[2]));
                colors.push(diffuse.unwrap_or_else(|| {
                    let [r, g, b] = PALETTE[colors.len() % PALETTE.len()];
                    Color::from_rgb8(r, g, b)
                }));
            }
        }

        if faces.is_empty() {
            return Err(LoadError::Empty(path.display().to_string()));
        }

        debug!(
            "loaded {}: {} models, {} vertices, {} faces",
            path.display(),
            models.len(),
            vertices.len(),
            faces.len()
        );
        Self::new(vertices, faces, colors)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// One color per face, index-aligned with [`Mesh::faces`].
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cube_is_consistent() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        assert_eq!(cube.colors().len(), 12);
        let rebuilt = Mesh::new(
            cube.vertices().to_vec(),
            cube.faces().to_vec(),
            cube.colors().to_vec(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(
            vec![Vec3::ZERO, Vec3::ONE, Vec3::UP],
            vec![Face::new(0, 1, 3)],
            vec![Color::default()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn rejects_color_count_mismatch() {
        let err = Mesh::new(
            vec![Vec3::ZERO, Vec3::ONE, Vec3::UP],
            vec![Face::new(0, 1, 2)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColorCountMismatch { faces: 1, colors: 0 }
        ));
    }

    #[test]
    fn loads_obj_and_offsets_indices_across_objects() {
        let path = std::env::temp_dir().join(format!("airframe_mesh_{}.obj", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "o first").unwrap();
            writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0").unwrap();
            writeln!(file, "f 1 2 3").unwrap();
            writeln!(file, "o second").unwrap();
            writeln!(file, "v 0 0 1\nv 1 0 1\nv 0 1 1\nv 1 1 1").unwrap();
            writeln!(file, "f 4 5 7 6").unwrap();
        }

        let mesh = Mesh::from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.vertices().len(), 7);
        // The quad is triangulated into two faces.
        assert_eq!(mesh.faces().len(), 3);
        assert_eq!(mesh.colors().len(), 3);
        assert!(mesh.faces()[1..]
            .iter()
            .all(|f| f.indices().iter().all(|&i| i >= 3)));
    }

    #[test]
    fn missing_obj_is_an_error() {
        assert!(Mesh::from_obj("/nonexistent/airframe.obj").is_err());
    }
}
