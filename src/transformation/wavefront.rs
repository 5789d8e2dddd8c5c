use crate::math::{Point, Real};
use crate::shape::{TriMesh, TriMeshBuilderError};
use alloc::{string::ToString, vec, vec::Vec};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Error raised while reading or writing a Wavefront file.
#[derive(thiserror::Error, Debug)]
pub enum WavefrontError {
    /// The file could not be opened or created.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file content could not be parsed or written.
    #[error(transparent)]
    Obj(#[from] ObjError),
    /// The file describes an invalid triangle mesh.
    #[error(transparent)]
    TriMesh(#[from] TriMeshBuilderError),
}

impl TriMesh {
    /// Loads a triangle mesh from a Wavefront (`.obj`) file.
    ///
    /// All the objects and groups of the file are merged into a single mesh.
    /// Polygons with more than three vertices are fan-triangulated, and
    /// polygons with fewer are skipped.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Self, WavefrontError> {
        let file = File::open(path)?;
        let data = ObjData::load_buf(BufReader::new(file))?;

        let vertices: Vec<_> = data
            .position
            .iter()
            .map(|p| Point::new(p[0] as Real, p[1] as Real, p[2] as Real))
            .collect();
        let mut indices = Vec::new();

        for poly in data
            .objects
            .iter()
            .flat_map(|obj| &obj.groups)
            .flat_map(|group| &group.polys)
        {
            let ids = &poly.0;

            for k in 1..ids.len().saturating_sub(1) {
                indices.push([ids[0].0 as u32, ids[k].0 as u32, ids[k + 1].0 as u32]);
            }
        }

        log::debug!(
            "Loaded a Wavefront mesh with {} vertices and {} triangles.",
            vertices.len(),
            indices.len()
        );

        Ok(TriMesh::new(vertices, indices)?)
    }

    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), WavefrontError> {
        let mut file = BufWriter::new(File::create(path)?);

        ObjData {
            #[expect(clippy::unnecessary_cast)]
            position: self
                .vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys: self
                        .indices()
                        .iter()
                        .map(|tri| {
                            SimplePolygon(vec![
                                IndexTuple(tri[0] as usize, None, None),
                                IndexTuple(tri[1] as usize, None, None),
                                IndexTuple(tri[2] as usize, None, None),
                            ])
                        })
                        .collect(),
                    name: "".to_string(),
                    index: 0,
                    material: None,
                }],
                name: "".to_string(),
            }],
            ..Default::default()
        }
        .write_to_buf(&mut file)?;

        Ok(())
    }
}
