use crate::math::{Point, Real};
use crate::sdf::{ExternalServiceError, ScalarField};
use alloc::vec::Vec;
use fast_surface_nets::{surface_nets, SurfaceNetsBuffer};

/// An unwelded triangle soup: every three consecutive vertices form a triangle.
///
/// Vertices shared by adjacent triangles are duplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSoup {
    /// The triangle vertices, three per triangle.
    pub vertices: Vec<Point<Real>>,
}

impl TriangleSoup {
    /// The number of triangles of this soup.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }

    /// An iterator through the vertices of each triangle.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [Point<Real>; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// A service extracting an iso-surface from a scalar field.
pub trait IsoSurfaceExtractor {
    /// Extracts the surface where `field` equals `isolevel`.
    ///
    /// The vertices of the returned soup are expressed in the voxel space of
    /// the field: the sample `(i, j, k)` sits at `(i + 0.5, j + 0.5, k + 0.5)`
    /// and the whole field spans `[0, dims]` on each axis.
    fn extract(
        &mut self,
        field: &ScalarField,
        isolevel: Real,
    ) -> Result<TriangleSoup, ExternalServiceError>;
}

/// An iso-surface extractor based on the Surface Nets algorithm.
///
/// Non-finite samples are treated as being far outside of the surface. The
/// internal buffers are reused from one extraction to the next.
#[derive(Default)]
pub struct SurfaceNetsExtractor {
    shifted: Vec<f32>,
    buffer: SurfaceNetsBuffer,
}

impl SurfaceNetsExtractor {
    /// Creates a new Surface Nets extractor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IsoSurfaceExtractor for SurfaceNetsExtractor {
    fn extract(
        &mut self,
        field: &ScalarField,
        isolevel: Real,
    ) -> Result<TriangleSoup, ExternalServiceError> {
        self.shifted.clear();
        self.shifted.extend(field.values().iter().map(|v| {
            let shifted = v - isolevel;
            if shifted.is_finite() {
                shifted as f32
            } else {
                1.0e10
            }
        }));

        let [nx, ny, nz] = field.dims();
        surface_nets(
            &self.shifted,
            &field.shape(),
            [0; 3],
            [nx - 1, ny - 1, nz - 1],
            &mut self.buffer,
        );

        let positions = &self.buffer.positions;
        let vertices = self
            .buffer
            .indices
            .iter()
            .map(|i| {
                let p = positions[*i as usize];
                Point::new(
                    p[0] as Real + 0.5,
                    p[1] as Real + 0.5,
                    p[2] as Real + 0.5,
                )
            })
            .collect();

        Ok(TriangleSoup { vertices })
    }
}
