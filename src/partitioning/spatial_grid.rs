use crate::bounding_volume::Aabb;
use crate::buffer::{ExternalBuffer, HostOnly};
use crate::math::{Point, Real, Vector, DIM};
use alloc::vec;
use alloc::vec::Vec;

/// Error raised when a [`SpatialGrid`] cannot be built or updated.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum SpatialGridError {
    /// The cell size is negative, zero, non-finite, or so small that the
    /// number of cells overflows.
    #[error("invalid grid cell size: {0}")]
    InvalidCellSize(Real),
    /// The grid bounds are not finite or have a negative extent.
    #[error("the grid bounds must be finite with non-negative extents")]
    InvalidBounds,
    /// The grid was released and can no longer be rebuilt.
    #[error("the spatial grid has been released")]
    Released,
}

/// A uniform grid indexing points for neighbor queries.
///
/// The grid bounds are split into cubic cells. Each point is stored in the
/// cell containing it; points outside of the bounds are stored in the closest
/// boundary cell. The cell contents are kept in compressed form: the indices
/// of the points sorted by cell, and the start of each cell in that array.
///
/// Both tables are uploaded to external buffers on every rebuild. The grid
/// must be released explicitly with [`SpatialGrid::release`].
pub struct SpatialGrid<C = HostOnly, I = HostOnly>
where
    C: ExternalBuffer<u32>,
    I: ExternalBuffer<u32>,
{
    bounds: Aabb,
    cell_size: Real,
    dims: [u32; DIM],
    cell_starts: Vec<u32>,
    sorted_indices: Vec<u32>,
    positions: Vec<Point<Real>>,
    cell_buffer: C,
    index_buffer: I,
    released: bool,
}

impl SpatialGrid<HostOnly, HostOnly> {
    /// Creates an empty grid over `bounds` living only on the host.
    pub fn new(bounds: Aabb, cell_size: Real) -> Result<Self, SpatialGridError> {
        Self::with_buffers(bounds, cell_size, HostOnly, HostOnly)
    }
}

impl<C: ExternalBuffer<u32>, I: ExternalBuffer<u32>> SpatialGrid<C, I> {
    /// Creates an empty grid over `bounds`, mirroring its cell table in
    /// `cell_buffer` and its sorted point indices in `index_buffer`.
    pub fn with_buffers(
        bounds: Aabb,
        cell_size: Real,
        cell_buffer: C,
        index_buffer: I,
    ) -> Result<Self, SpatialGridError> {
        let dims = grid_dims(&bounds, cell_size)?;
        let num_cells = dims.iter().map(|d| *d as usize).product::<usize>();

        log::debug!(
            "Creating a {}x{}x{} spatial grid with a cell size of {}.",
            dims[0],
            dims[1],
            dims[2],
            cell_size
        );

        Ok(Self {
            bounds,
            cell_size,
            dims,
            cell_starts: vec![0; num_cells + 1],
            sorted_indices: Vec::new(),
            positions: Vec::new(),
            cell_buffer,
            index_buffer,
            released: false,
        })
    }

    /// The region covered by this grid.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The edge length of each cubic cell.
    #[inline]
    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn dims(&self) -> [u32; DIM] {
        self.dims
    }

    /// The total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cell_starts.len().saturating_sub(1)
    }

    /// The number of points indexed by this grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Does this grid index no point?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The points indexed by the last rebuild.
    #[inline]
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// For each cell, the index of its first point in [`Self::sorted_indices`].
    ///
    /// This has one more entry than there are cells: the points of the cell
    /// `c` are `sorted_indices[cell_starts[c]..cell_starts[c + 1]]`.
    #[inline]
    pub fn cell_starts(&self) -> &[u32] {
        &self.cell_starts
    }

    /// The indices of all the points, sorted by cell.
    #[inline]
    pub fn sorted_indices(&self) -> &[u32] {
        &self.sorted_indices
    }

    /// The external mirror of the cell table.
    #[inline]
    pub fn cell_buffer(&self) -> &C {
        &self.cell_buffer
    }

    /// The external mirror of the sorted point indices.
    #[inline]
    pub fn index_buffer(&self) -> &I {
        &self.index_buffer
    }

    /// Has [`Self::release`] been called?
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The cell containing `pt`, clamped to the grid.
    pub fn cell_of(&self, pt: &Point<Real>) -> [u32; DIM] {
        let local = (pt - self.bounds.mins) / self.cell_size;
        let mut cell = [0; DIM];

        for d in 0..DIM {
            let max = (self.dims[d] - 1) as Real;
            // NaN coordinates end up in the first cell.
            cell[d] = local[d].floor().clamp(0.0, max) as u32;
        }

        cell
    }

    /// The linear index of a cell, X varying fastest.
    #[inline]
    pub fn linear_cell_index(&self, [i, j, k]: [u32; DIM]) -> usize {
        (k as usize * self.dims[1] as usize + j as usize) * self.dims[0] as usize + i as usize
    }

    /// The indices of the points stored in the given cell.
    pub fn cell_content(&self, cell: [u32; DIM]) -> &[u32] {
        let id = self.linear_cell_index(cell);
        match (self.cell_starts.get(id), self.cell_starts.get(id + 1)) {
            (Some(start), Some(end)) => &self.sorted_indices[*start as usize..*end as usize],
            _ => &[],
        }
    }

    /// Replaces the content of the grid with `positions`.
    ///
    /// The previous content is discarded. Positions outside of the grid bounds
    /// are stored in the closest boundary cell.
    pub fn rebuild(&mut self, positions: &[Point<Real>]) -> Result<(), SpatialGridError> {
        if self.released {
            return Err(SpatialGridError::Released);
        }

        self.positions.clear();
        self.positions.extend_from_slice(positions);

        // Counting sort of the point indices by cell.
        let cells: Vec<usize> = positions
            .iter()
            .map(|pt| self.linear_cell_index(self.cell_of(pt)))
            .collect();

        self.cell_starts.iter_mut().for_each(|s| *s = 0);

        for cell in &cells {
            self.cell_starts[*cell + 1] += 1;
        }

        for i in 1..self.cell_starts.len() {
            self.cell_starts[i] += self.cell_starts[i - 1];
        }

        let mut cursors = self.cell_starts.clone();
        self.sorted_indices.clear();
        self.sorted_indices.resize(positions.len(), 0);

        for (i, cell) in cells.iter().enumerate() {
            let slot = &mut cursors[*cell];
            self.sorted_indices[*slot as usize] = i as u32;
            *slot += 1;
        }

        self.cell_buffer.upload(&self.cell_starts);
        self.index_buffer.upload(&self.sorted_indices);

        log::trace!(
            "Rebuilt a spatial grid with {} points in {} cells.",
            positions.len(),
            self.num_cells()
        );

        Ok(())
    }

    /// Changes the bounds and cell size of the grid, then rebuilds it with `positions`.
    ///
    /// On error, the grid is left unchanged.
    pub fn rebuild_with(
        &mut self,
        positions: &[Point<Real>],
        bounds: Aabb,
        cell_size: Real,
    ) -> Result<(), SpatialGridError> {
        if self.released {
            return Err(SpatialGridError::Released);
        }

        let dims = grid_dims(&bounds, cell_size)?;
        let num_cells = dims.iter().map(|d| *d as usize).product::<usize>();

        self.bounds = bounds;
        self.cell_size = cell_size;
        self.dims = dims;
        self.cell_starts.clear();
        self.cell_starts.resize(num_cells + 1, 0);

        self.rebuild(positions)
    }

    /// The indices of every point stored in a cell overlapping the cube of
    /// half-side `radius` centered at `position`.
    ///
    /// This is a superset of [`Self::query_neighbors`].
    pub fn candidates(&self, position: &Point<Real>, radius: Real) -> Vec<u32> {
        let mut result = Vec::new();
        self.visit_candidates(position, radius, |i| result.push(i));
        result
    }

    /// The indices of every point at a distance smaller or equal to `radius`
    /// from `position`.
    pub fn query_neighbors(&self, position: &Point<Real>, radius: Real) -> Vec<u32> {
        let mut result = Vec::new();
        let sq_radius = radius * radius;

        self.visit_candidates(position, radius, |i| {
            if na::distance_squared(&self.positions[i as usize], position) <= sq_radius {
                result.push(i)
            }
        });

        result
    }

    fn visit_candidates(&self, position: &Point<Real>, radius: Real, mut f: impl FnMut(u32)) {
        if self.sorted_indices.is_empty() || radius.is_nan() || radius < 0.0 {
            return;
        }

        let offset = Vector::repeat(radius);
        let mins = self.cell_of(&(position - offset));
        let maxs = self.cell_of(&(position + offset));

        for k in mins[2]..=maxs[2] {
            for j in mins[1]..=maxs[1] {
                for i in mins[0]..=maxs[0] {
                    self.cell_content([i, j, k]).iter().for_each(|id| f(*id));
                }
            }
        }
    }

    /// Frees the grid tables and releases both external buffers.
    ///
    /// Only the first call has an effect. The grid cannot be rebuilt afterwards.
    pub fn release(&mut self) {
        if self.released {
            return;
        }

        self.released = true;
        self.cell_starts = Vec::new();
        self.sorted_indices = Vec::new();
        self.positions = Vec::new();
        self.cell_buffer.release();
        self.index_buffer.release();
    }
}

impl<C: ExternalBuffer<u32>, I: ExternalBuffer<u32>> Drop for SpatialGrid<C, I> {
    fn drop(&mut self) {
        if !self.released {
            log::warn!("A spatial grid was dropped without being released.");
        }
    }
}

fn grid_dims(bounds: &Aabb, cell_size: Real) -> Result<[u32; DIM], SpatialGridError> {
    if cell_size <= 0.0 || !cell_size.is_finite() {
        return Err(SpatialGridError::InvalidCellSize(cell_size));
    }

    let extents = bounds.extents();

    if bounds.mins.iter().chain(bounds.maxs.iter()).any(|e| !e.is_finite())
        || extents.iter().any(|e| *e < 0.0)
    {
        return Err(SpatialGridError::InvalidBounds);
    }

    let mut dims = [1; DIM];
    let mut num_cells: u64 = 1;

    for d in 0..DIM {
        let n = (extents[d] / cell_size).ceil().max(1.0);

        if n > u32::MAX as Real {
            return Err(SpatialGridError::InvalidCellSize(cell_size));
        }

        dims[d] = n as u32;
        num_cells = num_cells.saturating_mul(dims[d] as u64);
    }

    if num_cells >= u32::MAX as u64 {
        return Err(SpatialGridError::InvalidCellSize(cell_size));
    }

    Ok(dims)
}

#[cfg(test)]
mod test {
    use super::{SpatialGrid, SpatialGridError};
    use crate::bounding_volume::Aabb;
    use crate::buffer::ExternalBuffer;
    use crate::math::{Point, Real};

    fn unit_bounds() -> Aabb {
        Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0))
    }

    #[derive(Default)]
    struct TrackingBuffer {
        uploads: u32,
        releases: u32,
        last_len: usize,
    }

    impl ExternalBuffer<u32> for TrackingBuffer {
        fn upload(&mut self, data: &[u32]) {
            self.uploads += 1;
            self.last_len = data.len();
        }

        fn release(&mut self) {
            self.releases += 1;
        }
    }

    #[test]
    fn grid_dimensions() {
        let mut grid = SpatialGrid::new(
            Aabb::new(Point::origin(), Point::new(1.0, 0.25, 0.0)),
            0.3,
        )
        .unwrap();
        assert_eq!(grid.dims(), [4, 1, 1]);
        assert_eq!(grid.num_cells(), 4);
        assert_eq!(grid.cell_starts().len(), 5);
        grid.release();
    }

    #[test]
    fn invalid_parameters() {
        for cell_size in [0.0, -1.0, Real::INFINITY, 1.0e-12] {
            assert_eq!(
                SpatialGrid::new(unit_bounds(), cell_size).err(),
                Some(SpatialGridError::InvalidCellSize(cell_size))
            );
        }

        assert!(matches!(
            SpatialGrid::new(unit_bounds(), Real::NAN),
            Err(SpatialGridError::InvalidCellSize(_))
        ));
        assert_eq!(
            SpatialGrid::new(Aabb::new_invalid(), 0.1).err(),
            Some(SpatialGridError::InvalidBounds)
        );
    }

    #[test]
    fn each_point_is_in_exactly_one_cell() {
        let mut grid = SpatialGrid::new(unit_bounds(), 0.25).unwrap();
        let pts = [
            Point::new(0.1, 0.1, 0.1),
            Point::new(0.9, 0.9, 0.9),
            Point::new(0.12, 0.1, 0.2),
            // Out of bounds points are clamped, not dropped.
            Point::new(-5.0, 0.5, 10.0),
            Point::new(1.0, 1.0, 1.0),
        ];
        grid.rebuild(&pts).unwrap();

        let mut seen = grid.sorted_indices().to_vec();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);

        assert_eq!(grid.cell_content([0, 0, 0]), &[0, 2]);
        assert_eq!(grid.cell_content([0, 2, 3]), &[3]);
        assert_eq!(grid.cell_content([3, 3, 3]), &[1, 4]);

        // Rebuilding discards the previous content.
        grid.rebuild(&pts[..1]).unwrap();
        assert_eq!(grid.sorted_indices(), &[0]);
        assert_eq!(grid.cell_content([3, 3, 3]), &[] as &[u32]);
        grid.release();
    }

    #[test]
    fn queries_match_brute_force() {
        let mut rng = oorandom::Rand32::new(42);
        let bounds = Aabb::new(Point::new(-1.0, -2.0, 0.0), Point::new(3.0, 1.0, 0.5));
        let mut grid = SpatialGrid::new(bounds, 0.3).unwrap();

        let mut random_point = || {
            Point::new(
                rng.rand_float() as Real * 5.0 - 1.5,
                rng.rand_float() as Real * 4.0 - 2.5,
                rng.rand_float() as Real * 1.5 - 0.5,
            )
        };

        let pts: Vec<_> = (0..500).map(|_| random_point()).collect();
        grid.rebuild(&pts).unwrap();

        for _ in 0..50 {
            let center = random_point();

            for radius in [0.0, 0.1, 0.3, 0.7] {
                let mut candidates = grid.candidates(&center, radius);
                let mut neighbors = grid.query_neighbors(&center, radius);
                candidates.sort();
                neighbors.sort();

                let expected: Vec<u32> = (0..pts.len() as u32)
                    .filter(|i| na::distance_squared(&pts[*i as usize], &center) <= radius * radius)
                    .collect();

                assert_eq!(neighbors, expected);
                assert!(expected.iter().all(|i| candidates.binary_search(i).is_ok()));
            }
        }

        assert!(grid.query_neighbors(&Point::origin(), -1.0).is_empty());
        grid.release();
    }

    #[test]
    fn rebuild_with_new_bounds() {
        let mut grid = SpatialGrid::new(unit_bounds(), 0.5).unwrap();
        let pts = [Point::new(3.5, 3.5, 3.5)];
        grid.rebuild_with(&pts, Aabb::new(Point::origin(), Point::new(4.0, 4.0, 4.0)), 1.0)
            .unwrap();

        assert_eq!(grid.dims(), [4, 4, 4]);
        assert_eq!(grid.cell_content([3, 3, 3]), &[0]);

        // Invalid parameters leave the grid untouched.
        assert_eq!(
            grid.rebuild_with(&pts, unit_bounds(), 0.0),
            Err(SpatialGridError::InvalidCellSize(0.0))
        );
        assert_eq!(grid.dims(), [4, 4, 4]);
        grid.release();
    }

    #[test]
    fn release_happens_once() {
        let mut grid = SpatialGrid::with_buffers(
            unit_bounds(),
            0.5,
            TrackingBuffer::default(),
            TrackingBuffer::default(),
        )
        .unwrap();

        grid.rebuild(&[Point::new(0.2, 0.2, 0.2), Point::new(0.7, 0.2, 0.2)])
            .unwrap();
        assert_eq!(grid.cell_buffer().uploads, 1);
        assert_eq!(grid.cell_buffer().last_len, 9);
        assert_eq!(grid.index_buffer().last_len, 2);

        grid.release();
        grid.release();
        assert!(grid.is_released());
        assert_eq!(grid.cell_buffer().releases, 1);
        assert_eq!(grid.index_buffer().releases, 1);

        assert_eq!(grid.rebuild(&[]), Err(SpatialGridError::Released));
        assert!(grid.query_neighbors(&Point::origin(), 10.0).is_empty());
    }
}
