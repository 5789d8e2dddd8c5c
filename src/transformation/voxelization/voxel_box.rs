use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON, DIM};

/// One of the three coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All the axes, in index order.
    pub const ALL: [Axis; DIM] = [Axis::X, Axis::Y, Axis::Z];

    /// The index of this axis in a vector.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Error raised when a box cannot be discretized into voxels.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum DegenerateInputError {
    /// The box extent along an axis is NaN or infinite.
    #[error("the box extent along {axis:?} is not finite: {extent}")]
    NonFiniteExtent {
        /// The faulty axis.
        axis: Axis,
        /// The faulty extent.
        extent: Real,
    },
    /// The box is flat (or inverted) along an axis.
    #[error("the box extent along {axis:?} is zero or negative: {extent}")]
    ZeroExtent {
        /// The faulty axis.
        axis: Axis,
        /// The faulty extent.
        extent: Real,
    },
    /// A voxel grid needs at least one voxel along its reference axis.
    #[error("the voxel resolution must be at least 1")]
    ZeroResolution,
}

/// The per-axis voxel counts and the uniform voxel size of a voxelized box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelGrid {
    /// Number of voxels along each axis. Every count is at least 1.
    pub dims: [u32; DIM],
    /// The edge length of a single cubic voxel.
    pub voxel_size: Real,
}

impl VoxelGrid {
    /// The total number of voxels of this grid.
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.dims.iter().map(|d| *d as usize).product()
    }

    /// The voxel counts as a real-valued vector.
    #[inline]
    pub fn dims_vector(&self) -> Vector<Real> {
        Vector::new(
            self.dims[0] as Real,
            self.dims[1] as Real,
            self.dims[2] as Real,
        )
    }
}

/// The result of [`snap_to_voxels`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnappedBox {
    /// The adjusted box extents, an integer multiple of the voxel size on each axis.
    pub size: Vector<Real>,
    /// The voxel grid covering the adjusted box.
    pub grid: VoxelGrid,
    /// The axis whose voxel count matches the requested resolution.
    pub reference_axis: Axis,
}

/// An axis-aligned box, described by its center and its full extents.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelBox {
    /// The center of the box.
    pub center: Point<Real>,
    /// The full extents of the box.
    pub size: Vector<Real>,
}

/// Checks that a box can be voxelized with the given resolution.
pub fn validate_box(box_size: &Vector<Real>, resolution: u32) -> Result<(), DegenerateInputError> {
    if resolution == 0 {
        return Err(DegenerateInputError::ZeroResolution);
    }

    for axis in Axis::ALL {
        let extent = box_size[axis.index()];

        if !extent.is_finite() {
            return Err(DegenerateInputError::NonFiniteExtent { axis, extent });
        }

        if extent <= DEFAULT_EPSILON {
            return Err(DegenerateInputError::ZeroExtent { axis, extent });
        }
    }

    Ok(())
}

/// The guard padding added to a box before voxelizing it.
///
/// This is two voxels (one on each side) along every axis, where the voxel
/// size is the largest box extent divided by `max_resolution`.
pub fn compute_padding(box_size: &Vector<Real>, max_resolution: u32) -> Vector<Real> {
    let voxel_size = box_size.max() / max_resolution as Real;
    Vector::repeat(2.0 * voxel_size)
}

/// Grows a box so that it is tiled exactly by cubic voxels.
///
/// The reference axis gets exactly `resolution * extent / max_extent` voxels
/// (rounded to the nearest integer, ties to even) and fixes the voxel size. The
/// other axes get the ceiling of that ratio so they are never under-covered.
/// Every count is at least 1.
///
/// If `reference_axis` is `None`, the largest axis is chosen. On equal extents
/// the last one wins: Y over X, and Z over both.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use granular3d::math::Vector;
/// use granular3d::transformation::voxelization::{snap_to_voxels, Axis};
///
/// let snapped = snap_to_voxels(&Vector::new(2.0, 1.1, 0.5), 10, None);
///
/// assert_eq!(snapped.reference_axis, Axis::X);
/// assert_eq!(snapped.grid.dims, [10, 6, 3]);
/// assert_eq!(snapped.grid.voxel_size, 0.2);
/// # }
/// ```
pub fn snap_to_voxels(
    box_size: &Vector<Real>,
    resolution: u32,
    reference_axis: Option<Axis>,
) -> SnappedBox {
    let max_extent = box_size.max();
    let reference_axis = reference_axis.unwrap_or_else(|| largest_axis(box_size, max_extent));
    let ratio = |extent: Real| resolution as Real * extent / max_extent;

    let mut dims = [1; DIM];

    for axis in Axis::ALL {
        let target = ratio(box_size[axis.index()]);
        let count = if axis == reference_axis {
            target.round_ties_even()
        } else {
            target.ceil()
        };
        dims[axis.index()] = (count as u32).max(1);
    }

    let ref_id = reference_axis.index();
    let voxel_size = box_size[ref_id] / dims[ref_id] as Real;
    let grid = VoxelGrid { dims, voxel_size };

    // `dims * voxel_size` may round one ulp below the input extents.
    let mut size = grid.dims_vector() * voxel_size;
    size[ref_id] = box_size[ref_id];
    let size = size.sup(box_size);

    SnappedBox {
        size,
        grid,
        reference_axis,
    }
}

fn largest_axis(box_size: &Vector<Real>, max_extent: Real) -> Axis {
    let mut axis = Axis::X;

    if box_size.y == max_extent {
        axis = Axis::Y;
    }

    if box_size.z == max_extent {
        axis = Axis::Z;
    }

    axis
}

impl VoxelBox {
    /// Creates a new box from its center and its full extents.
    #[inline]
    pub fn new(center: Point<Real>, size: Vector<Real>) -> Self {
        Self { center, size }
    }

    /// Computes the padded, voxel-aligned box enclosing `aabb`.
    ///
    /// The box extents are padded with [`compute_padding`] then snapped with
    /// [`snap_to_voxels`] on the largest axis. The result is centered on the
    /// center of `aabb`.
    pub fn padded_around(
        aabb: &Aabb,
        resolution: u32,
    ) -> Result<(Self, VoxelGrid), DegenerateInputError> {
        let extents = aabb.extents();
        validate_box(&extents, resolution)?;

        let padded = extents + compute_padding(&extents, resolution);
        let snapped = snap_to_voxels(&padded, resolution, None);

        log::debug!(
            "Voxelized box of extents {:?} into {:?} voxels of size {}.",
            extents.as_slice(),
            snapped.grid.dims,
            snapped.grid.voxel_size
        );

        Ok((Self::new(aabb.center(), snapped.size), snapped.grid))
    }

    /// The corner of this box with the smallest coordinates.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.center - self.size * 0.5
    }

    /// The AABB covered by this box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.size * 0.5)
    }

    /// Maps a point from the voxel space of a grid with `dims` voxels to the
    /// local space of this box.
    ///
    /// Voxel space spans `[0, dims]` along each axis, and its origin maps to
    /// [`Self::mins`].
    #[inline]
    pub fn voxel_to_local(&self, pt: &Point<Real>, dims: &Vector<Real>) -> Point<Real> {
        let ratio = self.size.component_div(dims);
        let shift = self.size * 0.5 - self.center.coords;
        Point::from(pt.coords.component_mul(&ratio) - shift)
    }
}
