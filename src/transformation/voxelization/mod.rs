//! Normalization of bounding boxes into cubic-voxel grids.
//!
//! A mesh bounding box is first padded by [`compute_padding`] so its surface
//! never touches the grid boundary, then snapped by [`snap_to_voxels`] so that
//! every axis is an integer number of identical cubic voxels.
//! [`VoxelBox::padded_around`] chains both steps.

pub use self::voxel_box::{
    compute_padding, snap_to_voxels, validate_box, Axis, DegenerateInputError, SnappedBox,
    VoxelBox, VoxelGrid,
};

mod voxel_box;
