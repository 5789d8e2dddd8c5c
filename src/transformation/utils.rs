//! Low-level utilities for mesh generation.
//!
//! These are the building blocks of the shape-to-trimesh conversions: point
//! scaling, circle generation and the index buffers stitching circles together.

use crate::math::{Point, Real, Vector};
use alloc::vec::Vec;
use na::ComplexField;

/// Applies a non-uniform scale to every point of `points`.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use granular3d::transformation::utils::scaled;
/// use granular3d::math::{Point, Vector};
///
/// let points = vec![Point::new(1.0, 2.0, 3.0)];
/// let result = scaled(points, Vector::new(2.0, 3.0, 0.5));
///
/// assert_eq!(result[0], Point::new(2.0, 6.0, 1.5));
/// # }
/// ```
pub fn scaled(mut points: Vec<Point<Real>>, scale: Vector<Real>) -> Vec<Point<Real>> {
    points
        .iter_mut()
        .for_each(|p| p.coords.component_mul_assign(&scale));
    points
}

/// Pushes a discretized counterclockwise circle to a buffer.
///
/// The circle lies on the plane `y = y`, spanned by the X and Z axes, and
/// starts at angle 0 (positive X axis).
pub fn push_circle(radius: Real, nsubdiv: u32, dtheta: Real, y: Real, out: &mut Vec<Point<Real>>) {
    let mut curr_theta: Real = 0.0;

    for _ in 0..nsubdiv {
        out.push(Point::new(
            ComplexField::cos(curr_theta) * radius,
            y,
            ComplexField::sin(curr_theta) * radius,
        ));
        curr_theta += dtheta;
    }
}

/// Pushes two triangles forming the quad `ul, ur, dl, dr`.
#[inline]
pub fn push_rectangle_indices(ul: u32, ur: u32, dl: u32, dr: u32, out: &mut Vec<[u32; 3]>) {
    out.push([ul, dl, dr]);
    out.push([dr, ur, ul]);
}

/// Creates the triangle faces connecting two closed circles of `nsubdiv` points each.
#[inline]
pub fn push_ring_indices(
    base_lower_circle: u32,
    base_upper_circle: u32,
    nsubdiv: u32,
    out: &mut Vec<[u32; 3]>,
) {
    push_open_ring_indices(base_lower_circle, base_upper_circle, nsubdiv, out);

    // Close the ring.
    push_rectangle_indices(
        base_upper_circle,
        base_upper_circle + nsubdiv - 1,
        base_lower_circle,
        base_lower_circle + nsubdiv - 1,
        out,
    );
}

/// Creates the triangle faces connecting two circles, leaving the ring open.
///
/// # Panics
///
/// Panics if `nsubdiv` is zero.
#[inline]
pub fn push_open_ring_indices(
    base_lower_circle: u32,
    base_upper_circle: u32,
    nsubdiv: u32,
    out: &mut Vec<[u32; 3]>,
) {
    assert!(nsubdiv > 0);

    for i in 0..nsubdiv - 1 {
        let bli = base_lower_circle + i;
        let bui = base_upper_circle + i;
        push_rectangle_indices(bui + 1, bui, bli + 1, bli, out);
    }
}

/// Creates the faces connecting a closed circle to a single apex.
///
/// With `upward` set, the faces are counterclockwise when seen from the
/// positive Y axis. Otherwise they are counterclockwise when seen from the
/// negative Y axis.
pub fn push_apex_ring_indices(
    base_circle: u32,
    apex: u32,
    nsubdiv: u32,
    upward: bool,
    out: &mut Vec<[u32; 3]>,
) {
    for i in 0..nsubdiv {
        let curr = base_circle + i;
        let next = base_circle + (i + 1) % nsubdiv;

        if upward {
            out.push([curr, apex, next]);
        } else {
            out.push([next, apex, curr]);
        }
    }
}
