use crate::math::{Point, Real, Vector, DIM};
use alloc::vec::Vec;

/// A dense 3D grid of signed distance values.
///
/// Values are stored with the X index varying fastest:
/// `index = (z * dims[1] + y) * dims[0] + x`.
///
/// Samples are cell-centered: the sample `(i, j, k)` describes the voxel whose
/// voxel-space extent is `[i, i + 1] x [j, j + 1] x [k, k + 1]`, so it sits at
/// the voxel-space coordinate `(i + 0.5, j + 0.5, k + 0.5)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ScalarField {
    dims: [u32; DIM],
    values: Vec<Real>,
}

impl ScalarField {
    /// Creates a scalar field from its dimensions and its x-fastest values.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero or if `values` does not contain exactly
    /// `dims[0] * dims[1] * dims[2]` elements.
    pub fn new(dims: [u32; DIM], values: Vec<Real>) -> Self {
        assert!(
            dims.iter().all(|d| *d > 0),
            "A scalar field cannot have a zero dimension."
        );
        assert_eq!(
            values.len(),
            dims.iter().map(|d| *d as usize).product::<usize>(),
            "The number of values does not match the scalar field dimensions."
        );
        Self { dims, values }
    }

    /// Creates a scalar field by evaluating `f` on each sample index.
    pub fn from_fn(dims: [u32; DIM], mut f: impl FnMut([u32; DIM]) -> Real) -> Self {
        let len = dims.iter().map(|d| *d as usize).product();
        let mut values = Vec::with_capacity(len);

        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    values.push(f([i, j, k]));
                }
            }
        }

        Self::new(dims, values)
    }

    /// The number of samples along each axis.
    #[inline]
    pub fn dims(&self) -> [u32; DIM] {
        self.dims
    }

    /// The number of samples along each axis, as a real-valued vector.
    #[inline]
    pub fn dims_vector(&self) -> Vector<Real> {
        Vector::new(
            self.dims[0] as Real,
            self.dims[1] as Real,
            self.dims[2] as Real,
        )
    }

    /// The x-fastest sample values.
    #[inline]
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// The total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Is this field empty? Always `false` since every dimension is at least 1.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The linear index of the sample `(i, j, k)`.
    #[inline]
    pub fn linear_index(&self, [i, j, k]: [u32; DIM]) -> usize {
        ((k as usize * self.dims[1] as usize) + j as usize) * self.dims[0] as usize + i as usize
    }

    /// The value of the sample `(i, j, k)`.
    #[inline]
    pub fn get(&self, ijk: [u32; DIM]) -> Real {
        self.values[self.linear_index(ijk)]
    }

    /// Trilinearly interpolates the field at a voxel-space point.
    ///
    /// Points closer to the grid boundary than half a voxel are clamped to
    /// the outermost sample centers.
    pub fn interpolate(&self, voxel_pt: &Point<Real>) -> Real {
        let mut base = [0u32; DIM];
        let mut frac = [0.0; DIM];

        for d in 0..DIM {
            let max = (self.dims[d] - 1) as Real;
            let coord = (voxel_pt[d] - 0.5).clamp(0.0, max);
            let lo = coord.floor().min((self.dims[d].saturating_sub(2)) as Real);
            base[d] = lo as u32;
            frac[d] = coord - lo;
        }

        let mut result = 0.0;

        for corner in 0..8u32 {
            let mut weight = 1.0;
            let mut ijk = base;

            for d in 0..DIM {
                let upper = (corner >> d) & 1 == 1;

                if upper {
                    ijk[d] = (ijk[d] + 1).min(self.dims[d] - 1);
                    weight *= frac[d];
                } else {
                    weight *= 1.0 - frac[d];
                }
            }

            if weight != 0.0 {
                result += weight * self.get(ijk);
            }
        }

        result
    }

    pub(crate) fn shape(&self) -> FieldShape {
        FieldShape { dims: self.dims }
    }
}

/// The x-fastest layout of a [`ScalarField`], as understood by `fast-surface-nets`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldShape {
    dims: [u32; DIM],
}

impl fast_surface_nets::ndshape::Shape<3> for FieldShape {
    type Coord = u32;

    #[inline]
    fn as_array(&self) -> [Self::Coord; 3] {
        self.dims
    }

    fn size(&self) -> Self::Coord {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    fn usize(&self) -> usize {
        self.dims.iter().map(|d| *d as usize).product()
    }

    fn linearize(&self, [x, y, z]: [Self::Coord; 3]) -> u32 {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    fn delinearize(&self, i: u32) -> [Self::Coord; 3] {
        let x = i % self.dims[0];
        let yz = i / self.dims[0];
        let y = yz % self.dims[1];
        let z = yz / self.dims[1];
        [x, y, z]
    }
}

#[cfg(test)]
mod test {
    use super::ScalarField;
    use crate::math::Point;
    use fast_surface_nets::ndshape::Shape;

    #[test]
    fn layout_is_x_fastest() {
        let field = ScalarField::from_fn([3, 2, 2], |[i, j, k]| (i + 10 * j + 100 * k) as _);
        assert_eq!(field.values()[1], 1.0);
        assert_eq!(field.values()[3], 10.0);
        assert_eq!(field.values()[6], 100.0);
        assert_eq!(field.get([2, 1, 1]), 112.0);

        let shape = field.shape();
        assert_eq!(shape.linearize([2, 1, 1]), field.linear_index([2, 1, 1]) as u32);
        assert_eq!(shape.delinearize(11), [2, 1, 1]);
    }

    #[test]
    fn interpolation_is_exact_on_linear_fields() {
        let field = ScalarField::from_fn([4, 4, 4], |[i, j, k]| (i + 2 * j + 3 * k) as _);

        // Sample centers are at half-integer voxel coordinates.
        assert_relative_eq!(field.interpolate(&Point::new(0.5, 0.5, 0.5)), 0.0);
        assert_relative_eq!(field.interpolate(&Point::new(2.0, 1.5, 1.0)), 1.5 + 2.0 + 1.5);
        // Clamped to the outermost samples.
        assert_relative_eq!(field.interpolate(&Point::new(-3.0, 0.5, 0.5)), 0.0);
        assert_relative_eq!(field.interpolate(&Point::new(4.0, 3.5, 3.5)), 3.0 + 6.0 + 9.0);
    }

    #[test]
    fn interpolation_on_single_sample_axis() {
        let field = ScalarField::new([1, 1, 2], vec![1.0, 3.0]);
        assert_relative_eq!(field.interpolate(&Point::new(0.2, 0.7, 1.0)), 2.0);
    }

    #[test]
    #[should_panic]
    fn mismatched_values_panic() {
        let _ = ScalarField::new([2, 2, 2], vec![0.0; 7]);
    }
}
